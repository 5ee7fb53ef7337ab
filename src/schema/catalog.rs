//! Static school catalog: subjects, semesters, periods and capacity limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A teaching period within a school day (1-based).
pub type Period = u8;

/// Number of periods in a school day.
pub const PERIOD_COUNT: usize = 7;

/// All periods in day order.
pub const PERIODS: [Period; PERIOD_COUNT] = [1, 2, 3, 4, 5, 6, 7];

/// Maximum number of students in one (semester, period, subject) roster.
pub const MAX_CAPACITY: usize = 30;

/// Number of filled periods every teacher should carry per semester.
pub const TEACHER_LOAD: usize = 5;

/// Convert a period into a zero-based index, if it lies in the school day.
#[inline]
pub fn period_index(period: Period) -> Option<usize> {
    let idx = (period as usize).checked_sub(1)?;
    (idx < PERIOD_COUNT).then_some(idx)
}

/// Half of the school year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    Fall,
    Spring,
}

impl Semester {
    /// Both semesters in calendar order.
    pub const ALL: [Semester; 2] = [Semester::Fall, Semester::Spring];

    /// Zero-based index of this semester.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Semester::Fall => 0,
            Semester::Spring => 1,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::Fall => f.write_str("Fall"),
            Semester::Spring => f.write_str("Spring"),
        }
    }
}

/// Curriculum path of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// General education: takes the regular core subjects.
    GenEd,
    /// Advanced learner: takes the advanced core subjects.
    AL,
}

/// Subject codes known to the school.
///
/// Serialized by code (`"math"`, `"AL_math"`, `"PE"`, `"A"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "math")]
    Math,
    #[serde(rename = "science")]
    Science,
    #[serde(rename = "language_arts")]
    LanguageArts,
    #[serde(rename = "social_studies")]
    SocialStudies,
    #[serde(rename = "AL_math")]
    AlMath,
    #[serde(rename = "AL_science")]
    AlScience,
    #[serde(rename = "AL_language_arts")]
    AlLanguageArts,
    #[serde(rename = "AL_social_studies")]
    AlSocialStudies,
    X,
    Y,
    #[serde(rename = "PE")]
    Pe,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

/// General education core subjects.
pub const CORE: [Subject; 4] = [
    Subject::Math,
    Subject::Science,
    Subject::LanguageArts,
    Subject::SocialStudies,
];

/// Advanced-track core subjects.
pub const AL_CORE: [Subject; 4] = [
    Subject::AlMath,
    Subject::AlScience,
    Subject::AlLanguageArts,
    Subject::AlSocialStudies,
];

/// Electives offered in both semesters.
pub const FULL_YEAR: [Subject; 2] = [Subject::X, Subject::Y];

/// The semester-only mandatory elective.
pub const PE: Subject = Subject::Pe;

/// General semester electives.
pub const SEM_ELECTIVES: [Subject; 8] = [
    Subject::A,
    Subject::B,
    Subject::C,
    Subject::D,
    Subject::E,
    Subject::F,
    Subject::G,
    Subject::H,
];

/// Number of subjects in the catalog.
pub const SUBJECT_COUNT: usize = 19;

impl Subject {
    /// Every subject in catalog order.
    pub const ALL: [Subject; SUBJECT_COUNT] = [
        Subject::Math,
        Subject::Science,
        Subject::LanguageArts,
        Subject::SocialStudies,
        Subject::AlMath,
        Subject::AlScience,
        Subject::AlLanguageArts,
        Subject::AlSocialStudies,
        Subject::X,
        Subject::Y,
        Subject::Pe,
        Subject::A,
        Subject::B,
        Subject::C,
        Subject::D,
        Subject::E,
        Subject::F,
        Subject::G,
        Subject::H,
    ];

    /// Position of this subject in [`Subject::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Catalog code of this subject.
    pub fn code(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::LanguageArts => "language_arts",
            Subject::SocialStudies => "social_studies",
            Subject::AlMath => "AL_math",
            Subject::AlScience => "AL_science",
            Subject::AlLanguageArts => "AL_language_arts",
            Subject::AlSocialStudies => "AL_social_studies",
            Subject::X => "X",
            Subject::Y => "Y",
            Subject::Pe => "PE",
            Subject::A => "A",
            Subject::B => "B",
            Subject::C => "C",
            Subject::D => "D",
            Subject::E => "E",
            Subject::F => "F",
            Subject::G => "G",
            Subject::H => "H",
        }
    }

    /// Whether the subject runs all year.
    pub fn is_full_year(self) -> bool {
        FULL_YEAR.contains(&self)
    }

    /// Whether the subject is a general semester elective.
    pub fn is_semester_elective(self) -> bool {
        SEM_ELECTIVES.contains(&self)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Unknown subject code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown subject code: {0}")]
pub struct UnknownSubject(pub String);

impl FromStr for Subject {
    type Err = UnknownSubject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .iter()
            .copied()
            .find(|subject| subject.code() == s)
            .ok_or_else(|| UnknownSubject(s.to_string()))
    }
}

/// Core subjects a student on `track` must take every semester.
pub fn core_subjects(track: Track) -> &'static [Subject; 4] {
    match track {
        Track::GenEd => &CORE,
        Track::AL => &AL_CORE,
    }
}

/// Subjects that must be offered at least once in every semester.
pub fn mandatory_subjects() -> impl Iterator<Item = Subject> {
    CORE.into_iter()
        .chain(AL_CORE)
        .chain(FULL_YEAR)
        .chain(std::iter::once(PE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_codes_roundtrip() {
        for subject in Subject::ALL {
            assert_eq!(subject.code().parse::<Subject>(), Ok(subject));
        }
        assert!("chemistry".parse::<Subject>().is_err());
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Subject::AlLanguageArts).unwrap();
        assert_eq!(json, "\"AL_language_arts\"");
        let parsed: Subject = serde_json::from_str("\"PE\"").unwrap();
        assert_eq!(parsed, PE);
    }

    #[test]
    fn test_subject_index_matches_catalog_order() {
        for (idx, subject) in Subject::ALL.into_iter().enumerate() {
            assert_eq!(subject.index(), idx);
        }
    }

    #[test]
    fn test_period_index() {
        assert_eq!(period_index(1), Some(0));
        assert_eq!(period_index(7), Some(6));
        assert_eq!(period_index(0), None);
        assert_eq!(period_index(8), None);
    }

    #[test]
    fn test_mandatory_subjects() {
        let mandatory: Vec<Subject> = mandatory_subjects().collect();
        assert_eq!(mandatory.len(), 11);
        assert!(mandatory.contains(&PE));
        assert!(!mandatory.contains(&Subject::A));
    }

    #[test]
    fn test_core_subjects_by_track() {
        assert_eq!(core_subjects(Track::GenEd)[0], Subject::Math);
        assert_eq!(core_subjects(Track::AL)[0], Subject::AlMath);
    }
}
