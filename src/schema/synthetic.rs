//! Mock school generation for demos, benchmarks and the CLI.
//!
//! Generated data satisfies the same contracts as real input: teachers
//! carry 6 of 7 periods of availability per semester and students only
//! request electives that some teacher can teach.

use std::collections::BTreeSet;

use rand::prelude::*;

use super::catalog::{
    AL_CORE, CORE, FULL_YEAR, PE, PERIODS, SEM_ELECTIVES, Semester, Subject, Track,
};
use super::school::{Gender, School, Student, Teacher};

/// Generate a school with `teachers` teachers and `students` students.
pub fn generate_school<R: Rng + ?Sized>(teachers: usize, students: usize, rng: &mut R) -> School {
    let teachers = generate_teachers(teachers, rng);
    let students = generate_students(students, &teachers, rng);
    School { teachers, students }
}

/// Generate `n` teachers; one or two of them are PE specialists.
pub fn generate_teachers<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Teacher> {
    let teachable: Vec<Subject> = CORE
        .into_iter()
        .chain(AL_CORE)
        .chain(FULL_YEAR)
        .chain(SEM_ELECTIVES)
        .collect();

    let pe_count = rng.gen_range(1..=2).min(n);
    let pe_indices: BTreeSet<usize> = rand::seq::index::sample(rng, n, pe_count)
        .into_iter()
        .collect();

    (0..n)
        .map(|i| {
            let subjects: Vec<Subject> = if pe_indices.contains(&i) {
                vec![PE]
            } else {
                let count = rng.gen_range(3..=5);
                teachable.choose_multiple(rng, count).copied().collect()
            };

            Semester::ALL.into_iter().fold(
                Teacher::new(format!("T{}", i + 1), subjects),
                |teacher, semester| {
                    let periods: Vec<_> = PERIODS.choose_multiple(rng, 6).copied().collect();
                    teacher.with_availability(semester, periods)
                },
            )
        })
        .collect()
}

/// Generate `n` students whose requests are drawn from offered electives.
pub fn generate_students<R: Rng + ?Sized>(
    n: usize,
    teachers: &[Teacher],
    rng: &mut R,
) -> Vec<Student> {
    let mut full_year = BTreeSet::new();
    let mut semester = BTreeSet::new();
    for subject in teachers.iter().flat_map(|t| t.subjects.iter().copied()) {
        if subject.is_full_year() {
            full_year.insert(subject);
        } else if subject.is_semester_elective() {
            semester.insert(subject);
        }
    }
    let full_year: Vec<Subject> = full_year.into_iter().collect();
    let semester: Vec<Subject> = semester.into_iter().collect();

    (0..n)
        .map(|i| {
            let gender = if rng.gen_bool(0.5) {
                Gender::Male
            } else {
                Gender::Female
            };
            let track = if rng.gen_bool(0.5) {
                Track::GenEd
            } else {
                Track::AL
            };
            let pe_semester = if rng.gen_bool(0.5) {
                Semester::Fall
            } else {
                Semester::Spring
            };

            let mix = rng.r#gen::<f64>();
            let requests: Vec<Subject> =
                if mix < 0.33 && full_year.len() >= 2 && !semester.is_empty() {
                    [pick(&full_year, 2, rng), pick(&semester, 1, rng)].concat()
                } else if mix < 0.66 && !full_year.is_empty() && semester.len() >= 3 {
                    [pick(&full_year, 1, rng), pick(&semester, 3, rng)].concat()
                } else if semester.len() >= 5 {
                    pick(&semester, 5, rng)
                } else {
                    [pick(&full_year, 2, rng), pick(&semester, 3, rng)].concat()
                };

            let remaining: Vec<Subject> = semester
                .iter()
                .copied()
                .filter(|s| !requests.contains(s))
                .collect();
            let alternates = pick(&remaining, 4, rng);

            Student::new(format!("S{}", i + 1), gender, track, pe_semester)
                .with_requests(requests)
                .with_alternates(alternates)
        })
        .collect()
}

/// Up to `amount` distinct subjects from `pool` in random order.
fn pick<R: Rng + ?Sized>(pool: &[Subject], amount: usize, rng: &mut R) -> Vec<Subject> {
    pool.choose_multiple(rng, amount.min(pool.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_teachers() {
        let mut rng = StdRng::seed_from_u64(42);
        let teachers = generate_teachers(20, &mut rng);

        assert_eq!(teachers.len(), 20);
        let pe_specialists = teachers.iter().filter(|t| t.subjects == vec![PE]).count();
        assert!((1..=2).contains(&pe_specialists));

        for teacher in &teachers {
            for semester in Semester::ALL {
                assert_eq!(teacher.available_periods(semester).count(), 6);
            }
            if teacher.subjects != vec![PE] {
                assert!((3..=5).contains(&teacher.subjects.len()));
                assert!(!teacher.teaches(PE));
            }
        }
    }

    #[test]
    fn test_students_request_offered_subjects() {
        let mut rng = StdRng::seed_from_u64(7);
        let school = generate_school(10, 100, &mut rng);

        assert_eq!(school.students.len(), 100);
        for student in &school.students {
            for subject in student.preferences() {
                assert!(school.teachers.iter().any(|t| t.teaches(subject)));
            }
            for alternate in &student.alternates {
                assert!(!student.requests.contains(alternate));
            }
            assert!(student.alternates.len() <= 4);
        }
    }

    #[test]
    fn test_generation_is_seeded() {
        let a = generate_school(8, 30, &mut StdRng::seed_from_u64(3));
        let b = generate_school(8, 30, &mut StdRng::seed_from_u64(3));

        let requests = |school: &School| -> Vec<Vec<Subject>> {
            school.students.iter().map(|s| s.requests.clone()).collect()
        };
        assert_eq!(requests(&a), requests(&b));
        assert_eq!(a.teachers[0].subjects, b.teachers[0].subjects);
    }
}
