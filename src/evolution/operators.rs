//! Genetic operators: tournament selection, single-locus crossover and mutation.

use rand::prelude::*;

use super::chromosome::Chromosome;
use crate::schema::{PERIODS, Semester, Teacher};

/// Tournament selection over a population scored by `fitnesses`.
///
/// Samples `k` distinct members and returns a copy of the lowest-scoring one
/// (first in sample order on ties). `k` is clamped to the population size.
/// Returns `None` for an empty population.
pub fn tournament_select<R: Rng + ?Sized>(
    population: &[Chromosome],
    fitnesses: &[u32],
    k: usize,
    rng: &mut R,
) -> Option<Chromosome> {
    debug_assert_eq!(population.len(), fitnesses.len());
    if population.is_empty() {
        return None;
    }
    let k = k.clamp(1, population.len());

    let mut best: Option<usize> = None;
    for idx in rand::seq::index::sample(rng, population.len(), k) {
        if best.is_none_or(|b| fitnesses[idx] < fitnesses[b]) {
            best = Some(idx);
        }
    }
    best.map(|idx| population[idx].clone())
}

/// Swap one random (semester, period) locus between copies of the parents.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    let semester = Semester::ALL[rng.gen_range(0..Semester::ALL.len())];
    let period = PERIODS[rng.gen_range(0..PERIODS.len())];
    child1.swap_locus(&mut child2, semester, period);

    (child1, child2)
}

/// Mutate a chromosome in place.
///
/// Slots outside the teacher's availability are always cleared. Every other
/// slot is, with probability `rate`, replaced by one of the teacher's
/// subjects or left empty, chosen uniformly.
pub fn mutate<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    teachers: &[Teacher],
    rate: f64,
    rng: &mut R,
) {
    let rate = rate.clamp(0.0, 1.0);
    for semester in Semester::ALL {
        for period in PERIODS {
            for (idx, teacher) in teachers.iter().enumerate() {
                if !teacher.is_available(semester, period) {
                    chromosome.set(semester, period, idx, None);
                } else if rng.gen_bool(rate) {
                    let choice = rng.gen_range(0..=teacher.subjects.len());
                    chromosome.set(semester, period, idx, teacher.subjects.get(choice).copied());
                }
            }
        }
    }
}
