use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::MovieRecord;

/// Draw one record uniformly at random; `None` when there are no candidates.
///
/// Every call is independent of previous picks.
pub fn select_random<'a, R: Rng + ?Sized>(
    candidates: &'a [MovieRecord],
    rng: &mut R,
) -> Option<&'a MovieRecord> {
    candidates.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::ingest::sample_catalog;

    #[test]
    fn empty_candidates_yield_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_random(&[], &mut rng).is_none());
    }

    #[test]
    fn single_candidate_is_always_picked() {
        let catalog = sample_catalog();
        let one = &catalog.movies()[..1];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(select_random(one, &mut rng), Some(&one[0]));
        }
    }

    #[test]
    fn frequencies_converge_to_uniform() {
        let catalog = sample_catalog();
        let candidates = catalog.movies();
        let n = candidates.len();
        let draws = 130_000;
        let mut counts = vec![0usize; n];
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..draws {
            let pick = select_random(candidates, &mut rng).unwrap();
            let idx = candidates.iter().position(|m| m == pick).unwrap();
            counts[idx] += 1;
        }

        let expected = draws as f64 / n as f64;
        for (idx, count) in counts.iter().enumerate() {
            let deviation = (*count as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.05,
                "candidate {idx} drawn {count} times, expected about {expected}"
            );
        }
    }
}
