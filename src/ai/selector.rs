use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::rules::Candidate;
use crate::types::Position;

/// Picks one move out of the legal candidates.
///
/// Contract: the returned position is always one of `candidates`, and `None`
/// is returned only when `candidates` is empty.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, candidates: &[Candidate], rng: &mut ChaCha8Rng) -> Option<Position>;
}

/// Uniformly random legal move.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicSelector;

impl MoveSelector for BasicSelector {
    fn select_move(&self, candidates: &[Candidate], rng: &mut ChaCha8Rng) -> Option<Position> {
        pick_uniform(candidates, rng)
    }
}

/// Random corner if one is available, otherwise the first move with the most flips.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyCornerSelector;

impl MoveSelector for GreedyCornerSelector {
    fn select_move(&self, candidates: &[Candidate], rng: &mut ChaCha8Rng) -> Option<Position> {
        let corners: Vec<Candidate> = candidates
            .iter()
            .copied()
            .filter(|c| c.pos.is_corner())
            .collect();
        if !corners.is_empty() {
            return pick_uniform(&corners, rng);
        }

        // Ties resolve to the earliest candidate in row-major order.
        let best = candidates.iter().map(|c| c.flips).max()?;
        candidates.iter().find(|c| c.flips == best).map(|c| c.pos)
    }
}

fn pick_uniform(candidates: &[Candidate], rng: &mut ChaCha8Rng) -> Option<Position> {
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index].pos)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn cand(row: u8, col: u8, flips: usize) -> Candidate {
        Candidate {
            pos: Position::new(row, col).unwrap(),
            flips,
        }
    }

    #[test]
    fn empty_candidates_yield_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(BasicSelector.select_move(&[], &mut rng), None);
        assert_eq!(GreedyCornerSelector.select_move(&[], &mut rng), None);
    }

    #[test]
    fn greedy_prefers_corner_over_bigger_capture() {
        let moves = [cand(0, 0, 1), cand(2, 3, 5), cand(5, 5, 7)];

        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(
                GreedyCornerSelector.select_move(&moves, &mut rng),
                Some(moves[0].pos)
            );
        }
    }

    #[test]
    fn greedy_chooses_only_among_corners_when_several_exist() {
        let moves = [cand(0, 7, 1), cand(3, 3, 9), cand(7, 0, 2)];

        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pos = GreedyCornerSelector.select_move(&moves, &mut rng).unwrap();
            assert!(pos.is_corner());
        }
    }

    #[test]
    fn greedy_tie_breaks_to_first_in_row_major_order() {
        let moves = [cand(1, 2, 2), cand(2, 1, 4), cand(4, 6, 4), cand(6, 6, 3)];
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        assert_eq!(
            GreedyCornerSelector.select_move(&moves, &mut rng),
            Some(moves[1].pos)
        );
    }

    #[test]
    fn basic_is_reproducible_for_a_seed_and_stays_in_set() {
        let moves = [cand(2, 3, 1), cand(3, 2, 1), cand(4, 5, 1), cand(5, 4, 1)];
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..16 {
            let left = BasicSelector.select_move(&moves, &mut a).unwrap();
            let right = BasicSelector.select_move(&moves, &mut b).unwrap();
            assert_eq!(left, right);
            assert!(moves.iter().any(|c| c.pos == left));
        }
    }
}
