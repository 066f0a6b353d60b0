//! Root move selection policies
//!
//! The searcher ranks fully searched root moves; a policy picks one. The
//! default policy always takes the top move. Difficulty levels trade
//! strength for variety by sampling near the top with a seeded RNG, so the
//! search itself stays deterministic and testable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Pos;
use crate::config::Difficulty;

/// A root move with its searched score, from the mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootMove {
    pub pos: Pos,
    pub score: i32,
}

/// Chooses among root moves ranked best-first.
pub trait SelectionPolicy: Send {
    /// Pick a move from `ranked` (sorted by descending score, ties in
    /// ordering order). Returns `None` only for an empty list.
    fn select(&mut self, ranked: &[RootMove]) -> Option<Pos>;
}

/// Always plays the top-ranked move.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestMove;

impl SelectionPolicy for BestMove {
    fn select(&mut self, ranked: &[RootMove]) -> Option<Pos> {
        ranked.first().map(|m| m.pos)
    }
}

/// Samples near the top of the ranking according to a difficulty level.
///
/// - Easy: uniform over the top half
/// - Medium: the best move 70% of the time, else uniform over the top 3
/// - Hard: the best move 90% of the time, else the second best
#[derive(Debug, Clone)]
pub struct DifficultyPolicy {
    difficulty: Difficulty,
    rng: StdRng,
}

impl DifficultyPolicy {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        match self.difficulty {
            Difficulty::Easy => self.rng.gen_range(0..=len / 2),
            Difficulty::Medium => {
                if self.rng.gen_bool(0.7) {
                    0
                } else {
                    self.rng.gen_range(0..len.min(3))
                }
            }
            Difficulty::Hard => {
                if self.rng.gen_bool(0.9) {
                    0
                } else {
                    1
                }
            }
        }
    }
}

impl SelectionPolicy for DifficultyPolicy {
    fn select(&mut self, ranked: &[RootMove]) -> Option<Pos> {
        if ranked.is_empty() {
            return None;
        }
        let idx = self.pick_index(ranked.len());
        ranked.get(idx).map(|m| m.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(n: u8) -> Vec<RootMove> {
        (0..n)
            .map(|i| RootMove {
                pos: Pos::new(0, i),
                score: 100 - i32::from(i),
            })
            .collect()
    }

    #[test]
    fn test_best_move_takes_first() {
        let list = ranked(5);
        assert_eq!(BestMove.select(&list), Some(Pos::new(0, 0)));
        assert_eq!(BestMove.select(&[]), None);
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let list = ranked(1);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut policy = DifficultyPolicy::new(difficulty, 7);
            assert_eq!(policy.select(&list), Some(Pos::new(0, 0)));
        }
    }

    #[test]
    fn test_easy_stays_in_top_half() {
        let list = ranked(10);
        let mut policy = DifficultyPolicy::new(Difficulty::Easy, 42);
        for _ in 0..200 {
            let pos = policy.select(&list).unwrap();
            assert!(pos.col <= 5, "easy picked rank {}", pos.col);
        }
    }

    #[test]
    fn test_medium_stays_in_top_three() {
        let list = ranked(10);
        let mut policy = DifficultyPolicy::new(Difficulty::Medium, 42);
        for _ in 0..200 {
            assert!(policy.select(&list).unwrap().col < 3);
        }
    }

    #[test]
    fn test_hard_mostly_best() {
        let list = ranked(10);
        let mut policy = DifficultyPolicy::new(Difficulty::Hard, 42);
        let mut best = 0;
        for _ in 0..1000 {
            let pos = policy.select(&list).unwrap();
            assert!(pos.col < 2);
            if pos.col == 0 {
                best += 1;
            }
        }
        assert!(best > 800, "hard chose the best move only {best}/1000 times");
    }

    #[test]
    fn test_same_seed_same_choices() {
        let list = ranked(8);
        let mut a = DifficultyPolicy::new(Difficulty::Easy, 99);
        let mut b = DifficultyPolicy::new(Difficulty::Easy, 99);
        for _ in 0..50 {
            assert_eq!(a.select(&list), b.select(&list));
        }
    }
}
