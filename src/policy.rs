//! Move selection policies.
//!
//! The engine only enumerates legal moves; choosing one is up to a policy
//! plugged in by the controller. The computer opponent uses
//! [`RandomPolicy`]. Any closure over the legal-move list is also a policy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Player};

/// Chooses a pocket from the legal moves of `player`.
///
/// Returning `None` declines to move. Returning a pocket not in `legal` is a
/// policy bug and is rejected by [`crate::game::Game::play_policy`].
pub trait MovePolicy {
    fn choose(&mut self, board: &Board, player: Player, legal: &[usize]) -> Option<usize>;
}

impl<F> MovePolicy for F
where
    F: FnMut(&[usize]) -> Option<usize>,
{
    fn choose(&mut self, _board: &Board, _player: Player, legal: &[usize]) -> Option<usize> {
        self(legal)
    }
}

/// Uniformly random choice among the legal moves.
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    /// Creates a policy with a fixed seed, or from entropy when `seed` is 0.
    pub fn new(seed: u64) -> Self {
        let rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        RandomPolicy { rng }
    }
}

impl MovePolicy for RandomPolicy {
    fn choose(&mut self, _board: &Board, _player: Player, legal: &[usize]) -> Option<usize> {
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.gen_range(0..legal.len())])
    }
}
