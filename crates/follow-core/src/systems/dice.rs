//! Dice
//!
//! Random draws for follow decisions. A roll is one of 100 evenly spaced
//! values in `[0, 1)`: `0.00, 0.01, ..., 0.99`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Number of faces on the follow dice
pub const DICE_FACES: u32 = 100;

/// Source of draws in `[0, 1)`.
pub trait Dice {
    fn roll(&mut self) -> f64;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }
}

/// Seeded dice for real runs.
#[derive(Debug, Clone)]
pub struct FollowRng {
    rng: SmallRng,
    seed: u64,
}

impl FollowRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Picks a fresh seed. The seed is kept so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for FollowRng {
    fn roll(&mut self) -> f64 {
        self.rng.gen_range(0..DICE_FACES) as f64 / DICE_FACES as f64
    }
}

/// Replays a fixed sequence of rolls, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(rolls: Vec<f64>) -> Self {
        Self { rolls, cursor: 0 }
    }

    /// Always rolls `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many rolls have been taken.
    pub fn rolls_taken(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_on_hundredths_grid() {
        let mut dice = FollowRng::seeded(42);
        for _ in 0..1000 {
            let roll = dice.roll();
            assert!((0.0..1.0).contains(&roll));
            let scaled = roll * DICE_FACES as f64;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = FollowRng::seeded(7);
        let mut b = FollowRng::seeded(7);
        let rolls_a: Vec<f64> = (0..50).map(|_| a.roll()).collect();
        let rolls_b: Vec<f64> = (0..50).map(|_| b.roll()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_entropy_seed_is_reported() {
        let dice = FollowRng::from_entropy();
        let mut replay = FollowRng::seeded(dice.seed());
        let mut original = dice.clone();
        assert_eq!(original.roll(), replay.roll());
    }

    #[test]
    fn test_scripted_dice_wraps() {
        let mut dice = ScriptedDice::new(vec![0.1, 0.9]);
        assert_eq!(dice.roll(), 0.1);
        assert_eq!(dice.roll(), 0.9);
        assert_eq!(dice.roll(), 0.1);
        assert_eq!(dice.rolls_taken(), 3);
    }

    #[test]
    fn test_dice_through_mut_ref() {
        fn take_two(mut dice: impl Dice) -> (f64, f64) {
            (dice.roll(), dice.roll())
        }
        let mut dice = ScriptedDice::new(vec![0.2, 0.3, 0.4]);
        assert_eq!(take_two(&mut dice), (0.2, 0.3));
        assert_eq!(dice.roll(), 0.4);
    }
}
