//! Follow Systems
//!
//! The dice, the per-pair follow decision, and the pairwise run.

pub mod decision;
pub mod dice;
pub mod pairing;

pub use decision::{Decision, DecisionError, FollowDecider, PairEvaluation};
pub use dice::{Dice, FollowRng, ScriptedDice, DICE_FACES};
pub use pairing::{PairwiseRun, RunOutcome};
