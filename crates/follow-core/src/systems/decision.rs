//! Follow Decision
//!
//! Decides, for one pair of personas `(a, b)`, whether `b` follows `a` and
//! whether `a` follows `b`.
//!
//! Each direction is its own pass: compute a likelihood for the subject,
//! roll the dice once, and fire when the likelihood is strictly greater than
//! the roll. The first pass (subject `a`) yields [`FollowMarker::Inbound`]
//! (3), the second (subject `b`) yields [`FollowMarker::Outbound`] (1).
//! When both fire in one evaluation the pair is mutual and both markers
//! become [`FollowMarker::Mutual`] (2).
//!
//! Likelihood for a subject `s` against a counterpart:
//! - same faction: `s.prob_for_faction`, plus the increment when
//!   `lower < followers < upper`, minus the decrement when
//!   `followers < lower`. Affinity is never consulted.
//! - different factions: `s.prob_over_all * affinity(faction(s) -> faction(other))`,
//!   with the configured default for pairs missing from the table.

use thiserror::Error;

use social_records::FollowMarker;

use crate::components::{AffinityTable, Persona, PersonaIndex};
use crate::config::FollowConfig;
use crate::systems::dice::Dice;

/// Markers for one pair evaluation.
///
/// `x` belongs to the first persona ("a is followed by b"), `y` to the
/// second ("b is followed by a").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    pub x: FollowMarker,
    pub y: FollowMarker,
}

impl Decision {
    /// No edge in either direction.
    pub const NONE: Decision = Decision {
        x: FollowMarker::None,
        y: FollowMarker::None,
    };

    /// Combines the two pass results. Both passes firing is a mutual follow.
    pub fn from_passes(a_followed: bool, b_followed: bool) -> Self {
        match (a_followed, b_followed) {
            (true, true) => Decision {
                x: FollowMarker::Mutual,
                y: FollowMarker::Mutual,
            },
            (true, false) => Decision {
                x: FollowMarker::Inbound,
                y: FollowMarker::None,
            },
            (false, true) => Decision {
                x: FollowMarker::None,
                y: FollowMarker::Outbound,
            },
            (false, false) => Decision::NONE,
        }
    }

    /// The integer pair as written to the sheet.
    pub fn values(&self) -> (u8, u8) {
        (self.x.value(), self.y.value())
    }

    pub fn is_mutual(&self) -> bool {
        self.x == FollowMarker::Mutual && self.y == FollowMarker::Mutual
    }
}

/// Everything computed while evaluating one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairEvaluation {
    pub same_faction: bool,
    /// Affinity applied in the first pass (`1.0` within a faction)
    pub affinity_a: f64,
    /// Affinity applied in the second pass (`1.0` within a faction)
    pub affinity_b: f64,
    pub likelihood_a: f64,
    pub likelihood_b: f64,
    pub roll_a: f64,
    pub roll_b: f64,
    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    #[error("unknown persona: {0}")]
    UnknownPersona(String),
    #[error("likelihood for {handle} is not a finite number ({likelihood})")]
    NonFiniteLikelihood { handle: String, likelihood: f64 },
}

/// Reads the persona index, affinity table and tuning for a run.
#[derive(Debug, Clone, Copy)]
pub struct FollowDecider<'a> {
    personas: &'a PersonaIndex,
    affinities: &'a AffinityTable,
    config: &'a FollowConfig,
}

impl<'a> FollowDecider<'a> {
    pub fn new(
        personas: &'a PersonaIndex,
        affinities: &'a AffinityTable,
        config: &'a FollowConfig,
    ) -> Self {
        Self {
            personas,
            affinities,
            config,
        }
    }

    pub fn personas(&self) -> &'a PersonaIndex {
        self.personas
    }

    /// Affinity the subject brings towards the counterpart's faction.
    pub fn affinity(&self, subject: &Persona, counterpart: &Persona) -> f64 {
        if subject.same_faction(counterpart) {
            return 1.0;
        }
        self.affinities.affinity_or_default(
            &subject.faction,
            &counterpart.faction,
            self.config.default_affinity,
        )
    }

    /// Likelihood that the subject gains the counterpart as a follower.
    pub fn likelihood(&self, subject: &Persona, counterpart: &Persona) -> f64 {
        if subject.same_faction(counterpart) {
            let config = self.config;
            let mut likelihood = subject.prob_for_faction;
            if subject.followers > config.lower_follower_threshold
                && subject.followers < config.upper_follower_threshold
            {
                likelihood += config.likelihood_increment;
            }
            if subject.followers < config.lower_follower_threshold {
                likelihood -= config.likelihood_decrement;
            }
            likelihood
        } else {
            subject.prob_over_all * self.affinity(subject, counterpart)
        }
    }

    /// Evaluates the pair, returning every intermediate value.
    ///
    /// Takes exactly two rolls when both personas are known and both
    /// likelihoods are finite, and none otherwise.
    pub fn evaluate(
        &self,
        a: &str,
        b: &str,
        dice: &mut impl Dice,
    ) -> Result<PairEvaluation, DecisionError> {
        let persona_a = self
            .personas
            .get(a)
            .ok_or_else(|| DecisionError::UnknownPersona(a.to_string()))?;
        let persona_b = self
            .personas
            .get(b)
            .ok_or_else(|| DecisionError::UnknownPersona(b.to_string()))?;

        let likelihood_a = finite(persona_a, self.likelihood(persona_a, persona_b))?;
        let likelihood_b = finite(persona_b, self.likelihood(persona_b, persona_a))?;

        // First pass: is a followed by b?
        let roll_a = dice.roll();
        // Second pass: is b followed by a?
        let roll_b = dice.roll();

        Ok(PairEvaluation {
            same_faction: persona_a.same_faction(persona_b),
            affinity_a: self.affinity(persona_a, persona_b),
            affinity_b: self.affinity(persona_b, persona_a),
            likelihood_a,
            likelihood_b,
            roll_a,
            roll_b,
            decision: Decision::from_passes(likelihood_a > roll_a, likelihood_b > roll_b),
        })
    }

    /// Decides the pair, degrading every failure to [`Decision::NONE`].
    pub fn decide(&self, a: &str, b: &str, dice: &mut impl Dice) -> Decision {
        match self.evaluate(a, b, dice) {
            Ok(evaluation) => evaluation.decision,
            Err(DecisionError::UnknownPersona(handle)) => {
                tracing::debug!("No persona row for {}, no edges for ({}, {})", handle, a, b);
                Decision::NONE
            }
            Err(e) => {
                tracing::warn!("Skipping pair ({}, {}): {}", a, b, e);
                Decision::NONE
            }
        }
    }
}

fn finite(persona: &Persona, likelihood: f64) -> Result<f64, DecisionError> {
    if likelihood.is_finite() {
        Ok(likelihood)
    } else {
        Err(DecisionError::NonFiniteLikelihood {
            handle: persona.handle.clone(),
            likelihood,
        })
    }
}
