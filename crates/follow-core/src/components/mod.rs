//! Lookup tables the follow decision reads from.

pub mod affinity;
pub mod persona;

pub use affinity::{affinity_template, distinct_factions, AffinityTable, FACTION_HEADER};
pub use persona::{Persona, PersonaIndex, RejectedRow};
