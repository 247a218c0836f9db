//! Shared record types for the follow graph simulator.
//!
//! This crate contains pure data structures with no simulation logic:
//! the rows read from the persona, affinity and roster tables, the graph
//! handed to a renderer, the decision cells handed to a sheet writer, and
//! the run report. It is a dependency for all other crates in the workspace.

pub mod cells;
pub mod graph;
pub mod marker;
pub mod record;
pub mod report;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use cells::{column_letters, AddressedCell, CellLayout, CellSheet, FollowCell};
pub use graph::{DirectedEdge, GraphExport, GraphNode};
pub use marker::{FollowMarker, InvalidMarker};
pub use record::{
    AffinityRecord, AffinityValue, FollowerCount, PersonaRecord, RosterEntry, RosterRow,
};
pub use report::{FactionFlow, RunReport, RunSummary, SkippedPair};
