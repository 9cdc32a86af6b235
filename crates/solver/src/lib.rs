//! Solvability search over character placements.
//!
//! The solver enumerates character subsets in increasing size, places each
//! subset on every injective assignment of valid tiles, and replays the turn
//! engine headlessly on a fresh state per candidate. The first size that
//! yields a victory is the minimum; with `find_fastest` the rest of that size
//! is scanned for the quickest win.
//!
//! Modules are organized by responsibility:
//! - [`combinatorics`] lazy, restartable candidate enumeration
//! - [`simulate`] one candidate from placement to terminal status
//! - [`search`] the shared search loop and its sync/async drivers
//! - [`validate`] cheap structural checks that need no simulation
pub mod cancel;
pub mod combinatorics;
pub mod error;
pub mod options;
pub mod result;
pub mod search;
pub mod simulate;
pub mod validate;

pub use cancel::{CancelHandle, CancellationToken, cancellation};
pub use combinatorics::{Arrangements, Combinations, PlacementCandidates};
pub use error::SolverError;
pub use options::SolverOptions;
pub use result::{CharacterPlacement, PlacementSolution, SolverResult};
pub use search::{solve_puzzle, solve_puzzle_async};
pub use simulate::{SimulationOutcome, simulate_placement};
pub use validate::{ValidationIssue, ValidationReport, quick_validate};
