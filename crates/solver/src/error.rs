//! Non-definitive search outcomes.
//!
//! Neither variant means the puzzle is unsolvable; both mean the search
//! stopped before it could prove anything either way.
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("search limit reached after {limit} combinations")]
    SearchLimitReached { limit: u64 },

    #[error("search cancelled after {tested} combinations")]
    Cancelled { tested: u64 },
}
