use thiserror::Error;

/// Failures surfaced by [`AvlSet`](crate::AvlSet) and its cursors.
///
/// Duplicate inserts and erasing a missing value are not errors; those
/// operations report through their `bool` result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `front()` / `back()` on an empty set.
    #[error("UNDERFLOW")]
    Underflow,
    /// Reading the value under a cursor parked on a sentinel.
    #[error("SENTINEL_ACCESS")]
    SentinelAccess,
    /// A detached [`Position`](crate::Position) whose node has been erased
    /// or whose set has been cleared since it was taken.
    #[error("STALE_POSITION")]
    StalePosition,
}

pub type Result<T> = std::result::Result<T, Error>;
