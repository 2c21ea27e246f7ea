use grid_util::point::Point;
use thiserror::Error;

/// Reasons a [Grid](crate::Grid) cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size must be positive")]
    EmptyGrid,
    #[error("grid size {0} does not fit in i32 coordinates")]
    TooLarge(usize),
    #[error("start {0} lies outside the grid")]
    StartOutOfBounds(Point),
    #[error("end {0} lies outside the grid")]
    EndOutOfBounds(Point),
    #[error("start {0} is covered by an obstacle")]
    StartBlocked(Point),
    #[error("end {0} is covered by an obstacle")]
    EndBlocked(Point),
    #[error("start and end are both {0}")]
    StartIsEnd(Point),
}
