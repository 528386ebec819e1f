use std::fmt;

/// Errors reported when a [`Position`] or a cursor move cannot be honored.
///
/// [`Position`]: crate::Position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionError {
    /// The position does not refer to a live node of this list: it was
    /// produced by another list, or its node has been removed.
    Foreign,

    /// The position refers to the ghost node, which holds no element.
    Ghost,

    /// The move would pass through the ghost node.
    Boundary,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::Foreign => f.write_str("position does not belong to this list"),
            PositionError::Ghost => f.write_str("position is the ghost node"),
            PositionError::Boundary => f.write_str("move across the ghost boundary"),
        }
    }
}

impl std::error::Error for PositionError {}
