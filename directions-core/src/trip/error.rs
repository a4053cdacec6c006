//! Trip state error types.

/// Errors from waypoint store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Index does not name a waypoint
    #[error("waypoint index {index} out of range (trip has {len} waypoints)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "waypoint index 4 out of range (trip has 2 waypoints)"
        );
    }
}
