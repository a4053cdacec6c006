//! Highlighted route segment.

/// A highlighted stretch of the route, by maneuver shape indices.
///
/// Both indices are `-1` when nothing is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSegment {
    pub start_index: i64,
    pub end_index: i64,
}

impl HighlightSegment {
    /// Nothing highlighted.
    pub const NONE: HighlightSegment = HighlightSegment {
        start_index: -1,
        end_index: -1,
    };

    /// Create a segment.
    pub const fn new(start_index: i64, end_index: i64) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// Returns true if nothing is highlighted.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// The highlight after the user asks to highlight `requested`.
    ///
    /// Asking for the segment that is already highlighted clears it.
    pub fn toggled(self, requested: HighlightSegment) -> Self {
        if self == requested {
            Self::NONE
        } else {
            requested
        }
    }
}

impl Default for HighlightSegment {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_segment_twice_clears() {
        let seg = HighlightSegment::NONE.toggled(HighlightSegment::new(0, 3));
        assert_eq!(seg, HighlightSegment::new(0, 3));
        assert_eq!(seg.toggled(HighlightSegment::new(0, 3)), HighlightSegment::NONE);
    }

    #[test]
    fn different_segment_replaces() {
        let seg = HighlightSegment::NONE
            .toggled(HighlightSegment::new(0, 3))
            .toggled(HighlightSegment::new(1, 2));
        assert_eq!(seg, HighlightSegment::new(1, 2));
    }

    #[test]
    fn default_is_none() {
        assert!(HighlightSegment::default().is_none());
        assert_eq!(HighlightSegment::NONE.start_index, -1);
        assert_eq!(HighlightSegment::NONE.end_index, -1);
    }
}
