use thiserror::Error;

/// Errors returned when constructing geometry from caller-supplied parts.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// A path needs at least one segment.
    #[error("a path needs at least one segment")]
    EmptyPath,
    /// Segment `index` does not start where segment `index - 1` ends.
    #[error("segment {index} starts {gap} away from the end of the previous segment")]
    Discontinuous {
        /// Index of the first segment that breaks the chain.
        index: usize,
        /// Distance between the previous end point and this start point.
        gap: f64,
    },
}
