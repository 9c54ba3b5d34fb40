/// Errors raised by view construction, element access, and the
/// rank/range-changing transformations.
///
/// All errors are synchronous: they are returned by the call that violates
/// the contract, and no storage is touched on a failed access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A requested extent was zero at construction time.
    #[error("extent of axis {axis} must be strictly positive")]
    ZeroExtent { axis: usize },

    /// The number of supplied coordinates (or fixed values) does not match
    /// the view's rank.
    #[error("rank mismatch: expected {expected} coordinates, found {found}")]
    RankMismatch { expected: usize, found: usize },

    /// A coordinate lies outside its axis extent.
    #[error("index {index} out of range for axis {axis} with extent {extent}")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// A bulk value sequence does not match the view's element count.
    #[error("length mismatch: {found} values for a view of {expected} elements")]
    LengthMismatch { expected: usize, found: usize },

    /// An axis argument exceeds the view's rank.
    #[error("axis {axis} out of range for rank {rank}")]
    AxisOutOfRange { axis: usize, rank: usize },

    /// Windowing was requested with `min > max`.
    #[error("invalid window [{min}, {max}] on axis {axis}")]
    InvalidWindow { axis: usize, min: usize, max: usize },

    /// A reversed axis range was passed to a range operation.
    #[error("invalid axis range [{min}, {max}]")]
    InvalidRange { min: usize, max: usize },

    /// Flattening would merge axes that are not storage-contiguous, which
    /// cannot be expressed by dropping a stride.
    #[error("axis {axis} is not storage-contiguous with its successor and cannot be merged")]
    NotContiguous { axis: usize },
}

/// Convenience alias for `Result<T, ViewError>`.
pub type Result<T> = std::result::Result<T, ViewError>;
