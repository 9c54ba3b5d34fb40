/// Errors raised while labeling tensors or evaluating contraction
/// expressions.
///
/// Expression builders defer *evaluation*, not *validation semantics*:
/// label-consistency violations surface at `evaluate()`, when the label
/// union is computed, and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum EinsumError {
    /// An underlying view operation failed (coordinate access, allocation).
    #[error(transparent)]
    View(#[from] tensor_view::ViewError),

    /// The number of supplied axis names does not match the view's rank.
    #[error("label count mismatch: {found} names for rank {rank}")]
    LabelCountMismatch { rank: usize, found: usize },

    /// One name is bound to axes (or operands) of different extents.
    #[error("size mismatch for label {label}: {expected} vs {found}")]
    SizeMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    /// Addition operands whose post-union label sets are not identical.
    #[error("label {label} is not shared by every addition operand")]
    ShapeMismatch { label: String },

    /// A full contraction collapses every axis; the caller must name the
    /// synthesized output axis via `evaluate_traced`.
    #[error("full contraction produces a scalar; use evaluate_traced to name its output axis")]
    TraceLabelRequired,

    /// Invariant breach inside the evaluator.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias for `Result<T, EinsumError>`.
pub type Result<T> = std::result::Result<T, EinsumError>;
