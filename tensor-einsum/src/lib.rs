//! Label-based Einstein summation over shared strided tensor views.
//!
//! This crate is the contraction half of the tensor library. A
//! [`LabeledTensor`] binds a name to each axis of a [`tensor_view::View`];
//! `+` and `*` between labeled tensors build lazy [`SumExpr`] /
//! [`ProdExpr`] accumulators, and an explicit `evaluate()` call partitions
//! the label union into free and summed axes and runs the contraction:
//!
//! - a label occurring once across all operands stays a free output axis;
//! - a label occurring more than once (across operands, or twice within
//!   one operand) is summed over — contraction, trace, partial trace;
//! - addition requires every label to be shared by every operand and adds
//!   elementwise with axes aligned by name.
//!
//! # Quick start
//!
//! ```
//! use tensor_einsum::LabeledTensor;
//! use tensor_view::View;
//!
//! let x = View::<i64>::from_fn(&[2, 3], |c| (c[0] * 3 + c[1] + 1) as i64)?;
//! let y = View::<i64>::from_fn(&[3, 2], |c| (c[0] * 2 + c[1] + 1) as i64)?;
//! let x = LabeledTensor::new(x, &['n', 'm'])?;
//! let y = LabeledTensor::new(y, &['m', 'p'])?;
//! let matmul = (x * y).evaluate()?; // n,m × m,p -> n,p
//! assert_eq!(matmul.view().get(&[0, 0])?, 22);
//! # Ok::<(), tensor_einsum::EinsumError>(())
//! ```

pub mod error;
mod eval;
pub mod expr;
pub mod label;
pub mod labeled;

pub use error::{EinsumError, Result};
pub use expr::{ProdExpr, SumExpr};
pub use label::{find_label, label_sizes, labels_from_names, AxisName, Label};
pub use labeled::LabeledTensor;
