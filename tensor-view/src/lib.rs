//! Dense strided N-dimensional views over a shared element buffer.
//!
//! This crate provides the data-layout half of the tensor library:
//!
//! - [`Buffer`]: contiguous element storage, reference-counted and shared by
//!   every view derived from it
//! - [`View`]: a (rank, extents, strides, offset) description of how to read
//!   the buffer as an N-dimensional array, with zero-copy slicing,
//!   windowing and axis-merging
//! - [`CoordIter`] / [`AxisIter`]: row-major coordinate enumeration, full
//!   and single-axis
//!
//! All rank- or range-changing operations return *new* views aliasing the
//! same buffer; mutation through one view is visible through all of them.
//! The library is single-threaded by design: buffers are `Rc`-shared and
//! the types are deliberately neither `Send` nor `Sync`.
//!
//! # Quick start
//!
//! ```
//! use tensor_view::View;
//!
//! let v = View::<i64>::from_fn(&[2, 3], |c| (c[0] * 3 + c[1] + 1) as i64)?;
//! let row = v.slicing(0, 1)?;
//! assert_eq!(row.iter().collect::<Vec<_>>(), vec![4, 5, 6]);
//! # Ok::<(), tensor_view::ViewError>(())
//! ```

pub mod buffer;
pub mod error;
pub mod iter;
pub mod view;

pub use buffer::Buffer;
pub use error::{Result, ViewError};
pub use iter::{AxisIter, CoordIter};
pub use view::{row_major_strides, View};
