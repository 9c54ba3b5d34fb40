//! Shared element storage.

use std::cell::RefCell;
use std::rc::Rc;

use num_traits::Zero;

/// Contiguous element storage shared by every view derived from one root
/// view.
///
/// Aliasing is explicit and intentional: there is no copy-on-write, so a
/// write through one view is visible through all views holding the same
/// buffer. The handle is `Rc`-counted and carries interior mutability; the
/// whole library is single-threaded, so the type is neither `Send` nor
/// `Sync`. The buffer is released when the last referencing view is
/// dropped.
pub struct Buffer<T> {
    cells: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .finish()
    }
}

impl<T> Buffer<T> {
    /// Wrap an existing vector of elements.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            cells: Rc::new(RefCell::new(values)),
        }
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True iff both handles refer to the same storage, i.e. views over
    /// them alias.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.cells, &b.cells)
    }
}

impl<T: Zero> Buffer<T> {
    /// Allocate `len` zero-initialized elements.
    pub fn zeros(len: usize) -> Self {
        let values = (0..len).map(|_| T::zero()).collect();
        Self::from_vec(values)
    }
}

impl<T: Copy> Buffer<T> {
    /// Read the element at `position`.
    ///
    /// Positions come from a view's stride formula and are guaranteed in
    /// range by view construction; panics on a position past the end.
    pub fn get(&self, position: usize) -> T {
        self.cells.borrow()[position]
    }

    /// Write the element at `position`.
    pub fn set(&self, position: usize, value: T) {
        self.cells.borrow_mut()[position] = value;
    }
}
