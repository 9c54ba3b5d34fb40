//! Dynamic-rank strided view over a shared buffer.

use num_traits::Zero;

use crate::buffer::Buffer;
use crate::iter::{AxisIter, CoordIter};
use crate::{Result, ViewError};

/// Compute row-major strides (last index varies fastest).
pub fn row_major_strides(extents: &[usize]) -> Vec<usize> {
    let rank = extents.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1usize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * extents[i + 1];
    }
    strides
}

/// Dynamic-rank strided view over a shared [`Buffer`].
///
/// A view is `(extents, strides, offset)` metadata plus a buffer handle:
/// the element at coordinate tuple `c` lives at storage position
/// `offset + Σ strides[k]·c[k]`. Every transformation ([`slicing`],
/// [`windowing`], [`flattening`]) returns a new view aliasing the same
/// buffer; only [`copy`] allocates fresh storage.
///
/// Extents are strictly positive; a zero extent is rejected at
/// construction. Rank 0 is permitted and denotes a single element at
/// `offset` with no coordinates.
///
/// Views are value-like and cheap to clone (metadata plus one shared
/// buffer handle). Because the buffer is shared, [`set`] takes `&self`:
/// a write is visible through every aliasing view.
///
/// [`slicing`]: View::slicing
/// [`windowing`]: View::windowing
/// [`flattening`]: View::flattening
/// [`copy`]: View::copy
/// [`set`]: View::set
pub struct View<T> {
    buffer: Buffer<T>,
    extents: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
}

impl<T> Clone for View<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            extents: self.extents.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for View<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("extents", &self.extents)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .finish()
    }
}

fn validate_extents(extents: &[usize]) -> Result<()> {
    for (axis, &e) in extents.iter().enumerate() {
        if e == 0 {
            return Err(ViewError::ZeroExtent { axis });
        }
    }
    Ok(())
}

impl<T> View<T> {
    fn from_parts(
        buffer: Buffer<T>,
        extents: Vec<usize>,
        strides: Vec<usize>,
        offset: usize,
    ) -> Self {
        debug_assert_eq!(extents.len(), strides.len());
        Self {
            buffer,
            extents,
            strides,
            offset,
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of addressable elements, `Π extents[k]` (1 for rank 0).
    #[inline]
    pub fn len(&self) -> usize {
        self.extents.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false // extents are strictly positive by construction
    }

    /// True iff both views read and write the same storage.
    pub fn aliases(&self, other: &View<T>) -> bool {
        Buffer::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Map a coordinate tuple to its storage position, validating rank and
    /// per-axis bounds first.
    pub fn position(&self, coords: &[usize]) -> Result<usize> {
        self.check_coords(coords)?;
        Ok(self.position_unchecked(coords))
    }

    /// Stride formula without validation; callers must pass a tuple that
    /// already satisfies the coordinate invariant.
    #[inline]
    pub(crate) fn position_unchecked(&self, coords: &[usize]) -> usize {
        let mut position = self.offset;
        for (k, &c) in coords.iter().enumerate() {
            position += self.strides[k] * c;
        }
        position
    }

    fn check_coords(&self, coords: &[usize]) -> Result<()> {
        if coords.len() != self.rank() {
            return Err(ViewError::RankMismatch {
                expected: self.rank(),
                found: coords.len(),
            });
        }
        for (axis, (&c, &e)) in coords.iter().zip(self.extents.iter()).enumerate() {
            if c >= e {
                return Err(ViewError::IndexOutOfRange {
                    axis,
                    index: c,
                    extent: e,
                });
            }
        }
        Ok(())
    }

    fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.rank() {
            return Err(ViewError::AxisOutOfRange {
                axis,
                rank: self.rank(),
            });
        }
        Ok(())
    }

    fn check_axis_value(&self, axis: usize, value: usize) -> Result<()> {
        self.check_axis(axis)?;
        if value >= self.extents[axis] {
            return Err(ViewError::IndexOutOfRange {
                axis,
                index: value,
                extent: self.extents[axis],
            });
        }
        Ok(())
    }

    /// Fix `axis` to `value`: a rank−1 view aliasing the same buffer.
    ///
    /// The fixed axis is removed from extents and strides and its
    /// contribution folded into the offset. Slicing a rank-1 view yields
    /// the degenerate rank-0 single-element view.
    pub fn slicing(&self, axis: usize, value: usize) -> Result<View<T>> {
        self.check_axis_value(axis, value)?;
        let offset = self.offset + value * self.strides[axis];
        let mut extents = self.extents.clone();
        let mut strides = self.strides.clone();
        extents.remove(axis);
        strides.remove(axis);
        Ok(View::from_parts(self.buffer.clone(), extents, strides, offset))
    }

    /// Apply several slices given against the *original* axis numbering.
    ///
    /// Each slice drops one axis, so the remaining requested axes greater
    /// than the one just sliced shift down by one before being applied.
    pub fn slicing_many(&self, fixes: &[(usize, usize)]) -> Result<View<T>> {
        let mut fixes = fixes.to_vec();
        let mut view = self.clone();
        for i in 0..fixes.len() {
            let (axis, value) = fixes[i];
            view = view.slicing(axis, value)?;
            for later in fixes.iter_mut().skip(i + 1) {
                if later.0 > axis {
                    later.0 -= 1;
                }
            }
        }
        Ok(view)
    }

    /// Restrict `axis` to the inclusive range `[min, max]`, preserving
    /// rank, stride, and aliasing.
    pub fn windowing(&self, axis: usize, min: usize, max: usize) -> Result<View<T>> {
        self.check_axis_value(axis, min)?;
        self.check_axis_value(axis, max)?;
        if min > max {
            return Err(ViewError::InvalidWindow { axis, min, max });
        }
        let offset = self.offset + min * self.strides[axis];
        let mut extents = self.extents.clone();
        extents[axis] = max - min + 1;
        Ok(View::from_parts(
            self.buffer.clone(),
            extents,
            self.strides.clone(),
            offset,
        ))
    }

    /// Apply several windows. Rank is preserved, so axis numbers are not
    /// re-indexed between applications.
    pub fn windowing_many(&self, windows: &[(usize, usize, usize)]) -> Result<View<T>> {
        let mut view = self.clone();
        for &(axis, min, max) in windows {
            view = view.windowing(axis, min, max)?;
        }
        Ok(view)
    }

    /// Merge `axis` into `axis + 1`: the merged axis gets extent
    /// `extents[axis] · extents[axis+1]` and the stride of `axis + 1`.
    ///
    /// The reinterpretation is only index-correct when the two axes are
    /// storage-contiguous in that order, i.e.
    /// `strides[axis] == strides[axis+1] · extents[axis+1]`; otherwise
    /// [`ViewError::NotContiguous`] is returned. Windowing an axis breaks
    /// this property for the axis before it.
    pub fn flattening(&self, axis: usize) -> Result<View<T>> {
        self.check_axis(axis)?;
        if axis + 1 >= self.rank() {
            return Err(ViewError::AxisOutOfRange {
                axis: axis + 1,
                rank: self.rank(),
            });
        }
        if self.strides[axis] != self.strides[axis + 1] * self.extents[axis + 1] {
            return Err(ViewError::NotContiguous { axis });
        }
        let mut extents = self.extents.clone();
        let mut strides = self.strides.clone();
        extents[axis + 1] *= extents[axis];
        extents.remove(axis);
        strides.remove(axis);
        Ok(View::from_parts(
            self.buffer.clone(),
            extents,
            strides,
            self.offset,
        ))
    }

    /// Merge all axes in `[min, max]` into one by repeated single merges.
    /// `min == max` names a single axis and leaves the view unchanged.
    pub fn flattening_range(&self, min: usize, max: usize) -> Result<View<T>> {
        if min > max {
            return Err(ViewError::InvalidRange { min, max });
        }
        if max >= self.rank() {
            return Err(ViewError::AxisOutOfRange {
                axis: max,
                rank: self.rank(),
            });
        }
        let mut view = self.clone();
        for _ in min..max {
            view = view.flattening(min)?;
        }
        Ok(view)
    }

    /// Iterator over every coordinate tuple of this view, row-major.
    pub fn coords(&self) -> CoordIter {
        CoordIter::new(&self.extents)
    }

    /// Coordinate iterator along `axis` with all other axes pinned to
    /// `fixed` (length `rank − 1`, validated against the extents).
    pub fn axis_coords(&self, axis: usize, fixed: &[usize]) -> Result<AxisIter> {
        self.check_axis(axis)?;
        if fixed.len() + 1 != self.rank() {
            return Err(ViewError::RankMismatch {
                expected: self.rank() - 1,
                found: fixed.len(),
            });
        }
        let mut coords = fixed.to_vec();
        coords.insert(axis, 0);
        for (a, (&c, &e)) in coords.iter().zip(self.extents.iter()).enumerate() {
            if a != axis && c >= e {
                return Err(ViewError::IndexOutOfRange {
                    axis: a,
                    index: c,
                    extent: e,
                });
            }
        }
        Ok(AxisIter::new(coords, axis, self.extents[axis]))
    }
}

impl<T: Copy> View<T> {
    /// Read the element at `coords` (length must equal the rank, each
    /// coordinate within its extent).
    pub fn get(&self, coords: &[usize]) -> Result<T> {
        Ok(self.buffer.get(self.position(coords)?))
    }

    /// Write the element at `coords`, fully validating before touching
    /// storage. The write is visible through every aliasing view.
    pub fn set(&self, value: T, coords: &[usize]) -> Result<()> {
        let position = self.position(coords)?;
        self.buffer.set(position, value);
        Ok(())
    }

    /// Iterate element values in row-major coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.coords()
            .map(move |c| self.buffer.get(self.position_unchecked(&c)))
    }

    /// Iterate element values along one axis, the others pinned to
    /// `fixed`.
    pub fn iter_axis(&self, axis: usize, fixed: &[usize]) -> Result<impl Iterator<Item = T> + '_> {
        let coords = self.axis_coords(axis, fixed)?;
        Ok(coords.map(move |c| self.buffer.get(self.position_unchecked(&c))))
    }

    /// Overwrite every element from `values`, consumed in row-major
    /// coordinate order.
    ///
    /// The sequence must yield exactly [`len`](View::len) values; on a
    /// count mismatch nothing is written.
    pub fn load(&self, values: impl IntoIterator<Item = T>) -> Result<()> {
        let values: Vec<T> = values.into_iter().collect();
        if values.len() != self.len() {
            return Err(ViewError::LengthMismatch {
                expected: self.len(),
                found: values.len(),
            });
        }
        for (c, value) in self.coords().zip(values) {
            let position = self.position_unchecked(&c);
            self.buffer.set(position, value);
        }
        Ok(())
    }

    /// Overwrite every element with `f(coords)`, visiting coordinates in
    /// row-major order.
    pub fn fill_with(&self, mut f: impl FnMut(&[usize]) -> T) {
        for c in self.coords() {
            let position = self.position_unchecked(&c);
            self.buffer.set(position, f(&c));
        }
    }

    /// Deep copy: a fresh contiguous buffer with row-major strides holding
    /// this view's elements in iteration order. The result never aliases
    /// the source.
    pub fn copy(&self) -> View<T> {
        let values: Vec<T> = self.iter().collect();
        let strides = row_major_strides(&self.extents);
        View::from_parts(Buffer::from_vec(values), self.extents.clone(), strides, 0)
    }

    /// Build a view with values produced by `f`, called in row-major
    /// coordinate order.
    pub fn from_fn(extents: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Result<View<T>> {
        validate_extents(extents)?;
        let strides = row_major_strides(extents);
        let mut values = Vec::with_capacity(extents.iter().product());
        for c in CoordIter::new(extents) {
            values.push(f(&c));
        }
        Ok(View::from_parts(
            Buffer::from_vec(values),
            extents.to_vec(),
            strides,
            0,
        ))
    }
}

impl<T: Copy + Zero> View<T> {
    /// Allocate a fresh zero-filled view with row-major strides.
    pub fn zeros(extents: &[usize]) -> Result<View<T>> {
        validate_extents(extents)?;
        let strides = row_major_strides(extents);
        let buffer = Buffer::zeros(extents.iter().product());
        Ok(View::from_parts(buffer, extents.to_vec(), strides, 0))
    }

    /// Rank-0 view holding a single zero element.
    pub fn scalar() -> View<T> {
        View::from_parts(Buffer::zeros(1), vec![], vec![], 0)
    }
}
