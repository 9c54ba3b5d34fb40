//! Row-major coordinate iteration.
//!
//! [`CoordIter`] enumerates every coordinate tuple of an extent list as a
//! row-major odometer: the last axis varies fastest and the carry
//! propagates toward axis 0. [`AxisIter`] pins every axis but one to a
//! fixed value and scans the remaining axis. Both yield coordinate tuples;
//! element iteration is layered on top by [`View::iter`] and
//! [`View::iter_axis`].
//!
//! [`View::iter`]: crate::View::iter
//! [`View::iter_axis`]: crate::View::iter_axis

/// Row-major iterator over all coordinate tuples of an extent list.
///
/// Yields `Π extents[k]` tuples. Rank 0 yields exactly one empty tuple
/// (the product over no axes), which keeps scalar views uniform with the
/// general case.
#[derive(Debug, Clone)]
pub struct CoordIter {
    extents: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl CoordIter {
    /// Start at the all-zero coordinate of `extents`.
    pub fn new(extents: &[usize]) -> Self {
        // Constructed views never carry a zero extent, but a raw extent
        // list passed here may; such a space is empty.
        let next = if extents.contains(&0) {
            None
        } else {
            Some(vec![0; extents.len()])
        };
        Self {
            extents: extents.to_vec(),
            next,
        }
    }
}

impl Iterator for CoordIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut following = current.clone();
        for axis in (0..self.extents.len()).rev() {
            following[axis] += 1;
            if following[axis] < self.extents[axis] {
                self.next = Some(following);
                break;
            }
            following[axis] = 0;
            // carry into the previous axis; falling off axis 0 exhausts
        }
        Some(current)
    }
}

/// Iterator over the coordinate tuples of one scanned axis, all other axes
/// held at fixed values.
///
/// Built by [`View::axis_coords`](crate::View::axis_coords), which
/// validates the fixed values against their extents.
#[derive(Debug, Clone)]
pub struct AxisIter {
    coords: Vec<usize>,
    axis: usize,
    extent: usize,
}

impl AxisIter {
    /// `coords` is the full starting tuple with `coords[axis] == 0`;
    /// `extent` is the extent of the scanned axis.
    pub(crate) fn new(coords: Vec<usize>, axis: usize, extent: usize) -> Self {
        Self {
            coords,
            axis,
            extent,
        }
    }
}

impl Iterator for AxisIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.coords[self.axis] >= self.extent {
            return None;
        }
        let current = self.coords.clone();
        self.coords[self.axis] += 1;
        Some(current)
    }
}
