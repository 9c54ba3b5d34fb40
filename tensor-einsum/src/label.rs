//! Axis labels: a name bound to one or more axis positions of a view.

use crate::{EinsumError, Result};

/// Bounds required of a label name: cloneable, orderable, and printable in
/// diagnostics. Blanket-implemented; `char`, `&str`, `String`, and integer
/// keys all qualify.
pub trait AxisName: Clone + Ord + std::fmt::Debug {}

impl<K: Clone + Ord + std::fmt::Debug> AxisName for K {}

/// A name bound to one or more axes of a labeled tensor.
///
/// `size` equals the extent of every axis in `positions`. More than one
/// position means the owning tensor requests diagonal/trace semantics over
/// those axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<K> {
    pub name: K,
    pub size: usize,
    pub positions: Vec<usize>,
}

impl<K: AxisName> Label<K> {
    pub fn new(name: K, size: usize, position: usize) -> Self {
        Self {
            name,
            size,
            positions: vec![position],
        }
    }
}

/// First-match linear search for `name` in a label list.
pub fn find_label<K: AxisName>(name: &K, labels: &[Label<K>]) -> Option<usize> {
    labels.iter().position(|l| l.name == *name)
}

/// The sizes of a label list, in order.
pub fn label_sizes<K>(labels: &[Label<K>]) -> Vec<usize> {
    labels.iter().map(|l| l.size).collect()
}

/// Build a label list from an ordered name sequence, one name per axis.
///
/// Names are scanned left to right; a name seen before appends the current
/// axis to the existing label's positions (its extent must match the
/// label's size), a fresh name opens a new label sized by the axis extent.
pub fn labels_from_names<K: AxisName>(extents: &[usize], names: &[K]) -> Result<Vec<Label<K>>> {
    if names.len() != extents.len() {
        return Err(EinsumError::LabelCountMismatch {
            rank: extents.len(),
            found: names.len(),
        });
    }
    let mut labels: Vec<Label<K>> = Vec::new();
    for (axis, name) in names.iter().enumerate() {
        match find_label(name, &labels) {
            Some(i) => {
                if labels[i].size != extents[axis] {
                    return Err(EinsumError::SizeMismatch {
                        label: format!("{:?}", name),
                        expected: labels[i].size,
                        found: extents[axis],
                    });
                }
                labels[i].positions.push(axis);
            }
            None => labels.push(Label::new(name.clone(), extents[axis], axis)),
        }
    }
    Ok(labels)
}
