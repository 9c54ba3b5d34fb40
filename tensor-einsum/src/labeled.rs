//! A view plus its ordered label list: the unit the contraction engine
//! operates on.

use num_traits::{One, Zero};
use tensor_view::View;

use crate::eval::{contract_product, ProductOutput};
use crate::label::{find_label, labels_from_names, AxisName, Label};
use crate::{EinsumError, Result};

/// A [`View`] whose axes carry names.
///
/// Each distinct name owns one [`Label`] covering every axis bound to it,
/// so the position counts over all labels sum to the view's rank. A name
/// bound to more than one axis requests diagonal/trace semantics over
/// those axes, resolved on [`materialize`](LabeledTensor::materialize) or
/// inside a product evaluation.
#[derive(Debug, Clone)]
pub struct LabeledTensor<T, K> {
    view: View<T>,
    labels: Vec<Label<K>>,
}

impl<T, K: AxisName> LabeledTensor<T, K> {
    /// Bind `names` (one per axis, in axis order) to a view.
    pub fn new(view: View<T>, names: &[K]) -> Result<Self> {
        let labels = labels_from_names(view.extents(), names)?;
        Ok(Self { view, labels })
    }

    /// Labels already grouped per distinct name; used by the evaluator for
    /// its own outputs.
    pub(crate) fn from_parts(view: View<T>, labels: Vec<Label<K>>) -> Self {
        debug_assert_eq!(
            labels.iter().map(|l| l.positions.len()).sum::<usize>(),
            view.rank()
        );
        Self { view, labels }
    }

    #[inline]
    pub fn view(&self) -> &View<T> {
        &self.view
    }

    #[inline]
    pub fn labels(&self) -> &[Label<K>] {
        &self.labels
    }

    /// True iff some name is bound to more than one axis (a requested
    /// diagonal/trace).
    pub fn has_repeated_axes(&self) -> bool {
        self.labels.iter().any(|l| l.positions.len() > 1)
    }

    /// Route a coordinate of the (common, unique) label spaces to this
    /// tensor's own axes: each label takes its space coordinate on every
    /// axis position bound to its name.
    pub(crate) fn map_coords(
        &self,
        common: &[Label<K>],
        common_coords: &[usize],
        unique: &[Label<K>],
        unique_coords: &[usize],
    ) -> Result<Vec<usize>> {
        let mut coords = vec![0usize; self.view.rank()];
        for l in &self.labels {
            let value = if let Some(i) = find_label(&l.name, common) {
                common_coords[i]
            } else if let Some(i) = find_label(&l.name, unique) {
                unique_coords[i]
            } else {
                return Err(EinsumError::Internal(format!(
                    "label {:?} missing from both coordinate spaces",
                    l.name
                )));
            };
            for &p in &l.positions {
                coords[p] = value;
            }
        }
        Ok(coords)
    }
}

impl<T: Copy + Zero + One, K: AxisName> LabeledTensor<T, K> {
    /// Materialize into a concrete view.
    ///
    /// Without repeated names this is the wrapped view itself (still
    /// aliasing its buffer). A repeated name triggers the implied
    /// single-operand contraction: partial trace when free axes survive,
    /// otherwise a full trace yielding a rank-1, extent-1 view.
    pub fn materialize(&self) -> Result<View<T>> {
        if !self.has_repeated_axes() {
            return Ok(self.view.clone());
        }
        match contract_product(std::slice::from_ref(self))? {
            ProductOutput::Free(view, _) => Ok(view),
            ProductOutput::Scalar(view) => Ok(view),
        }
    }
}
