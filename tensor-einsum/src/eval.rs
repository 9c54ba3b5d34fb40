//! The contraction evaluator: label union/partition and the double
//! coordinate-space loops behind product and sum evaluation.

use num_traits::{One, Zero};
use tensor_view::{CoordIter, View};

use crate::label::{find_label, label_sizes, AxisName, Label};
use crate::labeled::LabeledTensor;
use crate::{EinsumError, Result};

/// The label union of a set of operands, split into free and summed axes.
///
/// A label is **common** (summed) when its name occurs more than once
/// across the union — across different operands or on several axes of one
/// operand; a label occurring exactly once is **unique** and survives as a
/// free output axis. Both lists keep first-encountered order.
pub(crate) struct LabelPartition<K> {
    pub unique: Vec<Label<K>>,
    pub common: Vec<Label<K>>,
}

/// Union all operand labels and partition them, rejecting a name bound to
/// different sizes anywhere in the union.
pub(crate) fn divide_labels<T, K: AxisName>(
    operands: &[LabeledTensor<T, K>],
) -> Result<LabelPartition<K>> {
    let mut union: Vec<Label<K>> = Vec::new();
    let mut occurrences: Vec<usize> = Vec::new();
    for operand in operands {
        for l in operand.labels() {
            match find_label(&l.name, &union) {
                Some(i) => {
                    if union[i].size != l.size {
                        return Err(EinsumError::SizeMismatch {
                            label: format!("{:?}", l.name),
                            expected: union[i].size,
                            found: l.size,
                        });
                    }
                    occurrences[i] += l.positions.len();
                }
                None => {
                    union.push(l.clone());
                    occurrences.push(l.positions.len());
                }
            }
        }
    }
    let mut partition = LabelPartition {
        unique: Vec::new(),
        common: Vec::new(),
    };
    for (l, n) in union.into_iter().zip(occurrences) {
        if n > 1 {
            partition.common.push(l);
        } else {
            partition.unique.push(l);
        }
    }
    Ok(partition)
}

/// Rebind partition labels to the axes of a freshly allocated output view:
/// label `i` covers output axis `i` exactly once.
fn rebind<K: AxisName>(labels: &[Label<K>]) -> Vec<Label<K>> {
    labels
        .iter()
        .enumerate()
        .map(|(axis, l)| Label::new(l.name.clone(), l.size, axis))
        .collect()
}

/// Result of a product contraction: either an output with free axes and
/// their labels, or the scalar of a full contraction (rank-1, extent-1
/// view whose single axis has no label yet).
pub(crate) enum ProductOutput<T, K> {
    Free(View<T>, Vec<Label<K>>),
    Scalar(View<T>),
}

/// Contract a product of labeled tensors.
///
/// With free (unique) labels the output ranges over the unique space; for
/// every free coordinate the elementwise product of all operands is summed
/// over the common space. An empty common space contributes exactly one
/// (empty) coordinate, so disjointly labeled operands form an outer
/// product, and a single operand with a repeated name yields its partial
/// trace. Without any free label the same sum collapses into one scalar
/// accumulator.
pub(crate) fn contract_product<T, K>(
    operands: &[LabeledTensor<T, K>],
) -> Result<ProductOutput<T, K>>
where
    T: Copy + Zero + One,
    K: AxisName,
{
    let partition = divide_labels(operands)?;
    let common_sizes = label_sizes(&partition.common);

    if partition.unique.is_empty() {
        // Pure trace / full contraction: one accumulator cell.
        let mut acc = T::zero();
        for c in CoordIter::new(&common_sizes) {
            let mut product = T::one();
            for operand in operands {
                let coords = operand.map_coords(&partition.common, &c, &[], &[])?;
                product = product * operand.view().get(&coords)?;
            }
            acc = acc + product;
        }
        let out = View::zeros(&[1])?;
        out.set(acc, &[0])?;
        return Ok(ProductOutput::Scalar(out));
    }

    let out_extents = label_sizes(&partition.unique);
    let out = View::zeros(&out_extents)?;
    for u in CoordIter::new(&out_extents) {
        let mut acc = T::zero();
        for c in CoordIter::new(&common_sizes) {
            let mut product = T::one();
            for operand in operands {
                let coords =
                    operand.map_coords(&partition.common, &c, &partition.unique, &u)?;
                product = product * operand.view().get(&coords)?;
            }
            acc = acc + product;
        }
        out.set(acc, &u)?;
    }
    Ok(ProductOutput::Free(out, rebind(&partition.unique)))
}

/// Add labeled tensors elementwise with axes aligned by name.
///
/// After the union step every label must be shared by every operand — a
/// surviving unique label or a label missing from one operand means the
/// operands have incompatible shapes, never a silent broadcast.
pub(crate) fn contract_sum<T, K>(operands: &[LabeledTensor<T, K>]) -> Result<LabeledTensor<T, K>>
where
    T: Copy + Zero,
    K: AxisName,
{
    let partition = divide_labels(operands)?;
    if let Some(l) = partition.unique.first() {
        return Err(EinsumError::ShapeMismatch {
            label: format!("{:?}", l.name),
        });
    }
    for l in &partition.common {
        for operand in operands {
            if find_label(&l.name, operand.labels()).is_none() {
                return Err(EinsumError::ShapeMismatch {
                    label: format!("{:?}", l.name),
                });
            }
        }
    }

    let sizes = label_sizes(&partition.common);
    let out = View::zeros(&sizes)?;
    for c in CoordIter::new(&sizes) {
        let mut acc = T::zero();
        for operand in operands {
            let coords = operand.map_coords(&partition.common, &c, &[], &[])?;
            acc = acc + operand.view().get(&coords)?;
        }
        out.set(acc, &c)?;
    }
    Ok(LabeledTensor::from_parts(out, rebind(&partition.common)))
}
