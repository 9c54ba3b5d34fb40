//! Lazy sum/product expression builders.
//!
//! `*` and `+` between [`LabeledTensor`]s and accumulators only append
//! operands; no contraction runs until an explicit `evaluate()` call. The
//! builders are plain tagged operand lists: a [`ProdExpr`] is a flat factor
//! list, a [`SumExpr`] is a list of terms each of which is either a tensor
//! or a nested product (evaluated first, then folded into the sum).
//!
//! Builders are `Clone` and `evaluate` borrows, so the same expression can
//! be evaluated repeatedly with identical results.

use std::ops::{Add, Mul};

use num_traits::{One, Zero};

use crate::eval::{contract_product, contract_sum, ProductOutput};
use crate::label::{AxisName, Label};
use crate::labeled::LabeledTensor;
use crate::{EinsumError, Result};

/// Deferred product of labeled tensors.
#[derive(Debug, Clone)]
pub struct ProdExpr<T, K> {
    factors: Vec<LabeledTensor<T, K>>,
}

/// One term of a deferred sum.
#[derive(Debug, Clone)]
enum SumTerm<T, K> {
    Tensor(LabeledTensor<T, K>),
    Product(ProdExpr<T, K>),
}

/// Deferred sum of labeled tensors and nested products.
#[derive(Debug, Clone)]
pub struct SumExpr<T, K> {
    terms: Vec<SumTerm<T, K>>,
}

impl<T, K> ProdExpr<T, K> {
    fn from_pair(left: LabeledTensor<T, K>, right: LabeledTensor<T, K>) -> Self {
        Self {
            factors: vec![left, right],
        }
    }

    /// Number of collected factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl<T, K> SumExpr<T, K> {
    /// Number of collected terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<T: Copy + Zero + One, K: AxisName> ProdExpr<T, K> {
    /// Run the contraction.
    ///
    /// Labels occurring once across the factors survive as free output
    /// axes; the rest are summed over. A full contraction (no free axis)
    /// returns [`EinsumError::TraceLabelRequired`], since its scalar
    /// result needs a caller-supplied output label — use
    /// [`evaluate_traced`](ProdExpr::evaluate_traced).
    pub fn evaluate(&self) -> Result<LabeledTensor<T, K>> {
        match contract_product(&self.factors)? {
            ProductOutput::Free(view, labels) => Ok(LabeledTensor::from_parts(view, labels)),
            ProductOutput::Scalar(_) => Err(EinsumError::TraceLabelRequired),
        }
    }

    /// Run the contraction, naming the output axis `name` if every label
    /// is summed away (trace/full contraction). When free axes survive the
    /// name is unused and the result equals [`evaluate`](ProdExpr::evaluate).
    pub fn evaluate_traced(&self, name: K) -> Result<LabeledTensor<T, K>> {
        match contract_product(&self.factors)? {
            ProductOutput::Free(view, labels) => Ok(LabeledTensor::from_parts(view, labels)),
            ProductOutput::Scalar(view) => {
                Ok(LabeledTensor::from_parts(view, vec![Label::new(name, 1, 0)]))
            }
        }
    }
}

impl<T: Copy + Zero + One, K: AxisName> SumExpr<T, K> {
    /// Evaluate nested products, then add all terms elementwise with axes
    /// aligned by name.
    ///
    /// Every label must be shared by every term; anything else is an
    /// operand-shape inconsistency, reported as an error rather than
    /// broadcast. A nested product that fully contracts has no label for
    /// its scalar and is rejected with
    /// [`EinsumError::TraceLabelRequired`].
    pub fn evaluate(&self) -> Result<LabeledTensor<T, K>> {
        let mut operands = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match term {
                SumTerm::Tensor(t) => operands.push(t.clone()),
                SumTerm::Product(p) => operands.push(p.evaluate()?),
            }
        }
        contract_sum(&operands)
    }
}

// ---------------------------------------------------------------------------
// Product composition
// ---------------------------------------------------------------------------

impl<T, K> Mul for LabeledTensor<T, K> {
    type Output = ProdExpr<T, K>;

    fn mul(self, rhs: LabeledTensor<T, K>) -> ProdExpr<T, K> {
        ProdExpr::from_pair(self, rhs)
    }
}

impl<T, K> Mul<LabeledTensor<T, K>> for ProdExpr<T, K> {
    type Output = ProdExpr<T, K>;

    fn mul(mut self, rhs: LabeledTensor<T, K>) -> ProdExpr<T, K> {
        self.factors.push(rhs);
        self
    }
}

impl<T, K> Mul<ProdExpr<T, K>> for LabeledTensor<T, K> {
    type Output = ProdExpr<T, K>;

    fn mul(self, rhs: ProdExpr<T, K>) -> ProdExpr<T, K> {
        let mut factors = Vec::with_capacity(rhs.factors.len() + 1);
        factors.push(self);
        factors.extend(rhs.factors);
        ProdExpr { factors }
    }
}

impl<T, K> Mul for ProdExpr<T, K> {
    type Output = ProdExpr<T, K>;

    fn mul(mut self, rhs: ProdExpr<T, K>) -> ProdExpr<T, K> {
        self.factors.extend(rhs.factors);
        self
    }
}

// ---------------------------------------------------------------------------
// Sum composition
// ---------------------------------------------------------------------------

impl<T, K> Add for LabeledTensor<T, K> {
    type Output = SumExpr<T, K>;

    fn add(self, rhs: LabeledTensor<T, K>) -> SumExpr<T, K> {
        SumExpr {
            terms: vec![SumTerm::Tensor(self), SumTerm::Tensor(rhs)],
        }
    }
}

impl<T, K> Add<LabeledTensor<T, K>> for SumExpr<T, K> {
    type Output = SumExpr<T, K>;

    fn add(mut self, rhs: LabeledTensor<T, K>) -> SumExpr<T, K> {
        self.terms.push(SumTerm::Tensor(rhs));
        self
    }
}

impl<T, K> Add<SumExpr<T, K>> for LabeledTensor<T, K> {
    type Output = SumExpr<T, K>;

    fn add(self, rhs: SumExpr<T, K>) -> SumExpr<T, K> {
        let mut terms = Vec::with_capacity(rhs.terms.len() + 1);
        terms.push(SumTerm::Tensor(self));
        terms.extend(rhs.terms);
        SumExpr { terms }
    }
}

impl<T, K> Add for SumExpr<T, K> {
    type Output = SumExpr<T, K>;

    fn add(mut self, rhs: SumExpr<T, K>) -> SumExpr<T, K> {
        self.terms.extend(rhs.terms);
        self
    }
}

impl<T, K> Add<ProdExpr<T, K>> for LabeledTensor<T, K> {
    type Output = SumExpr<T, K>;

    fn add(self, rhs: ProdExpr<T, K>) -> SumExpr<T, K> {
        SumExpr {
            terms: vec![SumTerm::Tensor(self), SumTerm::Product(rhs)],
        }
    }
}

impl<T, K> Add<LabeledTensor<T, K>> for ProdExpr<T, K> {
    type Output = SumExpr<T, K>;

    fn add(self, rhs: LabeledTensor<T, K>) -> SumExpr<T, K> {
        SumExpr {
            terms: vec![SumTerm::Product(self), SumTerm::Tensor(rhs)],
        }
    }
}

impl<T, K> Add for ProdExpr<T, K> {
    type Output = SumExpr<T, K>;

    fn add(self, rhs: ProdExpr<T, K>) -> SumExpr<T, K> {
        SumExpr {
            terms: vec![SumTerm::Product(self), SumTerm::Product(rhs)],
        }
    }
}

impl<T, K> Add<SumExpr<T, K>> for ProdExpr<T, K> {
    type Output = SumExpr<T, K>;

    fn add(self, rhs: SumExpr<T, K>) -> SumExpr<T, K> {
        let mut terms = Vec::with_capacity(rhs.terms.len() + 1);
        terms.push(SumTerm::Product(self));
        terms.extend(rhs.terms);
        SumExpr { terms }
    }
}

impl<T, K> Add<ProdExpr<T, K>> for SumExpr<T, K> {
    type Output = SumExpr<T, K>;

    fn add(mut self, rhs: ProdExpr<T, K>) -> SumExpr<T, K> {
        self.terms.push(SumTerm::Product(rhs));
        self
    }
}
