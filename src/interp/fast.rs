//! Evaluation of field vectors through a [`PrecomputedMap`].
//!
//! This is the hot path: one gather and three multiply-adds per query point.

use rayon::prelude::*;

use crate::error::{InterpError, InterpResult};
use crate::interp::weights::PrecomputedMap;

impl PrecomputedMap {
    /// Interpolates `field` (one value per source point) at every query point.
    ///
    /// Query points outside the hull come back as NaN. A field whose length
    /// differs from the source point count is rejected.
    pub fn evaluate(&self, field: &[f64]) -> InterpResult<Vec<f64>> {
        self.check_field(field)?;
        Ok(self.apply(field))
    }

    /// Same as [`Self::evaluate`], writing into a caller-owned buffer.
    pub fn evaluate_into(&self, field: &[f64], out: &mut [f64]) -> InterpResult<()> {
        self.check_field(field)?;
        if out.len() != self.len() {
            return Err(InterpError::dimension_mismatch(
                self.len(),
                out.len(),
                "output buffer",
            ));
        }
        for ((o, idx), w) in out.iter_mut().zip(&self.vertices).zip(&self.weights) {
            *o = combine(field, idx, w);
        }
        Ok(())
    }

    /// Evaluates several field vectors on the same geometry in parallel.
    pub fn evaluate_batch(&self, fields: &[Vec<f64>]) -> InterpResult<Vec<Vec<f64>>> {
        for field in fields {
            self.check_field(field)?;
        }
        Ok(fields.par_iter().map(|field| self.apply(field)).collect())
    }

    /// Evaluation without the length check; `field` must match the source.
    pub(crate) fn apply(&self, field: &[f64]) -> Vec<f64> {
        self.vertices
            .iter()
            .zip(&self.weights)
            .map(|(idx, w)| combine(field, idx, w))
            .collect()
    }

    fn check_field(&self, field: &[f64]) -> InterpResult<()> {
        if field.len() != self.source_len {
            return Err(InterpError::dimension_mismatch(
                self.source_len,
                field.len(),
                "field vector",
            ));
        }
        Ok(())
    }
}

#[inline]
fn combine(field: &[f64], idx: &[usize; 3], w: &[f64; 3]) -> f64 {
    w[0] * field[idx[0]] + w[1] * field[idx[1]] + w[2] * field[idx[2]]
}
