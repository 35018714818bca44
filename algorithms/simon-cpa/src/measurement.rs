//! Measurement containers (component C6).

use crate::error::Error;
use crate::matrix::Matrix;
use crate::word::Word;

/// An immutable measurement set for one attack campaign: plaintexts,
/// optional ciphertexts, and the trace matrix recorded alongside them.
///
/// Row counts are checked at construction and never change afterwards —
/// Measurements are read-only for the duration of a campaign.
#[derive(Debug, Clone)]
pub struct Measurements {
    plaintexts: Vec<(Word, Word)>,
    ciphertexts: Option<Vec<(Word, Word)>>,
    traces: Matrix<f64>,
}

impl Measurements {
    /// Build a measurement set, rejecting any row-count mismatch between
    /// plaintexts, ciphertexts (if given), and traces.
    pub fn new(
        plaintexts: Vec<(Word, Word)>,
        ciphertexts: Option<Vec<(Word, Word)>>,
        traces: Matrix<f64>,
    ) -> Result<Self, Error> {
        let n = plaintexts.len();
        if traces.rows() != n {
            return Err(Error::shape_mismatch(
                "Measurements::new",
                format!("{n} trace rows (one per plaintext)"),
                format!("{} trace rows", traces.rows()),
            ));
        }
        if let Some(ct) = &ciphertexts {
            if ct.len() != n {
                return Err(Error::shape_mismatch(
                    "Measurements::new",
                    format!("{n} ciphertexts"),
                    format!("{} ciphertexts", ct.len()),
                ));
            }
        }
        Ok(Self {
            plaintexts,
            ciphertexts,
            traces,
        })
    }

    /// Number of measurement rows (`N`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.plaintexts.len()
    }

    /// Whether the set holds zero rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plaintexts.is_empty()
    }

    /// Number of trace samples per row (`S`).
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.traces.cols()
    }

    /// Borrow the plaintexts.
    #[must_use]
    pub fn plaintexts(&self) -> &[(Word, Word)] {
        &self.plaintexts
    }

    /// Borrow the ciphertexts, if this set carries them.
    #[must_use]
    pub fn ciphertexts(&self) -> Option<&[(Word, Word)]> {
        self.ciphertexts.as_deref()
    }

    /// Borrow the trace matrix.
    #[must_use]
    pub const fn traces(&self) -> &Matrix<f64> {
        &self.traces
    }

    /// A contiguous row range `[start, end)`, for consuming a large
    /// measurement set in streaming-sized batches.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self, Error> {
        if start > end || end > self.len() {
            return Err(Error::param_out_of_range(
                "slice range",
                format!(
                    "[{start}, {end}) is not a valid sub-range of a {}-row set",
                    self.len()
                ),
            ));
        }
        let s = self.sample_count();
        let mut traces = Matrix::zeros(end - start, s);
        for (dst, src) in (start..end).enumerate() {
            for col in 0..s {
                traces.set(dst, col, self.traces.get(src, col));
            }
        }
        let plaintexts = self.plaintexts[start..end].to_vec();
        let ciphertexts = self.ciphertexts.as_ref().map(|ct| ct[start..end].to_vec());
        Ok(Self {
            plaintexts,
            ciphertexts,
            traces,
        })
    }
}
