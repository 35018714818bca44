//! Streaming (incremental) Pearson correlation.
//!
//! A known-bad version of this update mixed the x-side running mean into
//! the y-side delta (`dy = y_new - mx`). That is wrong — the y-side delta
//! must use the y-side mean — and is why `mx` and `my` are kept as two
//! separate fields updated from two separate per-batch deltas below.

use crate::error::Error;
use crate::matrix::Matrix;

/// Running Pearson-correlation accumulator for a fixed `(K, S)` shape,
/// updated across arbitrarily many batches of rows.
pub struct StreamingCorrelator {
    k: usize,
    s: usize,
    n: u64,
    mx: Vec<f64>,
    my: Vec<f64>,
    mxx: Vec<f64>,
    myy: Vec<f64>,
    mxy: Matrix<f64>,
}

impl StreamingCorrelator {
    /// Create an accumulator for a `k`-column prediction side and an
    /// `s`-column trace side.
    #[must_use]
    pub fn new(k: usize, s: usize) -> Self {
        Self {
            k,
            s,
            n: 0,
            mx: vec![0.0; k],
            my: vec![0.0; s],
            mxx: vec![0.0; k],
            myy: vec![0.0; s],
            mxy: Matrix::zeros(k, s),
        }
    }

    /// Total rows folded in so far.
    #[must_use]
    pub const fn sample_count(&self) -> u64 {
        self.n
    }

    /// Fold `b` new rows in: `x_new` is `b×k`, `y_new` is `b×s`.
    pub fn update(&mut self, x_new: &Matrix<f64>, y_new: &Matrix<f64>) -> Result<(), Error> {
        if x_new.rows() != y_new.rows() {
            return Err(Error::shape_mismatch(
                "StreamingCorrelator::update",
                format!("X and Y with the same row count (X has {})", x_new.rows()),
                format!("Y has {} rows", y_new.rows()),
            ));
        }
        if x_new.cols() != self.k {
            return Err(Error::shape_mismatch(
                "StreamingCorrelator::update",
                format!("{} columns in X", self.k),
                format!("{} columns", x_new.cols()),
            ));
        }
        if y_new.cols() != self.s {
            return Err(Error::shape_mismatch(
                "StreamingCorrelator::update",
                format!("{} columns in Y", self.s),
                format!("{} columns", y_new.cols()),
            ));
        }

        let b = x_new.rows();
        if b == 0 {
            return Ok(());
        }
        self.n += b as u64;
        let n = self.n as f64;

        // First pass: deltas against the pre-update means.
        let mut dx = Matrix::zeros(b, self.k);
        let mut dy = Matrix::zeros(b, self.s);
        let mut dx_sum = vec![0.0; self.k];
        let mut dy_sum = vec![0.0; self.s];
        for row in 0..b {
            for col in 0..self.k {
                let d = x_new.get(row, col) - self.mx[col];
                dx.set(row, col, d);
                dx_sum[col] += d;
            }
            for col in 0..self.s {
                let d = y_new.get(row, col) - self.my[col];
                dy.set(row, col, d);
                dy_sum[col] += d;
            }
        }
        for col in 0..self.k {
            self.mx[col] += dx_sum[col] / n;
        }
        for col in 0..self.s {
            self.my[col] += dy_sum[col] / n;
        }

        // Second pass: deltas against the post-update means.
        let mut dy2 = Matrix::zeros(b, self.s);
        for row in 0..b {
            for col in 0..self.k {
                let d2 = x_new.get(row, col) - self.mx[col];
                self.mxx[col] += dx.get(row, col) * d2;
            }
            for col in 0..self.s {
                let d2 = y_new.get(row, col) - self.my[col];
                dy2.set(row, col, d2);
                self.myy[col] += dy.get(row, col) * d2;
            }
        }

        for row in 0..b {
            for ki in 0..self.k {
                let dxv = dx.get(row, ki);
                for sj in 0..self.s {
                    let cur = self.mxy.get(ki, sj);
                    self.mxy.set(ki, sj, cur + dxv * dy2.get(row, sj));
                }
            }
        }

        Ok(())
    }

    /// Current correlation matrix: `mxy / sqrt(outer(mxx, myy))`.
    #[must_use]
    pub fn result(&self) -> Matrix<f64> {
        let mut out = Matrix::zeros(self.k, self.s);
        for ki in 0..self.k {
            for sj in 0..self.s {
                let den = (self.mxx[ki] * self.myy[sj]).sqrt();
                out.set(ki, sj, self.mxy.get(ki, sj) / den);
            }
        }
        out
    }
}
