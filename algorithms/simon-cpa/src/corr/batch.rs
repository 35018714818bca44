//! Batch (one-shot) Pearson correlation.

use crate::error::Error;
use crate::matrix::Matrix;

#[cfg(feature = "multithread")]
use rayon::prelude::*;

/// Pearson correlation between every column of `x` (N×K) and every column
/// of `y` (N×S), producing a `K×S` matrix.
///
/// Computed as `Sxy / sqrt(Sxx * Syy)` per cell, where `Sxy`/`Sxx`/`Syy`
/// are sums of centred products and squares over the `N` rows. This is
/// algebraically the centre/normalise/matmul-by-`(N-1)` sequence the
/// streaming engine's running sums also reduce to, with the `(N-1)` terms
/// cancelling against a sample (not population) standard deviation — doing
/// it directly skips a rounding step and is what keeps batch and streaming
/// in the 1e-9 agreement the two modes are required to hold.
pub fn correlate(x: &Matrix<f64>, y: &Matrix<f64>) -> Result<Matrix<f64>, Error> {
    if x.rows() != y.rows() {
        return Err(Error::shape_mismatch(
            "corr::batch::correlate",
            format!("X and Y with the same row count (X has {})", x.rows()),
            format!("Y has {} rows", y.rows()),
        ));
    }
    let n = x.rows();
    if n < 2 {
        return Err(Error::param_out_of_range(
            "N",
            format!("correlation needs at least 2 rows, got {n}"),
        ));
    }
    let k = x.cols();
    let s = y.cols();

    let x_mean = column_means(x);
    let y_mean = column_means(y);

    let mut sxx = vec![0.0; k];
    for row in 0..n {
        for col in 0..k {
            let d = x.get(row, col) - x_mean[col];
            sxx[col] += d * d;
        }
    }
    let mut syy = vec![0.0; s];
    for row in 0..n {
        for col in 0..s {
            let d = y.get(row, col) - y_mean[col];
            syy[col] += d * d;
        }
    }

    let compute_col = |sj: usize| -> Vec<f64> {
        let mut out = vec![0.0; k];
        for (ki, cell) in out.iter_mut().enumerate() {
            let mut sxy = 0.0;
            for row in 0..n {
                sxy += (x.get(row, ki) - x_mean[ki]) * (y.get(row, sj) - y_mean[sj]);
            }
            let den = (sxx[ki] * syy[sj]).sqrt();
            *cell = sxy / den;
        }
        out
    };

    #[cfg(feature = "multithread")]
    let columns: Vec<Vec<f64>> = (0..s).into_par_iter().map(compute_col).collect();
    #[cfg(not(feature = "multithread"))]
    let columns: Vec<Vec<f64>> = (0..s).map(compute_col).collect();

    let mut out = Matrix::zeros(k, s);
    for (sj, col) in columns.into_iter().enumerate() {
        for (ki, value) in col.into_iter().enumerate() {
            out.set(ki, sj, value);
        }
    }
    Ok(out)
}

fn column_means(m: &Matrix<f64>) -> Vec<f64> {
    let mut sums = vec![0.0; m.cols()];
    for row in 0..m.rows() {
        for (col, sum) in sums.iter_mut().enumerate() {
            *sum += m.get(row, col);
        }
    }
    let n = m.rows() as f64;
    for sum in &mut sums {
        *sum /= n;
    }
    sums
}
