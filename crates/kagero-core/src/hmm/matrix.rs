use std::ops::{Index, IndexMut};

use crate::logspace::log_add;

/// Row-major `rows × cols` table of log-probabilities.
///
/// Used for the forward (α) and backward (β) lattices, where row `t` holds
/// one value per state.
#[derive(Debug, Clone, PartialEq)]
pub struct LogMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl LogMatrix {
    /// Creates a matrix with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// `log_add` over row `r`.
    pub fn row_log_sum(&self, r: usize) -> f64 {
        log_add(self.row(r))
    }

    /// Iterates rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }
}

impl Index<(usize, usize)> for LogMatrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for LogMatrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}
