#![forbid(unsafe_code)]

//! Row-major value matrix with row and column labels.

use heatgrid_runtime::MatrixShape;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    shape: MatrixShape,
    values: Vec<f64>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

impl Matrix {
    /// `values` are row-major. Labels default to the indices.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(Error::Matrix(format!(
                "{rows}x{cols} matrix needs {} values, got {}",
                rows * cols,
                values.len()
            )));
        }
        Ok(Self {
            shape: MatrixShape::new(rows, cols),
            values,
            row_labels: (0..rows).map(|i| i.to_string()).collect(),
            col_labels: (0..cols).map(|i| i.to_string()).collect(),
        })
    }

    /// Replace the labels; counts must match the shape.
    pub fn with_labels<R, C>(mut self, rows: R, cols: C) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        let cols: Vec<String> = cols.into_iter().map(Into::into).collect();
        if rows.len() != self.shape.rows || cols.len() != self.shape.cols {
            return Err(Error::Matrix(format!(
                "expected {} row and {} column labels, got {} and {}",
                self.shape.rows,
                self.shape.cols,
                rows.len(),
                cols.len()
            )));
        }
        self.row_labels = rows;
        self.col_labels = cols;
        Ok(self)
    }

    #[inline]
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        self.values.get(row * self.shape.cols + col).copied()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Smallest and largest finite value.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
