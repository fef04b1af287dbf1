//! Dense matrices over GF(2^8) and the Cauchy encoding matrix.

use std::fmt;

use crate::gf;

/// Row-major matrix over GF(2^8).
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Matrix {
    /// All-zero matrix.
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.set(i, i, 1);
        }
        m
    }

    /// Systematic Cauchy encoding matrix with `data_shards + parity_shards`
    /// rows and `data_shards` columns.
    ///
    /// The first `data_shards` rows are the identity, so data shards pass
    /// through unchanged. Row `r` of the parity block holds
    /// `1 / (r XOR c)` in column `c`. `r >= data_shards > c` keeps the
    /// denominator non-zero, and every square selection of rows is
    /// invertible, so any `data_shards` shards determine the rest.
    ///
    /// Callers must keep the total at or below 256 rows.
    pub fn cauchy_encoding(data_shards: usize, parity_shards: usize) -> Self {
        let total = data_shards + parity_shards;
        debug_assert!(total <= 256);
        let mut m = Self::zero(total, data_shards);
        for r in 0..total {
            if r < data_shards {
                m.set(r, r, 1);
            } else {
                for c in 0..data_shards {
                    m.set(r, c, gf::inv((r ^ c) as u8));
                }
            }
        }
        m
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element at (`r`, `c`).
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.data[r * self.cols + c]
    }

    /// Set the element at (`r`, `c`).
    pub fn set(&mut self, r: usize, c: usize, value: u8) {
        self.data[r * self.cols + c] = value;
    }

    /// Row `r` as a slice.
    pub fn row(&self, r: usize) -> &[u8] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// New matrix made of the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * self.cols);
        for &r in rows {
            data.extend_from_slice(self.row(r));
        }
        Self {
            rows: rows.len(),
            cols: self.cols,
            data,
        }
    }

    /// Matrix product `self * other`.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.cols, other.rows, "dimension mismatch");
        let mut out = Matrix::zero(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut acc = 0u8;
                for k in 0..self.cols {
                    acc ^= gf::mul(self.get(r, k), other.get(k, c));
                }
                out.set(r, c, acc);
            }
        }
        out
    }

    /// Inverse by Gauss-Jordan elimination, or `None` if singular or not
    /// square.
    pub fn invert(&self) -> Option<Matrix> {
        if self.rows != self.cols {
            return None;
        }
        let n = self.rows;
        let mut work = self.clone();
        let mut inverse = Matrix::identity(n);

        for col in 0..n {
            let pivot = (col..n).find(|&r| work.get(r, col) != 0)?;
            if pivot != col {
                work.swap_rows(pivot, col);
                inverse.swap_rows(pivot, col);
            }

            let scale = gf::inv(work.get(col, col));
            work.scale_row(col, scale);
            inverse.scale_row(col, scale);

            for r in 0..n {
                let factor = work.get(r, col);
                if r != col && factor != 0 {
                    work.add_scaled_row(col, r, factor);
                    inverse.add_scaled_row(col, r, factor);
                }
            }
        }
        Some(inverse)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    fn scale_row(&mut self, r: usize, factor: u8) {
        let cols = self.cols;
        for v in &mut self.data[r * cols..(r + 1) * cols] {
            *v = gf::mul(*v, factor);
        }
    }

    /// `row[dst] ^= factor * row[src]`
    fn add_scaled_row(&mut self, src: usize, dst: usize, factor: u8) {
        for c in 0..self.cols {
            let v = gf::mul(self.get(src, c), factor);
            self.data[dst * self.cols + c] ^= v;
        }
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix({}x{})", self.rows, self.cols)?;
        for r in 0..self.rows {
            for (i, v) in self.row(r).iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v:02x}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
