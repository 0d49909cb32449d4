//! Two-dimensional atomic matrix with optional dimension labels.

use ndarray::Array2;

use super::error::ApplyError;
use super::scalar::Scalar;

/// A matrix of scalars with optional row and column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    data: Array2<Scalar>,
    row_names: Option<Vec<String>>,
    col_names: Option<Vec<String>>,
}

impl LabeledMatrix {
    /// Wraps `data`, validating label counts against its extents.
    pub fn new(
        data: Array2<Scalar>,
        row_names: Option<Vec<String>>,
        col_names: Option<Vec<String>>,
    ) -> Result<Self, ApplyError> {
        let (rows, cols) = data.dim();
        if let Some(r) = &row_names {
            if r.len() != rows {
                return Err(ApplyError::LabelLength {
                    values: rows,
                    labels: r.len(),
                });
            }
        }
        if let Some(c) = &col_names {
            if c.len() != cols {
                return Err(ApplyError::LabelLength {
                    values: cols,
                    labels: c.len(),
                });
            }
        }
        Ok(Self {
            data,
            row_names,
            col_names,
        })
    }

    /// `(rows, cols)`
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Underlying data.
    pub fn data(&self) -> &Array2<Scalar> {
        &self.data
    }

    /// Row labels.
    pub fn row_names(&self) -> Option<&[String]> {
        self.row_names.as_deref()
    }

    /// Column labels.
    pub fn col_names(&self) -> Option<&[String]> {
        self.col_names.as_deref()
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<&Scalar> {
        self.data.get((row, col))
    }

    /// Column labelled `name`.
    pub fn column(&self, name: &str) -> Option<Vec<Scalar>> {
        let pos = self.col_names.as_ref()?.iter().position(|n| n == name)?;
        Some(self.data.column(pos).to_vec())
    }

    /// Numeric view of the whole matrix, `None` if any cell is non-numeric.
    pub fn to_f64(&self) -> Option<Array2<f64>> {
        let mut out = Array2::<f64>::zeros(self.data.dim());
        for (dst, src) in out.iter_mut().zip(self.data.iter()) {
            *dst = src.as_f64()?;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Array2<Scalar> {
        Array2::from_shape_fn((2, 3), |(i, j)| Scalar::Integer((i * 3 + j) as i64))
    }

    #[test]
    fn test_label_validation() {
        assert!(LabeledMatrix::new(sample(), Some(vec!["r".into()]), None).is_err());
        assert!(LabeledMatrix::new(sample(), None, Some(vec!["a".into(), "b".into()])).is_err());
        let m = LabeledMatrix::new(
            sample(),
            Some(vec!["r1".into(), "r2".into()]),
            Some(vec!["a".into(), "b".into(), "c".into()]),
        )
        .unwrap();
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(
            m.column("b"),
            Some(vec![Scalar::Integer(1), Scalar::Integer(4)])
        );
    }

    #[test]
    fn test_to_f64() {
        let m = LabeledMatrix::new(sample(), None, None).unwrap();
        let numeric = m.to_f64().unwrap();
        assert_eq!(numeric[[1, 2]], 5.0);
    }
}
