use serde::Serialize;
use std::fmt;

/// Square correlation matrix stored row-major in a flat vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), columns.len() * columns.len());
        Self { columns, values }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size() + col]
    }

    /// Coefficient between two named columns
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.get(i, j))
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let n = self.size();
        &self.values[row * n..(row + 1) * n]
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.size()).map(|i| self.row(i).to_vec()).collect()
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.columns.iter().map(String::len).max().unwrap_or(0);
        let cell_width = self.columns.iter().map(String::len).max().unwrap_or(0).max(8);

        write!(f, "{:w$}", "", w = label_width)?;
        for name in &self.columns {
            write!(f, " {:>w$}", name, w = cell_width)?;
        }
        for (i, name) in self.columns.iter().enumerate() {
            write!(f, "\n{:<w$}", name, w = label_width)?;
            for value in self.row(i) {
                write!(f, " {:>w$.4}", value, w = cell_width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_rows() {
        let m = CorrelationMatrix::new(
            vec!["Open".into(), "Close".into()],
            vec![1.0, 0.5, 0.5, 1.0],
        );
        assert_eq!(m.size(), 2);
        assert_eq!(m.between("Open", "Close"), Some(0.5));
        assert_eq!(m.between("Open", "Volume"), None);
        assert_eq!(m.rows(), vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
    }

    #[test]
    fn test_display_aligns_columns() {
        let m = CorrelationMatrix::new(vec!["a".into()], vec![1.0]);
        assert_eq!(m.to_string(), "         a\na   1.0000");
    }
}
