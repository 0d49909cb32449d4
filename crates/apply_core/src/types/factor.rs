//! Categorical grouping keys.
//!
//! A [`Factor`] stores one level code per element plus the ordered list of
//! distinct levels. Several factors combine into a composite key with
//! [`Factor::interaction`], whose levels are the Cartesian product of the
//! individual levels with the first factor varying fastest.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::error::ApplyError;

/// How the levels of a factor built from raw labels are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelOrder {
    /// Lexicographic order of the level text
    #[default]
    Sorted,
    /// Order in which each level first appears
    FirstAppearance,
}

/// A categorical sequence.
///
/// # Examples
/// ```
/// use apply_core::types::{Factor, LevelOrder};
///
/// let f = Factor::new(&["b", "a", "b"], LevelOrder::Sorted);
/// assert_eq!(f.levels(), &["a".to_string(), "b".to_string()]);
/// assert_eq!(f.codes(), &[1, 0, 1]);
///
/// let g = Factor::new(&["b", "a", "b"], LevelOrder::FirstAppearance);
/// assert_eq!(g.levels(), &["b".to_string(), "a".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    codes: Vec<usize>,
    levels: Vec<String>,
}

impl Factor {
    /// Builds a factor from labels, deriving the levels with `order`.
    pub fn new<S: AsRef<str>>(labels: &[S], order: LevelOrder) -> Self {
        let mut levels: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for label in labels {
            let label = label.as_ref();
            if seen.insert(label) {
                levels.push(label.to_string());
            }
        }
        if order == LevelOrder::Sorted {
            levels.sort();
        }
        let index: HashMap<&str, usize> = levels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect();
        let codes = labels.iter().map(|l| index[l.as_ref()]).collect();
        Self { codes, levels }
    }

    /// Builds a factor whose levels are declared up front.
    ///
    /// Declared levels that never occur are kept, which is how empty groups
    /// arise.
    ///
    /// # Errors
    /// `ApplyError::UnknownLevel` for a label outside `levels`, and
    /// `ApplyError::DuplicateLevel` when a level is declared twice.
    pub fn with_levels<S: AsRef<str>>(
        labels: &[S],
        levels: Vec<String>,
    ) -> Result<Self, ApplyError> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(levels.len());
        for (i, level) in levels.iter().enumerate() {
            if index.insert(level.as_str(), i).is_some() {
                return Err(ApplyError::DuplicateLevel(level.clone()));
            }
        }
        let codes = labels
            .iter()
            .map(|l| {
                index
                    .get(l.as_ref())
                    .copied()
                    .ok_or_else(|| ApplyError::UnknownLevel(l.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { codes, levels })
    }

    /// Generates a factor of `total` elements with levels `"1"..="n_levels"`,
    /// each level repeated `reps` times in turn, cycling as needed.
    ///
    /// ```
    /// use apply_core::types::Factor;
    ///
    /// let f = Factor::generate(3, 2, 6);
    /// assert_eq!(f.codes(), &[0, 0, 1, 1, 2, 2]);
    /// ```
    pub fn generate(n_levels: usize, reps: usize, total: usize) -> Self {
        if n_levels == 0 || reps == 0 {
            return Self {
                codes: Vec::new(),
                levels: Vec::new(),
            };
        }
        let levels = (1..=n_levels).map(|i| i.to_string()).collect();
        let codes = (0..total).map(|i| (i / reps) % n_levels).collect();
        Self { codes, levels }
    }

    /// Cross-product of several factors.
    ///
    /// Composite levels enumerate every combination with the first factor
    /// varying fastest; labels are the individual labels joined by `sep`.
    ///
    /// # Errors
    /// `ApplyError::NoKeys` for an empty slice, `ApplyError::KeyLength`
    /// when the factors differ in length and `ApplyError::LevelOverflow`
    /// when the number of combinations does not fit in `usize`.
    pub fn interaction(factors: &[Factor], sep: &str) -> Result<Self, ApplyError> {
        let first = factors.first().ok_or(ApplyError::NoKeys)?;
        let len = first.len();
        for (key, f) in factors.iter().enumerate() {
            if f.len() != len {
                return Err(ApplyError::KeyLength {
                    key,
                    expected: len,
                    found: f.len(),
                });
            }
        }
        if factors.len() == 1 {
            return Ok(first.clone());
        }

        let total = factors
            .iter()
            .try_fold(1usize, |acc, f| acc.checked_mul(f.n_levels()))
            .ok_or(ApplyError::LevelOverflow {
                keys: factors.len(),
            })?;
        let mut levels = Vec::with_capacity(total);
        for composite in 0..total {
            let mut rest = composite;
            let mut parts = Vec::with_capacity(factors.len());
            for f in factors {
                let n = f.n_levels();
                parts.push(f.levels[rest % n].as_str());
                rest /= n;
            }
            levels.push(parts.join(sep));
        }

        let codes = (0..len)
            .map(|i| {
                let mut code = 0;
                let mut stride = 1;
                for f in factors {
                    code += f.codes[i] * stride;
                    stride *= f.n_levels();
                }
                code
            })
            .collect();
        Ok(Self { codes, levels })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the factor has no elements.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of levels, including unused ones.
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    /// Ordered levels.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Level code of every element.
    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    /// Label of element `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.codes
            .get(index)
            .map(|&c| self.levels[c].as_str())
    }

    /// Number of elements per level.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.levels.len()];
        for &c in &self.codes {
            counts[c] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_levels() {
        let f = Factor::new(&["c", "a", "b", "a"], LevelOrder::Sorted);
        assert_eq!(f.levels(), &["a", "b", "c"]);
        assert_eq!(f.codes(), &[2, 0, 1, 0]);
        assert_eq!(f.label(0), Some("c"));
        assert_eq!(f.counts(), vec![2, 1, 1]);
    }

    #[test]
    fn test_declared_levels_keep_unused() {
        let f = Factor::with_levels(&["x", "x"], vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(f.n_levels(), 2);
        assert_eq!(f.counts(), vec![2, 0]);
    }

    #[test]
    fn test_declared_levels_errors() {
        let err = Factor::with_levels(&["z"], vec!["x".into()]).unwrap_err();
        assert!(matches!(err, ApplyError::UnknownLevel(l) if l == "z"));

        let err = Factor::with_levels(&["x"], vec!["x".into(), "x".into()]).unwrap_err();
        assert!(matches!(err, ApplyError::DuplicateLevel(l) if l == "x"));
    }

    #[test]
    fn test_generate_cycles() {
        let f = Factor::generate(2, 1, 5);
        assert_eq!(f.codes(), &[0, 1, 0, 1, 0]);
        assert_eq!(f.levels(), &["1", "2"]);
        assert!(Factor::generate(0, 3, 4).is_empty());
    }

    #[test]
    fn test_interaction_first_factor_fastest() {
        let a = Factor::new(&["A", "B", "A"], LevelOrder::Sorted);
        let b = Factor::new(&["x", "x", "y"], LevelOrder::Sorted);
        let ab = Factor::interaction(&[a, b], ".").unwrap();
        assert_eq!(ab.levels(), &["A.x", "B.x", "A.y", "B.y"]);
        assert_eq!(ab.codes(), &[0, 1, 2]);
        assert_eq!(ab.counts(), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_interaction_errors() {
        assert!(matches!(
            Factor::interaction(&[], "."),
            Err(ApplyError::NoKeys)
        ));
        let a = Factor::new(&["A"], LevelOrder::Sorted);
        let b = Factor::new(&["x", "y"], LevelOrder::Sorted);
        assert!(matches!(
            Factor::interaction(&[a, b], "."),
            Err(ApplyError::KeyLength {
                key: 1,
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_interaction_overflow_is_an_error() {
        let labels: Vec<String> = (0..10_000).map(|i| format!("l{i:05}")).collect();
        let key = Factor::new(&labels, LevelOrder::Sorted);
        let keys = vec![key; 5];
        assert!(matches!(
            Factor::interaction(&keys, "."),
            Err(ApplyError::LevelOverflow { keys: 5 })
        ));
    }
}
