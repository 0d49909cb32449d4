//! Ordered, optionally labelled containers.

use super::error::ApplyError;

/// An ordered sequence of values with optional parallel labels.
///
/// The label sequence, when present, always has exactly one label per
/// element. Constructors that attach labels validate this invariant.
///
/// # Examples
/// ```
/// use apply_core::types::Container;
///
/// let c = Container::with_names(vec![1, 2], vec!["a".into(), "b".into()]).unwrap();
/// assert_eq!(c.len(), 2);
/// assert_eq!(c.name(1), Some("b"));
///
/// assert!(Container::with_names(vec![1, 2], vec!["a".into()]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T> {
    values: Vec<T>,
    names: Option<Vec<String>>,
}

impl<T> Container<T> {
    /// Creates an unlabelled container.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            names: None,
        }
    }

    /// Creates a labelled container.
    ///
    /// # Errors
    /// Returns `ApplyError::LabelLength` when `names` and `values` differ in
    /// length.
    pub fn with_names(values: Vec<T>, names: Vec<String>) -> Result<Self, ApplyError> {
        if names.len() != values.len() {
            return Err(ApplyError::LabelLength {
                values: values.len(),
                labels: names.len(),
            });
        }
        Ok(Self {
            values,
            names: Some(names),
        })
    }

    /// Replaces the labels, or removes them with `None`.
    pub fn set_names(&mut self, names: Option<Vec<String>>) -> Result<(), ApplyError> {
        if let Some(n) = &names {
            if n.len() != self.values.len() {
                return Err(ApplyError::LabelLength {
                    values: self.values.len(),
                    labels: n.len(),
                });
            }
        }
        self.names = names;
        Ok(())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the container has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element values in order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Labels, if attached.
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Label of element `index`, if labels are attached.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names
            .as_ref()
            .and_then(|n| n.get(index))
            .map(String::as_str)
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Looks up the first element labelled `name`.
    pub fn get_by_name(&self, name: &str) -> Option<&T> {
        let names = self.names.as_ref()?;
        let pos = names.iter().position(|n| n == name)?;
        self.values.get(pos)
    }

    /// Iterates over elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Consumes the container, returning values and labels.
    pub fn into_parts(self) -> (Vec<T>, Option<Vec<String>>) {
        (self.values, self.names)
    }

    /// Maps every element, keeping the labels.
    pub fn map<U, F>(self, f: F) -> Container<U>
    where
        F: FnMut(T) -> U,
    {
        Container {
            values: self.values.into_iter().map(f).collect(),
            names: self.names,
        }
    }
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for Container<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T> FromIterator<T> for Container<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlabelled() {
        let c = Container::new(vec![1.0, 2.0]);
        assert_eq!(c.len(), 2);
        assert!(c.names().is_none());
        assert_eq!(c.name(0), None);
    }

    #[test]
    fn test_label_length_invariant() {
        let err = Container::with_names(vec![1], vec![]).unwrap_err();
        assert!(matches!(
            err,
            ApplyError::LabelLength {
                values: 1,
                labels: 0
            }
        ));

        let mut c = Container::new(vec![1, 2, 3]);
        assert!(c.set_names(Some(vec!["x".into()])).is_err());
        assert!(c.names().is_none());
        c.set_names(Some(vec!["x".into(), "y".into(), "z".into()]))
            .unwrap();
        assert_eq!(c.get_by_name("z"), Some(&3));
    }

    #[test]
    fn test_map_keeps_labels() {
        let c = Container::with_names(vec![1, 2], vec!["a".into(), "b".into()]).unwrap();
        let doubled = c.map(|x| x * 2);
        assert_eq!(doubled.values(), &[2, 4]);
        assert_eq!(doubled.name(0), Some("a"));
    }
}
