//! Partitioning containers by categorical keys.

use std::collections::BTreeMap;

use apply_core::types::{ApplyError, Container, Factor};
use tracing::debug;

/// One bucket of a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    /// Composite key label
    pub label: String,
    /// Elements in original order, with their labels
    pub values: Container<T>,
}

/// Ordered buckets produced by [`group_by`].
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<T> {
    groups: Vec<Group<T>>,
}

impl<T> Groups<T> {
    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Buckets in composite-level order.
    pub fn iter(&self) -> std::slice::Iter<'_, Group<T>> {
        self.groups.iter()
    }

    /// Bucket labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    /// Elements of the bucket labelled `label`.
    pub fn get(&self, label: &str) -> Option<&Container<T>> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| &g.values)
    }

    /// Total number of elements across all buckets.
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(|g| g.values.len()).sum()
    }

    /// Consumes the partition, returning the buckets.
    pub fn into_inner(self) -> Vec<Group<T>> {
        self.groups
    }
}

impl<'a, T> IntoIterator for &'a Groups<T> {
    type Item = &'a Group<T>;
    type IntoIter = std::slice::Iter<'a, Group<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partitions `container` by the composite of `keys`.
///
/// The composite key is [`Factor::interaction`] of `keys` joined with
/// `sep`, so buckets follow its level order (first key varying fastest).
/// Every element lands in exactly one bucket and keeps its label; within a
/// bucket the original order is preserved. With `drop_empty`, buckets
/// without elements are omitted; otherwise they are present and empty.
///
/// # Errors
/// - `ApplyError::NoKeys` when `keys` is empty
/// - `ApplyError::KeyLength` when a key is not parallel to `container`
/// - `ApplyError::LevelOverflow` when empty buckets are kept and the keys
///   have more level combinations than fit in `usize`
///
/// # Examples
/// ```
/// use apply_core::types::{Container, Factor, LevelOrder};
/// use apply_engine::group_by;
///
/// let data = Container::new(vec![10, 20, 30, 40]);
/// let key = Factor::new(&["A", "B", "A", "B"], LevelOrder::Sorted);
/// let groups = group_by(&data, &[key], true, ".").unwrap();
/// assert_eq!(groups.get("A").unwrap().values(), &[10, 30]);
/// assert_eq!(groups.get("B").unwrap().values(), &[20, 40]);
/// ```
pub fn group_by<T: Clone>(
    container: &Container<T>,
    keys: &[Factor],
    drop_empty: bool,
    sep: &str,
) -> Result<Groups<T>, ApplyError> {
    if keys.is_empty() {
        return Err(ApplyError::NoKeys);
    }
    for (key, f) in keys.iter().enumerate() {
        if f.len() != container.len() {
            return Err(ApplyError::KeyLength {
                key,
                expected: container.len(),
                found: f.len(),
            });
        }
    }
    let buckets = if drop_empty {
        occupied_buckets(container, keys, sep)
    } else {
        all_buckets(container, keys, sep)?
    };
    debug!(
        len = container.len(),
        keys = keys.len(),
        buckets = buckets.len(),
        drop_empty,
        "group_by"
    );

    let labelled = container.names().is_some();
    let mut groups = Vec::with_capacity(buckets.len());
    for (label, values, names) in buckets {
        let values = if labelled {
            Container::with_names(values, names)?
        } else {
            Container::new(values)
        };
        groups.push(Group { label, values });
    }
    Ok(Groups { groups })
}

/// Elements and names collected for one composite level.
type Bucket<T> = (String, Vec<T>, Vec<String>);

/// One bucket per composite level, in level order, including empty ones.
fn all_buckets<T: Clone>(
    container: &Container<T>,
    keys: &[Factor],
    sep: &str,
) -> Result<Vec<Bucket<T>>, ApplyError> {
    let composite = Factor::interaction(keys, sep)?;
    let mut buckets: Vec<Bucket<T>> = composite
        .levels()
        .iter()
        .map(|level| (level.clone(), Vec::new(), Vec::new()))
        .collect();
    for (index, &code) in composite.codes().iter().enumerate() {
        let (_, values, names) = &mut buckets[code];
        values.push(container.values()[index].clone());
        if let Some(name) = container.name(index) {
            names.push(name.to_string());
        }
    }
    Ok(buckets)
}

/// Buckets for the combinations that occur, in composite level order.
///
/// Combinations are keyed by their per-key codes, last key first, so the
/// map order matches the level order of [`Factor::interaction`] without
/// enumerating every combination.
fn occupied_buckets<T: Clone>(
    container: &Container<T>,
    keys: &[Factor],
    sep: &str,
) -> Vec<Bucket<T>> {
    let mut occupied: BTreeMap<Vec<usize>, (Vec<T>, Vec<String>)> = BTreeMap::new();
    for (index, value) in container.values().iter().enumerate() {
        let code: Vec<usize> = keys.iter().rev().map(|k| k.codes()[index]).collect();
        let (values, names) = occupied.entry(code).or_default();
        values.push(value.clone());
        if let Some(name) = container.name(index) {
            names.push(name.to_string());
        }
    }
    occupied
        .into_iter()
        .map(|(code, (values, names))| {
            let label = code
                .iter()
                .rev()
                .zip(keys)
                .map(|(&c, k)| k.levels()[c].as_str())
                .collect::<Vec<_>>()
                .join(sep);
            (label, values, names)
        })
        .collect()
}

/// Reverses [`group_by`]: restores elements to the order described by
/// `key`, the composite factor used for the partition.
///
/// Labels are restored when every bucket carries them.
///
/// # Errors
/// - `ApplyError::UnknownLevel` when `key` uses a level with no bucket
/// - `ApplyError::KeyLength` when a bucket holds a different number of
///   elements than `key` assigns to it, or when bucket sizes do not add up
///   to the length of `key`
pub fn unsplit<T: Clone>(groups: &Groups<T>, key: &Factor) -> Result<Container<T>, ApplyError> {
    if groups.total_len() != key.len() {
        return Err(ApplyError::KeyLength {
            key: 0,
            expected: groups.total_len(),
            found: key.len(),
        });
    }

    let counts = key.counts();
    let mut by_code: Vec<Option<&Container<T>>> = vec![None; key.n_levels()];
    for (code, level) in key.levels().iter().enumerate() {
        match groups.get(level) {
            Some(bucket) if bucket.len() != counts[code] => {
                return Err(ApplyError::KeyLength {
                    key: code,
                    expected: bucket.len(),
                    found: counts[code],
                });
            }
            Some(bucket) => by_code[code] = Some(bucket),
            None if counts[code] > 0 => {
                return Err(ApplyError::UnknownLevel(level.clone()));
            }
            None => {}
        }
    }

    let labelled = groups.iter().all(|g| g.values.names().is_some());
    let mut cursor = vec![0; key.n_levels()];
    let mut values = Vec::with_capacity(key.len());
    let mut names = Vec::with_capacity(key.len());
    for &code in key.codes() {
        let bucket = by_code[code].ok_or_else(|| ApplyError::UnknownLevel(key.levels()[code].clone()))?;
        let pos = cursor[code];
        cursor[code] += 1;
        values.push(bucket.values()[pos].clone());
        if let Some(name) = bucket.name(pos) {
            names.push(name.to_string());
        }
    }

    if labelled && !values.is_empty() {
        Container::with_names(values, names)
    } else {
        Ok(Container::new(values))
    }
}
