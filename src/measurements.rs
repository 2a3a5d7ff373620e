//! Measurement values attached to regions.

use std::collections::{BTreeMap, HashMap};

/// One measurement column: region id → value.
///
/// Non finite values are stored but reported as missing by
/// [`Measurements::get`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measurements {
    values: HashMap<String, f64>,
}

impl Measurements {
    pub fn new() -> Self { Self::default() }

    /// Set the value of region `id`, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<String>, value: f64) {
        self.values.insert(id.into(), value);
    }

    /// The value of region `id`, or `None` if it is absent or not
    /// finite.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied().filter(|x| x.is_finite())
    }

    /// Number of stored entries (finite or not).
    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Measurements {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Measurements {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// A results table: several named [`Measurements`] columns.
#[derive(Clone, Debug, Default)]
pub struct MeasurementTable {
    columns: BTreeMap<String, Measurements>,
}

impl MeasurementTable {
    pub fn new() -> Self { Self::default() }

    /// Set the value of region `id` in `column`, creating the column
    /// if needed.
    pub fn insert(&mut self, column: &str, id: impl Into<String>, value: f64) {
        self.columns.entry(column.to_string()).or_default().insert(id, value);
    }

    /// The column called `name`, if any.
    pub fn column(&self, name: &str) -> Option<&Measurements> {
        self.columns.get(name)
    }

    /// Column names, sorted.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}
