use std::collections::{BTreeMap, BTreeSet};

use aer_wire::Fourcc;

use crate::value::Value;
use crate::warning::RecordWarning;

/// One chunk after TLV decoding: its identity, its tag → value mapping,
/// the URL strings its fields referenced, and any recoverable
/// conditions hit along the way.
///
/// A duplicate tag within one chunk overwrites the earlier value
/// (last-write-wins); the same tag in different chunks is independent.
/// URLs are collected at insertion time, so a URL value that is later
/// overwritten still counts as referenced: the set records everything
/// the chunk pointed at, not just its final state.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedRecord {
    pub index: usize,
    pub type_code: Fourcc,
    pub numeric_id: u64,
    pub fields: BTreeMap<Fourcc, Value>,
    pub urls: BTreeSet<String>,
    pub warnings: Vec<RecordWarning>,
}

impl DecodedRecord {
    #[must_use]
    pub fn new(index: usize, type_code: Fourcc, numeric_id: u64) -> Self {
        Self {
            index,
            type_code,
            numeric_id,
            fields: BTreeMap::new(),
            urls: BTreeSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Store a decoded value, overwriting any earlier value for the tag.
    /// Url values are also added to the record's URL set.
    pub fn insert(&mut self, tag: Fourcc, value: Value) {
        if let Value::Url(bytes) = &value {
            self.urls.insert(String::from_utf8_lossy(bytes).into_owned());
        }
        self.fields.insert(tag, value);
    }

    #[must_use]
    pub fn get(&self, tag: &[u8; 4]) -> Option<&Value> {
        self.fields.get(&Fourcc::new(*tag))
    }

    /// Lossy string view of a Text or Url field.
    #[must_use]
    pub fn text(&self, tag: &[u8; 4]) -> Option<String> {
        self.get(tag)?.as_text().map(std::borrow::Cow::into_owned)
    }

    #[must_use]
    pub fn double(&self, tag: &[u8; 4]) -> Option<f64> {
        self.get(tag)?.as_f64()
    }

    #[must_use]
    pub fn int(&self, tag: &[u8; 4]) -> Option<i32> {
        self.get(tag)?.as_i32()
    }

    #[must_use]
    pub fn bool(&self, tag: &[u8; 4]) -> Option<bool> {
        self.get(tag)?.as_bool()
    }

    #[must_use]
    pub fn ints(&self, tag: &[u8; 4]) -> Option<&[i32]> {
        self.get(tag)?.as_ints()
    }

    #[must_use]
    pub fn doubles(&self, tag: &[u8; 4]) -> Option<&[f64]> {
        self.get(tag)?.as_doubles()
    }

    /// True when decoding hit no truncation, corruption, or bad field.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
