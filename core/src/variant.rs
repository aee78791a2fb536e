//! Type-erased wire values exchanged with the IPC transport.
//!
//! A [`Variant`] is the closed set of value shapes the transport can carry.
//! Lists are typed: a list of one concrete scalar kind travels as the
//! matching `*List` variant, a list of maps as [`Variant::DictionaryList`],
//! and anything without a single concrete element type as the
//! heterogeneous [`Variant::VariantList`] fallback. A typed list never
//! mixes element types; the codec enforces that invariant on encode.

use std::collections::BTreeMap;

/// The boundary map type exchanged for property and state updates.
pub type VariantDictionary = BTreeMap<String, Variant>;

/// A type-erased value crossing the process boundary.
///
/// # Examples
///
/// ```
/// use device_commands_core::Variant;
///
/// let v = Variant::from("ready");
/// assert_eq!(v, Variant::String("ready".to_string()));
/// assert_eq!(v.type_name(), "string");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Dictionary(VariantDictionary),
    BoolList(Vec<bool>),
    IntList(Vec<i64>),
    DoubleList(Vec<f64>),
    StringList(Vec<String>),
    DictionaryList(Vec<VariantDictionary>),
    /// Heterogeneous fallback for empty lists and lists of lists.
    VariantList(Vec<Variant>),
}

impl Variant {
    /// Stable runtime type descriptor, carried in decode errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Dictionary(_) => "dictionary",
            Self::BoolList(_) => "list<boolean>",
            Self::IntList(_) => "list<integer>",
            Self::DoubleList(_) => "list<double>",
            Self::StringList(_) => "list<string>",
            Self::DictionaryList(_) => "list<dictionary>",
            Self::VariantList(_) => "list<variant>",
        }
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<VariantDictionary> for Variant {
    fn from(value: VariantDictionary) -> Self {
        Self::Dictionary(value)
    }
}
