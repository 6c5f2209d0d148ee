use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::matcher::Matcher;

/// Represents any value an expectation can be made about.
///
/// Ordinary Rust values convert into a `Value` through `From`, so call sites
/// rarely name the variants directly. Absent values (`None`, `()`) become
/// [`Value::Nil`] rather than disappearing, which keeps them inspectable by
/// matchers such as [`to_be_nil`](crate::matchers::to_be_nil).
///
/// # Examples
///
/// ```rust
/// use expectations::Value;
/// let n = Value::from(3);
/// assert_eq!(n.type_name(), "int");
/// let s = Value::from("hello");
/// assert_eq!(s.type_name(), "string");
/// let nil = Value::from(None::<i32>);
/// assert!(nil.is_nil());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Record(Record),
    /// A shared, nullable reference. Clones share the referent, so
    /// [`Value::is_identical`] can tell them apart from equal copies.
    Ref(Option<Arc<Value>>),
    Matcher(Matcher),
}

impl Value {
    /// Wraps `value` in a fresh shared reference.
    pub fn reference(value: impl Into<Value>) -> Self {
        Value::Ref(Some(Arc::new(value.into())))
    }

    /// A reference that currently points at nothing.
    pub fn null_ref() -> Self {
        Value::Ref(None)
    }

    /// Returns the runtime type name used in diagnostics, e.g. `1 (int)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use expectations::{Record, Value};
    /// assert_eq!(Value::from(true).type_name(), "bool");
    /// assert_eq!(Value::from(Record::new("Point")).type_name(), "Point");
    /// assert_eq!(Value::reference(1).type_name(), "&int");
    /// ```
    pub fn type_name(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Uint(_) => "uint".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::String(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::Record(record) => record.name.clone(),
            Value::Ref(Some(inner)) => format!("&{}", inner.type_name()),
            Value::Ref(None) => "ref".to_string(),
            Value::Matcher(_) => "matcher".to_string(),
        }
    }

    /// Returns true for nil and for a reference holding no referent.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil | Value::Ref(None))
    }

    /// Returns the length of values that have one, `None` for everything else.
    ///
    /// Strings count characters. References report the length of their referent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use expectations::Value;
    /// assert_eq!(Value::from(vec![1, 2]).len(), Some(2));
    /// assert_eq!(Value::from("héllo").len(), Some(5));
    /// assert_eq!(Value::from(7).len(), None);
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            Value::Ref(Some(inner)) => inner.len(),
            _ => None,
        }
    }

    /// Shallow equality: primitives compare by value, references by identity,
    /// and containers element by element using the same rule.
    ///
    /// `==` is the deep counterpart and follows references.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Ref(Some(a)), Value::Ref(Some(b))) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_identical(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.is_identical(vb))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.name == b.name
                    && a.fields.len() == b.fields.len()
                    && a
                        .fields
                        .iter()
                        .zip(&b.fields)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.is_identical(vb))
            }
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            (Value::Matcher(a), Value::Matcher(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil | Value::Ref(None) => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Map(entries) => f.debug_map().entries(entries).finish(),
            Value::Record(record) => fmt::Debug::fmt(record, f),
            Value::Ref(Some(inner)) => {
                f.write_str("&")?;
                fmt::Debug::fmt(&**inner, f)
            }
            Value::Matcher(matcher) => fmt::Debug::fmt(matcher, f),
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// A named collection of fields, the dynamic counterpart of a struct.
///
/// ```rust
/// use expectations::{Record, Value};
/// let point = Value::from(Record::new("Point").field("x", 1).field("y", 2));
/// assert_eq!(format!("{point:?}"), "Point { x: 1, y: 2 }");
/// ```
#[derive(Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field. Field order is kept for rendering and comparison.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(&self.name);
        for (name, value) in &self.fields {
            out.field(name, value);
        }
        out.finish()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Int(i64::from(n))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Uint(u64::from(n))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        // isize is at most 64 bits on every supported target
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Uint(n as u64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(entries: HashMap<K, V, S>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Arc<Value>> for Value {
    fn from(shared: Arc<Value>) -> Self {
        Value::Ref(Some(shared))
    }
}

impl From<Matcher> for Value {
    fn from(matcher: Matcher) -> Self {
        Value::Matcher(matcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_become_nil() {
        assert!(Value::from(None::<String>).is_nil());
        assert!(Value::from(()).is_nil());
        assert!(Value::null_ref().is_nil());
        assert!(!Value::reference(0).is_nil());
        assert!(!Value::from(0).is_nil());
    }

    #[test]
    fn test_debug_rendering_shows_structure() {
        let list = Value::from(vec!["Foo"]);
        assert_eq!(format!("{list:?}"), r#"["Foo"]"#);

        let mut map = BTreeMap::new();
        map.insert("a", 1);
        assert_eq!(format!("{:?}", Value::from(map)), r#"{"a": 1}"#);

        assert_eq!(format!("{:?}", Value::reference("x")), r#"&"x""#);
        assert_eq!(format!("{:?}", Value::from(1.5)), "1.5");
        assert_eq!(format!("{:?}", Value::Nil), "nil");
    }

    #[test]
    fn test_identity_differs_from_equality_for_references() {
        let shared = Value::reference(vec![1, 2]);
        let alias = shared.clone();
        let copy = Value::reference(vec![1, 2]);

        assert!(shared.is_identical(&alias));
        assert!(!shared.is_identical(&copy));
        assert_eq!(shared, copy);
    }

    #[test]
    fn test_integer_kinds_are_distinct() {
        assert_ne!(Value::from(1i32), Value::from(1u32));
        assert_ne!(Value::from(1), Value::from(1.0));
        assert_eq!(Value::from(1i8), Value::from(1i64));
    }

    #[test]
    fn test_record_field_lookup() {
        let record = Record::new("Point").field("x", 1);
        assert_eq!(record.get("x"), Some(&Value::Int(1)));
        assert_eq!(record.get("y"), None);
        assert_eq!(record.name(), "Point");
    }
}
