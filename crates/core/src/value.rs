//! Value types for Worksnap
//!
//! This module defines the canonical [`Value`] type for all workspace
//! bindings. Eight data variants cover everything a snapshot can persist;
//! six further variants represent live host objects (modules, callables,
//! open file handles, stack frames, type objects, generators) that only
//! exist inside a running session.
//!
//! Live variants are skipped by serde. Serializing any value that contains
//! one — at any nesting depth — fails at serialization time, which is what
//! the classifier's dry-run probe relies on: an `Array` of numbers with one
//! generator buried inside it is structurally fine at the top level but is
//! proven unserializable by an actual encode attempt.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Canonical value model for workspace bindings.
///
/// ## Data variants
///
/// 1. `Null` - absence of value
/// 2. `Bool` - boolean true or false
/// 3. `Int` - 64-bit signed integer
/// 4. `Float` - 64-bit IEEE-754 floating point
/// 5. `String` - UTF-8 encoded string
/// 6. `Bytes` - arbitrary binary data (distinct from String)
/// 7. `Array` - ordered sequence of values
/// 8. `Object` - string-keyed map of values
///
/// ## Live variants
///
/// `Module`, `Callable`, `File`, `Frame`, `TypeObject`, and `Generator`
/// carry a [`HostHandle`] to a host-owned object. They have no persisted
/// representation and fail any serialization attempt.
///
/// ## Equality rules
///
/// - Different variants are never equal (no type coercion):
///   `Int(1)` != `Float(1.0)`
/// - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
/// - Live variants compare by reference identity of their handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absence of value
    Null,

    /// Boolean true or false
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    /// Supports: NaN, +Inf, -Inf, -0.0, subnormals
    Float(f64),

    /// UTF-8 encoded string
    String(String),

    /// Arbitrary binary data
    /// NOT equivalent to String - distinct type
    Bytes(Vec<u8>),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed map of values
    Object(BTreeMap<String, Value>),

    /// Reference to a loaded module
    #[serde(skip)]
    Module(HostHandle),

    /// Callable object (function, closure, bound method)
    #[serde(skip)]
    Callable(HostHandle),

    /// Open file handle
    #[serde(skip)]
    File(HostHandle),

    /// Stack frame
    #[serde(skip)]
    Frame(HostHandle),

    /// Type object
    #[serde(skip)]
    TypeObject(HostHandle),

    /// Generator object
    #[serde(skip)]
    Generator(HostHandle),
}

impl Value {
    /// Returns the runtime type name, as matched by a
    /// [`TypeFilter`](crate::TypeFilter).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Module(_) => "Module",
            Value::Callable(_) => "Callable",
            Value::File(_) => "File",
            Value::Frame(_) => "Frame",
            Value::TypeObject(_) => "TypeObject",
            Value::Generator(_) => "Generator",
        }
    }

    /// The excluded structural category of this value's top level, if any.
    ///
    /// Data variants return `None`. The check is structural (on the variant),
    /// never on a user-supplied name, and inspects only the top level:
    /// a container holding a live value still returns `None` here and is
    /// left for the serialization probe to reject.
    pub fn category(&self) -> Option<Category> {
        match self {
            Value::Module(_) => Some(Category::Module),
            Value::Callable(_) => Some(Category::Callable),
            Value::File(_) => Some(Category::File),
            Value::Frame(_) => Some(Category::Frame),
            Value::TypeObject(_) => Some(Category::TypeObject),
            Value::Generator(_) => Some(Category::Generator),
            _ => None,
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as byte slice
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as array
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// A module reference with a diagnostic label, e.g. `"numpy"`.
    pub fn module(label: impl Into<String>) -> Self {
        Value::Module(HostHandle::new(label))
    }

    /// A callable with a diagnostic label.
    pub fn callable(label: impl Into<String>) -> Self {
        Value::Callable(HostHandle::new(label))
    }

    /// An open file handle with a diagnostic label.
    pub fn file(label: impl Into<String>) -> Self {
        Value::File(HostHandle::new(label))
    }

    /// A stack frame with a diagnostic label.
    pub fn frame(label: impl Into<String>) -> Self {
        Value::Frame(HostHandle::new(label))
    }

    /// A type object with a diagnostic label.
    pub fn type_object(label: impl Into<String>) -> Self {
        Value::TypeObject(HostHandle::new(label))
    }

    /// A generator with a diagnostic label.
    pub fn generator(label: impl Into<String>) -> Self {
        Value::Generator(HostHandle::new(label))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
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

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

/// Structural categories that are never eligible for persistence.
///
/// These either have no meaningful persisted representation or their live
/// identity cannot be reconstructed from a snapshot. Membership is decided
/// by the [`Value`] variant, regardless of any type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Loaded module
    Module,
    /// Function, closure, or bound method
    Callable,
    /// Open file handle
    File,
    /// Stack frame
    Frame,
    /// Type object
    TypeObject,
    /// Generator object
    Generator,
}

impl Category {
    /// Short lowercase name for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Module => "module",
            Category::Callable => "callable",
            Category::File => "file handle",
            Category::Frame => "stack frame",
            Category::TypeObject => "type object",
            Category::Generator => "generator",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared reference to a live host object.
///
/// Cloning a handle shares the underlying allocation, so clones compare
/// equal (reference identity). Two handles created separately are never
/// equal, even with the same label.
#[derive(Debug, Clone)]
pub struct HostHandle {
    inner: Arc<HostObject>,
}

#[derive(Debug)]
struct HostObject {
    label: String,
}

impl HostHandle {
    /// Create a handle with a diagnostic label (e.g. the module name).
    pub fn new(label: impl Into<String>) -> Self {
        HostHandle {
            inner: Arc::new(HostObject {
                label: label.into(),
            }),
        }
    }

    /// Diagnostic label supplied at creation.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Whether two handles refer to the same host object.
    pub fn ptr_eq(a: &HostHandle, b: &HostHandle) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl PartialEq for HostHandle {
    fn eq(&self, other: &Self) -> bool {
        HostHandle::ptr_eq(self, other)
    }
}

impl Eq for HostHandle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(1).type_name(), "Int");
        assert_eq!(Value::Array(vec![]).type_name(), "Array");
        assert_eq!(Value::module("numpy").type_name(), "Module");
        assert_eq!(Value::generator("gen").type_name(), "Generator");
    }

    #[test]
    fn test_category_is_top_level_only() {
        assert_eq!(Value::module("m").category(), Some(Category::Module));
        assert_eq!(Value::file("data.csv").category(), Some(Category::File));
        assert_eq!(Value::Int(1).category(), None);

        // A container hiding a live value has no top-level category;
        // the serialization probe is responsible for rejecting it.
        let sneaky = Value::Array(vec![Value::Int(1), Value::generator("g")]);
        assert_eq!(sneaky.category(), None);
    }

    #[test]
    fn test_no_type_coercion() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(
            Value::String("abc".to_string()),
            Value::Bytes(vec![97, 98, 99])
        );
    }

    #[test]
    fn test_float_ieee_equality() {
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
    }

    #[test]
    fn test_handle_identity() {
        let h = HostHandle::new("numpy");
        let clone = h.clone();
        assert_eq!(h, clone);

        let other = HostHandle::new("numpy");
        assert_ne!(h, other);
        assert_eq!(other.label(), "numpy");
    }

    #[test]
    fn test_live_variants_refuse_serialization() {
        let mut buf = Vec::new();
        assert!(rmp_serde::encode::write_named(&mut buf, &Value::Int(1)).is_ok());
        assert!(rmp_serde::encode::write_named(&mut buf, &Value::module("numpy")).is_err());

        // Nested live values poison the whole container.
        let nested = Value::Array(vec![Value::Int(1), Value::file("log.txt")]);
        assert!(rmp_serde::encode::write_named(&mut buf, &nested).is_err());
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from("hi"), Value::String("hi".to_string()));
        assert_eq!(
            Value::from(vec![Value::Int(1)]),
            Value::Array(vec![Value::Int(1)])
        );
    }
}
