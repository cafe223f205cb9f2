//! Runtime type-name filtering
//!
//! A [`TypeFilter`] restricts capture to bindings of the requested runtime
//! types. The empty filter is "unrestricted": it accepts every type name,
//! never none.

use std::collections::BTreeSet;

/// An optional set of runtime type names to retain during capture.
///
/// Parsed from a whitespace-separated list, matching the names returned by
/// `Value::type_name` ("Int", "Float", "Array", ...).
///
/// # Example
///
/// ```
/// use worksnap_core::TypeFilter;
///
/// let filter = TypeFilter::parse("Int Array");
/// assert!(filter.accepts("Int"));
/// assert!(!filter.accepts("String"));
///
/// let all = TypeFilter::unrestricted();
/// assert!(all.accepts("String"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    names: BTreeSet<String>,
}

impl TypeFilter {
    /// A filter that accepts every type name.
    pub fn unrestricted() -> Self {
        TypeFilter::default()
    }

    /// Parse a whitespace-separated list of type names.
    ///
    /// A blank or empty string yields the unrestricted filter.
    pub fn parse(list: &str) -> Self {
        TypeFilter {
            names: list.split_whitespace().map(String::from).collect(),
        }
    }

    /// Build a filter from explicit names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeFilter {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this filter accepts every type name.
    pub fn is_unrestricted(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a binding of this runtime type should be retained.
    pub fn accepts(&self, type_name: &str) -> bool {
        self.names.is_empty() || self.names.contains(type_name)
    }
}

impl From<&str> for TypeFilter {
    fn from(list: &str) -> Self {
        TypeFilter::parse(list)
    }
}
