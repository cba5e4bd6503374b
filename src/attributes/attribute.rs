//! Attribute keys and isolated attribute values.

use std::fmt;
use std::sync::Arc;

use crate::util::InternedString;

/// Declared value type of an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    String,
    Boolean,
    Integer,
    /// A named object type such as `Usage` or `LibraryElements`
    Named(InternedString),
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => f.write_str("String"),
            AttributeType::Boolean => f.write_str("Boolean"),
            AttributeType::Integer => f.write_str("Integer"),
            AttributeType::Named(name) => f.write_str(name),
        }
    }
}

/// A named, typed attribute key.
///
/// Two attributes are equal when both their name and declared type match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: InternedString,
    ty: AttributeType,
}

impl Attribute {
    pub fn new(name: impl AsRef<str>, ty: AttributeType) -> Self {
        Attribute {
            name: InternedString::new(name),
            ty,
        }
    }

    pub fn string(name: impl AsRef<str>) -> Self {
        Attribute::new(name, AttributeType::String)
    }

    pub fn boolean(name: impl AsRef<str>) -> Self {
        Attribute::new(name, AttributeType::Boolean)
    }

    pub fn integer(name: impl AsRef<str>) -> Self {
        Attribute::new(name, AttributeType::Integer)
    }

    /// An attribute whose values are instances of the named type `type_name`.
    pub fn named(name: impl AsRef<str>, type_name: impl AsRef<str>) -> Self {
        Attribute::new(name, AttributeType::Named(InternedString::new(type_name)))
    }

    #[inline]
    pub fn name(&self) -> InternedString {
        self.name
    }

    #[inline]
    pub fn ty(&self) -> AttributeType {
        self.ty
    }

    /// Whether `value` may be stored under this attribute.
    ///
    /// Named attributes also accept plain strings; the two representations
    /// are stored as given and never compare equal.
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        matches!(
            (self.ty, value),
            (AttributeType::String, AttributeValue::String(_))
                | (AttributeType::Boolean, AttributeValue::Boolean(_))
                | (AttributeType::Integer, AttributeValue::Integer(_))
                | (AttributeType::Named(_), AttributeValue::Named(_))
                | (AttributeType::Named(_), AttributeValue::String(_))
        )
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An immutable snapshot of an attribute value.
///
/// Values own their content, so a set can hold them without aliasing
/// anything the caller may later change. Equality is by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    String(Arc<str>),
    Boolean(bool),
    Integer(i64),
    /// An instance of a named type, identified by its name
    Named(InternedString),
}

impl AttributeValue {
    pub fn string(value: impl AsRef<str>) -> Self {
        AttributeValue::String(Arc::from(value.as_ref()))
    }

    pub fn named(name: impl AsRef<str>) -> Self {
        AttributeValue::Named(InternedString::new(name))
    }

    /// The textual content of string and named values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(&**s),
            AttributeValue::Named(name) => Some(name.as_str()),
            AttributeValue::Boolean(_) | AttributeValue::Integer(_) => None,
        }
    }

    /// A value with different text but the same representation as `self`.
    ///
    /// Only meaningful for string and named values.
    pub(crate) fn with_text(&self, text: &str) -> AttributeValue {
        match self {
            AttributeValue::Named(_) => AttributeValue::named(text),
            _ => AttributeValue::string(text),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::string(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(Arc::from(value))
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}
