//! Attribute merge errors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::attributes::attribute::{Attribute, AttributeValue};
use crate::util::diagnostic::Diagnostic;

/// Two attribute sets disagree on the value of a shared attribute.
///
/// `left` comes from the first set passed to
/// [`safe_concat`](crate::attributes::AttributesFactory::safe_concat) and
/// `right` from the second.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("cannot merge attribute `{key}`: conflicting values `{left}` and `{right}`")]
#[diagnostic(
    code(attributes::merge_conflict),
    help("Make both sides request the same value for this attribute")
)]
pub struct AttributeMergeError {
    pub key: Attribute,
    pub left: AttributeValue,
    pub right: AttributeValue,
}

impl AttributeMergeError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(format!("conflicting values for attribute `{}`", self.key))
            .with_context(format!("one side requires `{}` = `{}`", self.key, self.left))
            .with_context(format!("the other requires `{}` = `{}`", self.key, self.right))
            .with_suggestion(format!(
                "Request a single value for `{}` on both sides",
                self.key
            ))
    }
}
