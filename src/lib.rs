//! Variant attributes - interned attribute sets for variant-aware
//! dependency resolution.
//!
//! This crate provides the attribute model used when matching build-output
//! variants: immutable, identity-shared attribute sets, the operators that
//! merge them, and the registry of describers that explain resolution
//! failures to users.

pub mod attributes;
pub mod resolution;
pub mod util;

pub use attributes::{
    Attribute, AttributeMergeError, AttributeSet, AttributeType, AttributeValue,
    AttributesFactory,
};
pub use resolution::{FailureDescriberRegistry, ResolutionFailure, ResolutionFailureKind};
pub use util::{Config, Diagnostic};
