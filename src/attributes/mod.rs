//! Attribute sets describing build-output variants.
//!
//! Sets are immutable and interned: building the same set along the same
//! path always returns the same instance, so variant matching can compare
//! sets by identity before falling back to content.

pub mod attribute;
pub mod error;
pub mod factory;
pub mod set;
pub mod usage;

pub use attribute::{Attribute, AttributeType, AttributeValue};
pub use error::AttributeMergeError;
pub use factory::AttributesFactory;
pub use set::AttributeSet;
pub use usage::{library_elements_attribute, usage_attribute, UsageCompatibilityHandler};
