//! Compatibility handling for the usage attribute.
//!
//! Older builds publish usage values that fold the library elements into the
//! usage (`java-runtime-jars`). Those are split into the canonical usage plus
//! an explicit library elements attribute before interning, so variants
//! published either way compare equal.

use std::sync::LazyLock;

use crate::attributes::attribute::{Attribute, AttributeValue};
use crate::attributes::factory::AttributesFactory;
use crate::attributes::set::AttributeSet;

pub const USAGE_ATTRIBUTE_NAME: &str = "org.gradle.usage";
pub const LIBRARY_ELEMENTS_ATTRIBUTE_NAME: &str = "org.gradle.libraryelements";

static USAGE: LazyLock<Attribute> =
    LazyLock::new(|| Attribute::named(USAGE_ATTRIBUTE_NAME, "Usage"));
static LIBRARY_ELEMENTS: LazyLock<Attribute> =
    LazyLock::new(|| Attribute::named(LIBRARY_ELEMENTS_ATTRIBUTE_NAME, "LibraryElements"));

/// `(deprecated usage, canonical usage, library elements)`
const DEPRECATED_USAGES: &[(&str, &str, &str)] = &[
    ("java-api-jars", "java-api", "jar"),
    ("java-api-classes", "java-api", "classes"),
    ("java-runtime-jars", "java-runtime", "jar"),
    ("java-runtime-classes", "java-runtime", "classes"),
    ("java-runtime-resources", "java-runtime", "resources"),
];

/// The usage attribute, `org.gradle.usage` of type `Usage`.
pub fn usage_attribute() -> Attribute {
    *USAGE
}

/// The library elements attribute, `org.gradle.libraryelements` of type
/// `LibraryElements`.
pub fn library_elements_attribute() -> Attribute {
    *LIBRARY_ELEMENTS
}

/// Rewrites deprecated usage values while interning.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageCompatibilityHandler;

impl UsageCompatibilityHandler {
    /// Whether the handler applies to `key`. Matches on name as well, so a
    /// string-typed `org.gradle.usage` is handled too.
    pub fn handles(key: &Attribute) -> bool {
        *key == usage_attribute() || key.name() == USAGE_ATTRIBUTE_NAME
    }

    /// The canonical `(usage, library elements)` for a deprecated usage value.
    pub fn canonical(usage: &str) -> Option<(&'static str, &'static str)> {
        DEPRECATED_USAGES
            .iter()
            .find(|(deprecated, _, _)| *deprecated == usage)
            .map(|(_, usage, elements)| (*usage, *elements))
    }

    pub(crate) fn concat(
        &self,
        factory: &AttributesFactory,
        node: &AttributeSet,
        key: Attribute,
        value: AttributeValue,
    ) -> AttributeSet {
        debug_assert!(Self::handles(&key), "not the usage attribute: {}", key);

        let Some((usage, elements)) = value.as_str().and_then(Self::canonical) else {
            return factory.intern(node, key, value);
        };

        tracing::debug!(
            "Replacing deprecated usage `{}` with `{}` and library elements `{}`",
            value,
            usage,
            elements
        );

        let with_usage = factory.intern(node, key, value.with_text(usage));
        factory.intern(
            &with_usage,
            library_elements_attribute(),
            value.with_text(elements),
        )
    }
}
