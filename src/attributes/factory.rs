//! Interning and merging of attribute sets.
//!
//! [`AttributesFactory`] is the only way to build non-empty sets. It
//! guarantees that extending a set with a content-equal pair returns the
//! identical instance, and provides the merge operators used during variant
//! matching:
//!
//! - [`concat`](AttributesFactory::concat): fill in missing attributes from a
//!   fallback set
//! - [`safe_concat`](AttributesFactory::safe_concat): union two sets that
//!   must agree on shared attributes
//! - [`from_map`](AttributesFactory::from_map): build a set from loose entries

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::attributes::attribute::{Attribute, AttributeValue};
use crate::attributes::error::AttributeMergeError;
use crate::attributes::set::AttributeSet;
use crate::attributes::usage::UsageCompatibilityHandler;
use crate::util::config::AttributesConfig;

/// Builds interned attribute sets.
///
/// The factory owns the root of its interning tree, and every node built
/// from that root stays cached until the factory is dropped. Sets handed out
/// remain valid after that; they only lose their parent link.
///
/// The factory is `Sync` and meant to be shared by every resolution thread.
#[derive(Debug)]
pub struct AttributesFactory {
    root: AttributeSet,
    usage: Option<UsageCompatibilityHandler>,
    nodes_created: AtomicUsize,
}

impl AttributesFactory {
    /// Create a factory with usage compatibility enabled.
    pub fn new() -> Self {
        AttributesFactory::with_config(&AttributesConfig::default())
    }

    pub fn with_config(config: &AttributesConfig) -> Self {
        AttributesFactory {
            root: AttributeSet::root(),
            usage: config
                .usage_compatibility()
                .then_some(UsageCompatibilityHandler),
            nodes_created: AtomicUsize::new(0),
        }
    }

    /// The empty set at the root of this factory's tree.
    pub fn root(&self) -> AttributeSet {
        self.root.clone()
    }

    /// A set holding the single pair `(key, value)`.
    pub fn of(&self, key: Attribute, value: AttributeValue) -> AttributeSet {
        self.concat_value(&self.root, key, value)
    }

    /// `node` with `(key, value)` applied, replacing any entry of the same
    /// name.
    ///
    /// The value must already match the key's declared type.
    pub fn concat_value(
        &self,
        node: &AttributeSet,
        key: Attribute,
        value: AttributeValue,
    ) -> AttributeSet {
        match &self.usage {
            Some(handler) if UsageCompatibilityHandler::handles(&key) => {
                handler.concat(self, node, key, value)
            }
            _ => self.intern(node, key, value),
        }
    }

    /// Intern without any special-key handling.
    pub(crate) fn intern(
        &self,
        node: &AttributeSet,
        key: Attribute,
        value: AttributeValue,
    ) -> AttributeSet {
        debug_assert!(
            key.accepts(&value),
            "value `{}` does not match type {} of attribute `{}`",
            value,
            key.ty(),
            key
        );

        node.child(key, value, || {
            self.nodes_created.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Interned new attribute node under {}", node);
        })
    }

    /// Merge two sets, preferring `primary` on shared attribute names.
    ///
    /// Attributes of `fallback` are added in its structural order, and only
    /// when `primary` has no attribute of the same name.
    pub fn concat(&self, fallback: &AttributeSet, primary: &AttributeSet) -> AttributeSet {
        if fallback.is_empty() {
            return primary.clone();
        }
        if primary.is_empty() {
            return fallback.clone();
        }

        let mut current = primary.clone();
        for (key, value) in fallback.entries() {
            if !current.contains_name(&key.name()) {
                current = self.intern(&current, *key, value.clone());
            }
        }
        current
    }

    /// Merge two sets that must agree on every shared attribute name.
    ///
    /// Keys are checked in `left`'s structural order and the first
    /// disagreement is reported.
    pub fn safe_concat(
        &self,
        left: &AttributeSet,
        right: &AttributeSet,
    ) -> Result<AttributeSet, AttributeMergeError> {
        if left.is_empty() {
            return Ok(right.clone());
        }
        if right.is_empty() {
            return Ok(left.clone());
        }

        let mut current = right.clone();
        for (key, value) in left.entries() {
            if let Some((_, existing)) = current.find_entry(&key.name()) {
                if existing != value {
                    return Err(AttributeMergeError {
                        key: *key,
                        left: value.clone(),
                        right: existing.clone(),
                    });
                }
            }
            current = self.intern(&current, *key, value.clone());
        }
        Ok(current)
    }

    /// Build a set from loose entries.
    ///
    /// Each entry is merged as the *fallback* over the set built so far, so
    /// when two entries share a name the earlier one wins. Conflict reporting
    /// downstream relies on this order.
    pub fn from_map<I>(&self, entries: I) -> AttributeSet
    where
        I: IntoIterator<Item = (Attribute, AttributeValue)>,
    {
        entries
            .into_iter()
            .fold(self.root(), |result, (key, value)| {
                self.concat(&self.of(key, value), &result)
            })
    }

    /// Number of nodes this factory has constructed.
    ///
    /// Children are cached on the node they extend, so extending a set that
    /// came from another factory grows that factory's tree while the count
    /// is kept here.
    pub fn nodes_created(&self) -> usize {
        self.nodes_created.load(Ordering::Relaxed)
    }
}

impl Default for AttributesFactory {
    fn default() -> Self {
        Self::new()
    }
}
