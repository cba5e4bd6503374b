//! Immutable, structurally shared attribute sets.
//!
//! Every set is a node in a tree rooted at an empty set owned by an
//! [`AttributesFactory`](crate::attributes::AttributesFactory). A node is its
//! parent's mapping with one `(key, value)` pair applied. Each node owns the
//! children derived from it, so extending the same node with the same pair
//! always yields the same instance for as long as the tree exists.
//!
//! Children are looked up without locking: the child list is an immutable
//! snapshot swapped atomically. Creating a child takes a mutex owned by the
//! parent node only, so unrelated nodes never contend. Children hold their
//! parent weakly; the tree is owned from the root down.

use std::fmt;
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::attributes::attribute::{Attribute, AttributeValue};

/// An immutable set of attributes.
///
/// Cloning is cheap and keeps the same instance; use [`AttributeSet::ptr_eq`]
/// to compare identity and `==` to compare content.
#[derive(Clone)]
pub struct AttributeSet(Arc<Node>);

struct Node {
    parent: Weak<Node>,
    /// Full mapping, in root-to-leaf order of first insertion
    entries: Vec<(Attribute, AttributeValue)>,
    children: ArcSwap<Vec<Child>>,
    write_lock: Mutex<()>,
}

/// A known child, tagged with the pair that produced it.
#[derive(Clone)]
struct Child {
    key: Attribute,
    value: AttributeValue,
    node: AttributeSet,
}

impl Node {
    fn root() -> Self {
        Node {
            parent: Weak::new(),
            entries: Vec::new(),
            children: ArcSwap::from_pointee(Vec::new()),
            write_lock: Mutex::new(()),
        }
    }

    fn child_of(parent: &AttributeSet, key: Attribute, value: AttributeValue) -> Self {
        let mut entries = parent.0.entries.clone();
        match entries.iter_mut().find(|(k, _)| k.name() == key.name()) {
            Some(slot) => *slot = (key, value),
            None => entries.push((key, value)),
        }

        Node {
            parent: Arc::downgrade(&parent.0),
            entries,
            children: ArcSwap::from_pointee(Vec::new()),
            write_lock: Mutex::new(()),
        }
    }
}

fn find_child(children: &[Child], key: &Attribute, value: &AttributeValue) -> Option<AttributeSet> {
    children
        .iter()
        .find(|c| c.key == *key && c.value == *value)
        .map(|c| c.node.clone())
}

impl AttributeSet {
    /// A fresh empty root with no children.
    pub(crate) fn root() -> AttributeSet {
        AttributeSet(Arc::new(Node::root()))
    }

    /// Return the unique child of this node for `(key, value)`, creating it
    /// on first request. `on_create` runs only when a node is built.
    pub(crate) fn child(
        &self,
        key: Attribute,
        value: AttributeValue,
        on_create: impl FnOnce(),
    ) -> AttributeSet {
        if let Some(child) = find_child(&self.0.children.load(), &key, &value) {
            return child;
        }

        let _guard = self.0.write_lock.lock();
        let current = self.0.children.load_full();
        // Someone may have published the child while we waited for the lock.
        if let Some(child) = find_child(&current, &key, &value) {
            return child;
        }

        let child = AttributeSet(Arc::new(Node::child_of(self, key, value.clone())));
        on_create();

        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        next.push(Child {
            key,
            value,
            node: child.clone(),
        });
        self.0.children.store(Arc::new(next));

        child
    }

    /// Whether both handles refer to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &AttributeSet) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Only the root is empty: every other node holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.0.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.entries.len()
    }

    /// The node this set was derived from. `None` for a root, or once the
    /// factory owning the tree has been dropped.
    pub fn parent(&self) -> Option<AttributeSet> {
        self.0.parent.upgrade().map(AttributeSet)
    }

    /// Keys in structural order.
    pub fn keys(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.0.entries.iter().map(|(k, _)| k)
    }

    /// Entries in structural order.
    pub fn entries(&self) -> impl Iterator<Item = (&Attribute, &AttributeValue)> + '_ {
        self.0.entries.iter().map(|(k, v)| (k, v))
    }

    /// The value stored under exactly `key` (name and type).
    pub fn get(&self, key: &Attribute) -> Option<&AttributeValue> {
        self.0
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// The entry whose key has the given name, whatever its type.
    pub fn find_entry(&self, name: &str) -> Option<(&Attribute, &AttributeValue)> {
        self.0
            .entries
            .iter()
            .find(|(k, _)| k.name() == name)
            .map(|(k, v)| (k, v))
    }

    pub fn contains(&self, key: &Attribute) -> bool {
        self.get(key).is_some()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.find_entry(name).is_some()
    }

    #[cfg(test)]
    pub(crate) fn child_count(&self) -> usize {
        self.0.children.load().len()
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len() && self.entries().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for AttributeSet {}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
