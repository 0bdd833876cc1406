//! # Browser nodes
//!
//! A [`BrowserNode`](crate::node::BrowserNode) is either a **leaf** wrapping one catalog object or an
//! **interior** node holding named children. Interior children come in two shapes, fixed
//! when the node is built:
//!
//! - [`Children::Ordered`](crate::node::Children::Ordered): a sequence kept in the order it was
//!   built (e.g. nearest star first). Duplicate names are kept positionally.
//! - [`Children::Unordered`](crate::node::Children::Unordered): a name-keyed map. Inserting a
//!   name twice keeps the last node.
//!
//! ```text
//! Stars                               (interior, unordered)
//! ├── Nearest Stars                   (interior, ordered)
//! │   ├── Sol                         (leaf)
//! │   └── Proxima Centauri            (leaf)
//! └── Stars with Planets              (interior, ordered)
//!     └── Sol                         (leaf)
//! ```
//!
//! Children are shared through `Arc`, so a branch built once (the absolute magnitude star
//! list) can hang under several parents. Nodes are immutable once built.
use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;

use crate::catalog::ObjectHandle;
use crate::constants::ObjectName;

/// Child collection of an interior node.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    Ordered(Vec<(ObjectName, Arc<BrowserNode>)>),
    Unordered(HashMap<ObjectName, Arc<BrowserNode>>),
}

impl Children {
    pub fn len(&self) -> usize {
        match self {
            Children::Ordered(list) => list.len(),
            Children::Unordered(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, Children::Ordered(_))
    }
}

/// Shape of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf(ObjectHandle),
    Interior(Children),
}

/// One entry of the browser tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserNode {
    name: ObjectName,
    secondary_name: Option<String>,
    kind: NodeKind,
}

/// A child as shown by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserItem {
    pub name: ObjectName,
    pub node: Arc<BrowserNode>,
    pub is_leaf: bool,
}

impl BrowserNode {
    pub fn leaf(name: impl Into<String>, object: ObjectHandle) -> Self {
        BrowserNode {
            name: name.into(),
            secondary_name: None,
            kind: NodeKind::Leaf(object),
        }
    }

    /// Interior node keeping `children` in the given order.
    pub fn ordered<I>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = (ObjectName, Arc<BrowserNode>)>,
    {
        BrowserNode {
            name: name.into(),
            secondary_name: None,
            kind: NodeKind::Interior(Children::Ordered(children.into_iter().collect())),
        }
    }

    /// Interior node keyed by child name. On duplicate names the last child wins.
    pub fn unordered<I>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = (ObjectName, Arc<BrowserNode>)>,
    {
        BrowserNode {
            name: name.into(),
            secondary_name: None,
            kind: NodeKind::Interior(Children::Unordered(children.into_iter().collect())),
        }
    }

    pub fn with_secondary_name(mut self, secondary_name: impl Into<String>) -> Self {
        self.secondary_name = Some(secondary_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secondary_name(&self) -> Option<&str> {
        self.secondary_name.as_deref()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Object wrapped by a leaf, `None` for interior nodes.
    pub fn leaf_object(&self) -> Option<ObjectHandle> {
        match self.kind {
            NodeKind::Leaf(object) => Some(object),
            NodeKind::Interior(_) => None,
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(&self.kind, NodeKind::Interior(children) if children.is_ordered())
    }

    /// Number of children, 0 for a leaf.
    pub fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Interior(children) => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children as `(name, node)` pairs.
    ///
    /// Ordered nodes yield their stored order; unordered nodes yield map order, which is
    /// unspecified. Use [`listing`](BrowserNode::listing) for a stable display order.
    pub fn children(&self) -> Box<dyn Iterator<Item = (&str, &Arc<BrowserNode>)> + '_> {
        match &self.kind {
            NodeKind::Leaf(_) => Box::new(std::iter::empty()),
            NodeKind::Interior(Children::Ordered(list)) => {
                Box::new(list.iter().map(|(name, node)| (name.as_str(), node)))
            }
            NodeKind::Interior(Children::Unordered(map)) => {
                Box::new(map.iter().map(|(name, node)| (name.as_str(), node)))
            }
        }
    }

    /// Child named `name`; the first match for ordered nodes.
    pub fn child(&self, name: &str) -> Option<&Arc<BrowserNode>> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Interior(Children::Ordered(list)) => {
                list.iter().find(|(n, _)| n == name).map(|(_, node)| node)
            }
            NodeKind::Interior(Children::Unordered(map)) => map.get(name),
        }
    }

    /// Children in display order.
    ///
    /// Ordered nodes keep their order. Unordered nodes are sorted by name, case-insensitively
    /// first and then byte-wise, so the listing is stable across runs.
    pub fn listing(&self) -> Vec<BrowserItem> {
        let items = self.children().map(|(name, node)| BrowserItem {
            name: name.to_string(),
            node: Arc::clone(node),
            is_leaf: node.is_leaf(),
        });

        if self.is_ordered() {
            items.collect()
        } else {
            items
                .sorted_by_cached_key(|item| (item.name.to_lowercase(), item.name.clone()))
                .collect()
        }
    }
}
