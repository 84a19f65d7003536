//! Arena-backed route tree.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};

/// Index of a node within a [`RouteTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A resolved route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteNode {
    pub name: String,
    pub path: String,
    pub component: serde_json::Value,
    pub meta: BTreeMap<String, serde_json::Value>,
    /// Contributing plugin; `None` for the root sentinel.
    pub plugin: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl RouteNode {
    /// The `meta.title` value, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.meta.get("title").and_then(|v| v.as_str())
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The composed route tree. The root sentinel is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
    by_name: HashMap<String, NodeId>,
}

impl RouteTree {
    pub(crate) fn from_nodes(nodes: Vec<RouteNode>) -> Self {
        let by_name = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.name.clone(), NodeId(idx)))
            .collect();
        Self { nodes, by_name }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &RouteNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.0]
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&RouteNode> {
        self.by_name.get(name).map(|id| self.node(*id))
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Child routes of `id`, in first-seen order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &RouteNode> {
        self.node(id).children.iter().map(|c| self.node(*c))
    }

    pub fn parent_of(&self, id: NodeId) -> Option<&RouteNode> {
        self.node(id).parent.map(|p| self.node(p))
    }

    /// First route whose path equals `path`.
    pub fn find_by_path(&self, path: &str) -> Option<&RouteNode> {
        self.depth_first()
            .map(|(_, node)| node)
            .find(|node| node.path == path)
    }

    /// Pre-order walk from the root, yielding each node with its depth.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: vec![(0, self.root_id())],
        }
    }

    /// Names from the root down to `id`, inclusive.
    pub fn ancestry(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names
    }

    /// Number of contributed routes. The root sentinel is not counted.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True when no plugin contributed a route.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nested, serializable view of the tree.
    ///
    /// Views are assembled bottom-up in reverse pre-order, which places every
    /// child ahead of its parent.
    pub fn view(&self) -> RouteView<'_> {
        let mut preorder = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root_id()];
        while let Some(id) = stack.pop() {
            preorder.push(id);
            stack.extend(self.node(id).children.iter().rev());
        }

        let mut views: Vec<Option<RouteView<'_>>> = self.nodes.iter().map(|_| None).collect();
        for id in preorder.into_iter().rev().filter(|id| *id != self.root_id()) {
            let view = self.view_node(id, &mut views);
            views[id.0] = Some(view);
        }
        self.view_node(self.root_id(), &mut views)
    }

    fn view_node<'a>(
        &'a self,
        id: NodeId,
        built: &mut [Option<RouteView<'a>>],
    ) -> RouteView<'a> {
        let node = self.node(id);
        RouteView {
            name: &node.name,
            path: &node.path,
            component: &node.component,
            meta: &node.meta,
            plugin: node.plugin.as_deref(),
            children: node
                .children
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect(),
        }
    }
}

impl Serialize for RouteTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}

/// Pre-order iterator over a [`RouteTree`].
pub struct DepthFirst<'a> {
    tree: &'a RouteTree,
    stack: Vec<(usize, NodeId)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a RouteNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = self.tree.node(id);
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, *child));
        }
        Some((depth, node))
    }
}

/// Nested route as handed to the router.
#[derive(Debug, Serialize)]
pub struct RouteView<'a> {
    pub name: &'a str,
    pub path: &'a str,
    pub component: &'a serde_json::Value,
    #[serde(skip_serializing_if = "meta_is_empty")]
    pub meta: &'a BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<&'a str>,
    pub children: Vec<RouteView<'a>>,
}

fn meta_is_empty(meta: &&BTreeMap<String, serde_json::Value>) -> bool {
    meta.is_empty()
}
