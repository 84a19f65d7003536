//! Route tree builder.

use hexi_sdk::{DEFAULT_ROOT_NAME, RouteContribution};
use tracing::debug;

use super::tree::{NodeId, RouteNode, RouteTree};
use crate::error::RegistryError;
use crate::link::{self, LinkRecord};

/// The shell-owned route every plugin route ultimately hangs beneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSentinel {
    pub name: String,
    pub path: String,
}

fn default_root_path() -> String {
    "/".to_string()
}

impl RootSentinel {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Default for RootSentinel {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAME, default_root_path())
    }
}

/// Collects route contributions and links them into a [`RouteTree`].
///
/// Records are pushed in merged order (registration order of plugins, then
/// each plugin's own order). That order decides sibling order in the tree.
#[derive(Debug)]
pub struct RouteTreeBuilder {
    root: RootSentinel,
    records: Vec<(String, RouteContribution)>,
}

impl RouteTreeBuilder {
    pub fn new(root: RootSentinel) -> Self {
        Self {
            root,
            records: Vec::new(),
        }
    }

    /// Add one contribution from `plugin`.
    pub fn push(&mut self, plugin: &str, route: RouteContribution) {
        self.records.push((plugin.to_string(), route));
    }

    /// Add all of `plugin`'s contributions in order.
    pub fn extend(&mut self, plugin: &str, routes: impl IntoIterator<Item = RouteContribution>) {
        for route in routes {
            self.push(plugin, route);
        }
    }

    /// Validate, link and assemble the tree.
    pub fn build(self) -> Result<RouteTree, RegistryError> {
        for (plugin, route) in &self.records {
            validate(plugin, route)?;
        }

        let link_records: Vec<LinkRecord<'_>> = self
            .records
            .iter()
            .map(|(plugin, route)| LinkRecord {
                name: &route.name,
                parent: route.parent.as_deref(),
                plugin,
            })
            .collect();
        let links = link::link(&link_records, Some(&self.root.name))?;

        // Node 0 is the root; record `i` becomes node `i + 1`.
        let mut nodes = Vec::with_capacity(self.records.len() + 1);
        nodes.push(RouteNode {
            name: self.root.name,
            path: self.root.path,
            component: serde_json::Value::Null,
            meta: Default::default(),
            plugin: None,
            parent: None,
            children: links.top_level.iter().map(|i| NodeId(i + 1)).collect(),
        });

        for (idx, (plugin, route)) in self.records.into_iter().enumerate() {
            nodes.push(RouteNode {
                name: route.name,
                path: route.path,
                component: route.component,
                meta: route.meta,
                plugin: Some(plugin),
                parent: Some(links.parents[idx].map_or(NodeId(0), |p| NodeId(p + 1))),
                children: links.children[idx].iter().map(|c| NodeId(c + 1)).collect(),
            });
        }

        debug!(routes = nodes.len() - 1, "built route tree");
        Ok(RouteTree::from_nodes(nodes))
    }
}

fn validate(plugin: &str, route: &RouteContribution) -> Result<(), RegistryError> {
    if route.name.trim().is_empty() {
        return Err(RegistryError::malformed(plugin, &route.name, "name", "must not be empty"));
    }
    if route.path.is_empty() {
        return Err(RegistryError::malformed(plugin, &route.name, "path", "must not be empty"));
    }
    if !route.path.starts_with('/') {
        return Err(RegistryError::malformed(
            plugin,
            &route.name,
            "path",
            format!("'{}' must start with '/'", route.path),
        ));
    }
    if route.parent.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Err(RegistryError::malformed(
            plugin,
            &route.name,
            "parent",
            "must name a route or be omitted",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::link::MAX_DEPTH;

    fn route(name: &str, parent: Option<&str>) -> RouteContribution {
        let r = RouteContribution::new(name, format!("/{}", name.replace('.', "/")));
        match parent {
            Some(p) => r.parent(p),
            None => r,
        }
    }

    fn child_names<'a>(tree: &'a RouteTree, name: &str) -> Vec<&'a str> {
        let id = tree.id_of(name).unwrap();
        tree.children(id).map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn empty_builder_yields_root_only() {
        let tree = RouteTreeBuilder::new(RootSentinel::default()).build().unwrap();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.depth_first().count(), 1);
        assert_eq!(tree.root().name, DEFAULT_ROOT_NAME);
        assert!(tree.root().children().is_empty());
    }

    #[test]
    fn forward_reference_across_plugins() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::new("root", "/"));
        builder.push("b", route("root.child.grand", Some("root.child")));
        builder.push("a", route("root.child", Some("root")));
        let tree = builder.build().unwrap();

        assert_eq!(child_names(&tree, "root"), vec!["root.child"]);
        assert_eq!(child_names(&tree, "root.child"), vec!["root.child.grand"]);
        let grand = tree.id_of("root.child.grand").unwrap();
        assert_eq!(tree.ancestry(grand), vec!["root", "root.child", "root.child.grand"]);
    }

    #[test]
    fn none_parent_attaches_to_root() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::default());
        builder.push("a", route("top", None));
        let tree = builder.build().unwrap();

        let top = tree.id_of("top").unwrap();
        assert_eq!(tree.parent_of(top).unwrap().name, DEFAULT_ROOT_NAME);
    }

    #[test]
    fn payload_is_carried_unchanged() {
        let contributed = RouteContribution::new("cfg", "/core/cfg")
            .component(serde_json::json!({"file": "./Config/index.vue"}))
            .title("Config")
            .meta_value("icon", "gear");
        let mut builder = RouteTreeBuilder::new(RootSentinel::default());
        builder.push("input", contributed.clone());
        let tree = builder.build().unwrap();

        let node = tree.get("cfg").unwrap();
        assert_eq!(node.path, contributed.path);
        assert_eq!(node.component, contributed.component);
        assert_eq!(node.meta, contributed.meta);
        assert_eq!(node.title(), Some("Config"));
        assert_eq!(node.plugin.as_deref(), Some("input"));
    }

    #[test]
    fn siblings_follow_merged_order() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::new("root", "/"));
        builder.extend("a", [route("c", None), route("a", None)]);
        builder.extend("b", [route("b", None)]);
        let tree = builder.build().unwrap();
        assert_eq!(child_names(&tree, "root"), vec!["c", "a", "b"]);
    }

    #[test]
    fn depth_first_visits_every_node_once() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::new("root", "/"));
        builder.push("a", route("x", None));
        builder.push("a", route("x.y", Some("x")));
        builder.push("b", route("z", None));
        let tree = builder.build().unwrap();

        let walk: Vec<(usize, &str)> = tree
            .depth_first()
            .map(|(d, n)| (d, n.name.as_str()))
            .collect();
        assert_eq!(walk, vec![(0, "root"), (1, "x"), (2, "x.y"), (1, "z")]);
    }

    #[test]
    fn rejects_relative_path() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::default());
        builder.push("a", RouteContribution::new("bad", "core/bad"));
        let err = builder.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedContribution);
        assert!(err.to_string().contains("'path'"));
    }

    #[test]
    fn rejects_empty_name() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::default());
        builder.push("a", RouteContribution::new("", "/x"));
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MalformedContribution { field: "name", .. }
        ));
    }

    #[test]
    fn rejects_blank_parent() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::default());
        builder.push("a", RouteContribution::new("x", "/x").parent(" "));
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MalformedContribution { field: "parent", .. }
        ));
    }

    #[test]
    fn view_nests_children() {
        let mut builder = RouteTreeBuilder::new(RootSentinel::new("root", "/"));
        builder.push("a", route("x", None).title("X"));
        builder.push("a", route("x.y", Some("x")));
        let tree = builder.build().unwrap();

        let json = serde_json::to_value(tree.view()).unwrap();
        assert_eq!(json["name"], "root");
        assert_eq!(json["children"][0]["meta"]["title"], "X");
        assert_eq!(json["children"][0]["children"][0]["path"], "/x/y");
        assert!(json.get("plugin").is_none());
    }

    fn chain(depth: usize) -> RouteTreeBuilder {
        let mut builder = RouteTreeBuilder::new(RootSentinel::new("root", "/"));
        // Deepest first, so every parent is a forward reference.
        for i in (0..depth).rev() {
            let parent = if i == 0 { "root".to_string() } else { format!("n{}", i - 1) };
            let contribution = RouteContribution::new(format!("n{i}"), format!("/n{i}"));
            builder.push("a", contribution.parent(parent));
        }
        builder
    }

    #[test]
    fn chain_at_max_depth_builds_and_serializes() {
        let tree = chain(MAX_DEPTH).build().unwrap();
        assert_eq!(tree.len(), MAX_DEPTH);

        let deepest = tree.id_of(&format!("n{}", MAX_DEPTH - 1)).unwrap();
        assert_eq!(tree.ancestry(deepest).len(), MAX_DEPTH + 1);

        let json = serde_json::to_value(&tree).unwrap();
        let mut level = &json;
        for i in 0..MAX_DEPTH {
            level = &level["children"][0];
            assert_eq!(level["name"], format!("n{i}"));
        }
        assert_eq!(level["children"], serde_json::json!([]));
    }

    #[test]
    fn deep_chain_is_rejected_without_overflow() {
        let err = chain(5_000).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedContribution);
        assert!(err.to_string().contains(&format!("deeper than {MAX_DEPTH}")), "{err}");
    }
}
