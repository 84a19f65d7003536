//! Menu builder - validates menu contributions and orders them for the sidebar.

use hexi_sdk::MenuContribution;
use serde::Serialize;
use tracing::debug;

use crate::error::RegistryError;
use crate::link::{self, LinkRecord, Links};

/// A validated sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub name: String,
    /// Link key; by convention the path of the route the entry opens.
    pub index: String,
    pub title: String,
    /// Plugin that contributed this entry.
    pub plugin: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
}

/// Ordered menu entries for the sidebar renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuList {
    entries: Vec<MenuEntry>,
}

impl MenuList {
    /// Top-level entries in first-seen order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Every entry, parents before their children.
    pub fn flatten(&self) -> Vec<&MenuEntry> {
        let mut out = Vec::new();
        let mut stack: Vec<&MenuEntry> = self.entries.iter().rev().collect();
        while let Some(entry) = stack.pop() {
            out.push(entry);
            stack.extend(entry.children.iter().rev());
        }
        out
    }

    pub fn get(&self, name: &str) -> Option<&MenuEntry> {
        self.flatten().into_iter().find(|e| e.name == name)
    }

    /// Total number of entries at every level.
    pub fn len(&self) -> usize {
        self.flatten().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects menu contributions and produces a [`MenuList`].
#[derive(Debug, Default)]
pub struct MenuTreeBuilder {
    records: Vec<(String, MenuContribution)>,
}

impl MenuTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, plugin: &str, menu: MenuContribution) {
        self.records.push((plugin.to_string(), menu));
    }

    pub fn extend(&mut self, plugin: &str, menus: impl IntoIterator<Item = MenuContribution>) {
        for menu in menus {
            self.push(plugin, menu);
        }
    }

    /// Validate and order the collected entries.
    pub fn build(self) -> Result<MenuList, RegistryError> {
        for (plugin, menu) in &self.records {
            validate(plugin, menu)?;
        }

        let link_records: Vec<LinkRecord<'_>> = self
            .records
            .iter()
            .map(|(plugin, menu)| LinkRecord {
                name: &menu.name,
                parent: menu.parent.as_deref(),
                plugin,
            })
            .collect();
        let links = link::link(&link_records, None)?;

        let count = self.records.len();
        let entries = assemble(self.records, &links);

        debug!(menus = count, "built menu list");
        Ok(MenuList { entries })
    }
}

/// Build entries bottom-up: reverse breadth-first order puts every child
/// ahead of its parent.
fn assemble(records: Vec<(String, MenuContribution)>, links: &Links) -> Vec<MenuEntry> {
    let mut built: Vec<Option<MenuEntry>> = records
        .into_iter()
        .map(|(plugin, menu)| {
            Some(MenuEntry {
                name: menu.name,
                index: menu.index,
                title: menu.title,
                plugin,
                children: Vec::new(),
            })
        })
        .collect();

    for &idx in links.breadth_first.iter().rev() {
        let children: Vec<MenuEntry> = links.children[idx]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        if let Some(entry) = built[idx].as_mut() {
            entry.children = children;
        }
    }

    links
        .top_level
        .iter()
        .filter_map(|&idx| built[idx].take())
        .collect()
}

fn validate(plugin: &str, menu: &MenuContribution) -> Result<(), RegistryError> {
    if menu.name.trim().is_empty() {
        return Err(RegistryError::malformed(plugin, &menu.name, "name", "must not be empty"));
    }
    if menu.index.is_empty() {
        return Err(RegistryError::malformed(plugin, &menu.name, "index", "must not be empty"));
    }
    if !menu.index.starts_with('/') || menu.index.chars().any(char::is_whitespace) {
        return Err(RegistryError::malformed(
            plugin,
            &menu.name,
            "index",
            format!("'{}' is not shaped like a route path", menu.index),
        ));
    }
    if menu.title.trim().is_empty() {
        return Err(RegistryError::malformed(plugin, &menu.name, "title", "must not be empty"));
    }
    if menu.parent.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Err(RegistryError::malformed(
            plugin,
            &menu.name,
            "parent",
            "must name a menu entry or be omitted",
        ));
    }
    Ok(())
}
