//! Two-pass parent linking shared by the route and menu builders.
//!
//! Pass one indexes every record by name; pass two resolves each `parent`
//! through the index. Because nothing is linked until everything is indexed,
//! a record may name a parent that appears later in the merged sequence.
//! Cycles are found by walking parent links with a visited set.
//!
//! Nesting is capped at [`MAX_DEPTH`] levels below the root so that every
//! later walk over the tree, serialization included, stays shallow.

use std::collections::HashMap;

use crate::error::{RegistryError, SHELL_OWNER};

/// Deepest allowed nesting; top-level records sit at depth 1.
pub const MAX_DEPTH: usize = 64;

/// The linkage-relevant view of one contribution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinkRecord<'a> {
    pub name: &'a str,
    pub parent: Option<&'a str>,
    pub plugin: &'a str,
}

/// Result of linking: parent and child indices into the record slice.
///
/// A `None` parent means the record hangs directly beneath the root (or is
/// top level, for trees without a sentinel).
#[derive(Debug)]
pub(crate) struct Links {
    pub parents: Vec<Option<usize>>,
    pub children: Vec<Vec<usize>>,
    pub top_level: Vec<usize>,
    /// Every record, parents before children, siblings in first-seen order.
    pub breadth_first: Vec<usize>,
}

/// Index, link and verify `records`.
///
/// `root` is the reserved sentinel name, if any: no record may take it, and a
/// parent equal to it attaches the record to the root. Children keep the
/// order in which they appear in `records`.
pub(crate) fn link(
    records: &[LinkRecord<'_>],
    root: Option<&str>,
) -> Result<Links, RegistryError> {
    let index = index_by_name(records, root)?;

    let mut parents = Vec::with_capacity(records.len());
    for record in records {
        let parent = match record.parent {
            None => None,
            Some(parent) if Some(parent) == root => None,
            Some(parent) => match index.get(parent) {
                Some(&idx) => Some(idx),
                None => {
                    return Err(RegistryError::UnresolvedParent {
                        name: record.name.to_string(),
                        parent: parent.to_string(),
                        plugin: record.plugin.to_string(),
                    });
                }
            },
        };
        parents.push(parent);
    }

    detect_cycles(records, &parents)?;

    let mut children = vec![Vec::new(); records.len()];
    let mut top_level = Vec::new();
    for (idx, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(idx),
            None => top_level.push(idx),
        }
    }

    let breadth_first = check_depth(records, &children, &top_level)?;

    Ok(Links {
        parents,
        children,
        top_level,
        breadth_first,
    })
}

fn index_by_name<'a>(
    records: &[LinkRecord<'a>],
    root: Option<&str>,
) -> Result<HashMap<&'a str, usize>, RegistryError> {
    let mut index = HashMap::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let taken_by_root = root == Some(record.name);
        if taken_by_root || index.insert(record.name, idx).is_some() {
            let mut plugins = Vec::new();
            if taken_by_root {
                plugins.push(SHELL_OWNER.to_string());
            }
            for other in records.iter().filter(|r| r.name == record.name) {
                if !plugins.iter().any(|p| p == other.plugin) {
                    plugins.push(other.plugin.to_string());
                }
            }
            return Err(RegistryError::DuplicateName {
                name: record.name.to_string(),
                plugins,
            });
        }
    }

    Ok(index)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Rooted,
}

fn detect_cycles(
    records: &[LinkRecord<'_>],
    parents: &[Option<usize>],
) -> Result<(), RegistryError> {
    let mut state = vec![Visit::Unseen; records.len()];

    for start in 0..records.len() {
        let mut path = Vec::new();
        let mut current = Some(start);

        while let Some(idx) = current {
            match state[idx] {
                Visit::Rooted => break,
                Visit::OnPath => {
                    let pos = path.iter().position(|&p| p == idx).unwrap_or(0);
                    return Err(cycle_error(records, &path[pos..]));
                }
                Visit::Unseen => {
                    state[idx] = Visit::OnPath;
                    path.push(idx);
                    current = parents[idx];
                }
            }
        }

        for idx in path {
            state[idx] = Visit::Rooted;
        }
    }

    Ok(())
}

/// Order records breadth first and reject any nested deeper than [`MAX_DEPTH`].
///
/// Runs after cycle detection, so every record is reachable from `top_level`.
fn check_depth(
    records: &[LinkRecord<'_>],
    children: &[Vec<usize>],
    top_level: &[usize],
) -> Result<Vec<usize>, RegistryError> {
    let mut depth = vec![1; records.len()];
    let mut order = top_level.to_vec();
    order.reserve(records.len() - top_level.len());

    let mut cursor = 0;
    while cursor < order.len() {
        let idx = order[cursor];
        for &child in &children[idx] {
            depth[child] = depth[idx] + 1;
            order.push(child);
        }
        cursor += 1;
    }

    if let Some(idx) = (0..records.len()).find(|&idx| depth[idx] > MAX_DEPTH) {
        let record = &records[idx];
        return Err(RegistryError::malformed(
            record.plugin,
            record.name,
            "parent",
            format!("nested deeper than {MAX_DEPTH} levels"),
        ));
    }

    Ok(order)
}

fn cycle_error(records: &[LinkRecord<'_>], members: &[usize]) -> RegistryError {
    let names = members
        .iter()
        .map(|&idx| records[idx].name.to_string())
        .collect();

    let mut plugins: Vec<String> = Vec::new();
    for &idx in members {
        let plugin = records[idx].plugin;
        if !plugins.iter().any(|p| p == plugin) {
            plugins.push(plugin.to_string());
        }
    }

    RegistryError::Cycle { names, plugins }
}
