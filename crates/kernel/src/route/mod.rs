//! Route tree assembly.
//!
//! Plugins contribute flat route records that name their parent. The builder
//! links them beneath the shell's root sentinel and produces a [`RouteTree`]
//! the router walks to register navigable paths.

mod builder;
mod tree;

pub use builder::{RootSentinel, RouteTreeBuilder};
pub use tree::{DepthFirst, NodeId, RouteNode, RouteTree, RouteView};
