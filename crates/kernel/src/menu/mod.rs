//! Sidebar menu assembly.
//!
//! Menu entries are collected from plugins alongside their routes. Observed
//! usage is a flat list, but entries may name a parent entry and are then
//! nested with the same linking rules as routes.

mod builder;

pub use builder::{MenuEntry, MenuList, MenuTreeBuilder};
