//! Hexi Shell Kernel Library
//!
//! Composes the navigation contributed by feature plugins: a route tree
//! rooted at the shell's layout page and the sidebar menu list. The main
//! entry point for composing from the command line is the `hexi` binary.

pub mod config;
pub mod error;
mod link;
pub mod menu;
pub mod plugin;
pub mod registry;
pub mod route;

pub use config::{NamespacePolicy, RegistryConfig};
pub use error::{Capability, ErrorKind, RegistryError};
pub use link::MAX_DEPTH;
pub use registry::{Aggregator, Composition};
