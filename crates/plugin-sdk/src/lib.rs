//! Hexi Plugin SDK
//!
//! Contribution types and the [`ContributionSource`] trait that feature
//! plugins implement to extend the shell's routes and sidebar.

pub mod source;
pub mod types;

pub use source::{ContributionError, ContributionSource};
pub use types::{MenuContribution, RouteContribution};

/// Name of the shell's layout route that all plugin routes hang beneath.
///
/// A route whose `parent` is this name (or `None`) attaches to the root.
pub const DEFAULT_ROOT_NAME: &str = "hexiLayoutPage";

pub mod prelude {
    pub use crate::DEFAULT_ROOT_NAME;
    pub use crate::source::{ContributionError, ContributionSource};
    pub use crate::types::*;
}
