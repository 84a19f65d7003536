//! Registry aggregation.
//!
//! The [`Aggregator`] enumerates every plugin in registration order, feeds the
//! route and menu builders and hands the shell a [`Composition`].

mod aggregator;
mod phase;

pub use aggregator::{Aggregator, Composition};
pub use phase::Phase;
