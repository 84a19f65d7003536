//! Aggregation run phases.

use std::fmt;

/// Lifecycle of one aggregation run.
///
/// `Idle -> Collecting -> Validating -> {Ready | Failed}`. Collection may also
/// fail directly. Terminal phases never go back to `Collecting`; a fresh run
/// starts from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Collecting,
    Validating,
    Ready,
    Failed,
}

impl Phase {
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Collecting)
                | (Phase::Collecting, Phase::Validating)
                | (Phase::Collecting, Phase::Failed)
                | (Phase::Validating, Phase::Ready)
                | (Phase::Validating, Phase::Failed)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Collecting => "collecting",
            Phase::Validating => "validating",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}
