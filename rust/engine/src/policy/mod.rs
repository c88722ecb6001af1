// src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod random;
mod scripted;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 */
pub use base::Policy;
pub use random::RandomPolicy;
pub use scripted::{ForwardPolicy, IdlePolicy};

/// Built-in policy selector, e.g. for command-line flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    Random,
    Forward,
    Idle,
}

impl PolicyKind {
    pub fn parse(name: &str) -> Option<Self> {
        let k = name.trim().to_ascii_lowercase();
        match k.as_str() {
            "random" | "rand" => Some(Self::Random),
            "forward" | "fwd" | "right" => Some(Self::Forward),
            "idle" | "noop" => Some(Self::Idle),
            _ => None,
        }
    }

    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            Self::Random => Box::new(RandomPolicy::new(seed)),
            Self::Forward => Box::new(ForwardPolicy::default()),
            Self::Idle => Box::new(IdlePolicy),
        }
    }
}
