//! Match rules.
//!
//! Transition functions that turn flip requests into state changes:
//! - Which flips are legal
//! - When two picks are a pair
//! - When a level's pairs are all found
//!
//! Timing (how long a mismatch stays visible) is the session's concern.

pub mod engine;

pub use engine::{flip, resolve_mismatch, FlipOutcome, IgnoredFlip};
