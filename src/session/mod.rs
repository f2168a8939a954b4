//! Session control: level progression, countdown and deferred tasks.
//!
//! - `SessionController`: owns the state and drives every transition
//! - `Scheduler`: cancellable one-shot and repeating tasks on a virtual clock
//! - `Hud`: counters for display

pub mod controller;
pub mod hud;
pub mod scheduler;

pub use controller::{Acknowledgement, SessionController};
pub use hud::{format_clock, Hud};
pub use scheduler::{Scheduler, TaskHandle};
