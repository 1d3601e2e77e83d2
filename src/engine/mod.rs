//! Engine plumbing for the terminal host

pub mod bridge;
pub mod clock;

pub use bridge::{check_balanced, Output, ScriptBridge, HUSH};
pub use clock::{StepClock, StepTick};
