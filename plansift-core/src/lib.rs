//! Core state machine for the Plansift upload widget.
//!
//! The widget itself (rendering, DOM events, real timers) lives in
//! `plansift-frontend`; this crate holds everything with ordering or
//! lifetime concerns so it can be tested off the wasm target:
//!
//! - [`UploadMachine`]: the idle → reading → simulating → completed
//!   lifecycle of one file selection, gated by an externally owned
//!   authorization flag. Events go in, [`Effect`]s come out, and the host
//!   interprets the effects against its own timer and file-reading
//!   facilities.
//! - [`SimulationConfig`]: tick interval, per-tick progress step and
//!   post-completion delay for the simulated analysis progress.
//! - [`Scheduler`] and [`VirtualScheduler`]: a timer abstraction with a
//!   deterministic virtual-clock implementation used by the test suite.

mod config;
mod machine;
mod scheduler;

pub use config::{
    ConfigError, SimulationConfig, PROGRESS_INTERVAL_MS, PROGRESS_STEP, REDIRECT_DELAY_MS,
};
pub use machine::{Effect, Event, Phase, ReadError, ReadToken, SelectedFile, UploadMachine};
pub use scheduler::{Scheduler, TimerFire, TimerId, VirtualScheduler};
