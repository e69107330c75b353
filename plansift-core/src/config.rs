use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default interval between simulated progress ticks.
pub const PROGRESS_INTERVAL_MS: u32 = 100;

/// Default progress gained per tick, in percentage points.
pub const PROGRESS_STEP: u8 = 10;

/// Default pause between reaching 100% and notifying the caller.
pub const REDIRECT_DELAY_MS: u32 = 500;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tick interval must be greater than zero")]
    InvalidInterval,

    #[error("progress step must be between 1 and 100")]
    InvalidStep,
}

/// Timing parameters for the simulated analysis progress.
///
/// The step should evenly (or near-evenly) divide 100 so the final tick
/// lands cleanly on 100%; any remainder is clamped there.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub tick_interval_ms: u32,
    pub progress_step: u8,
    pub completion_delay_ms: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: PROGRESS_INTERVAL_MS,
            progress_step: PROGRESS_STEP,
            completion_delay_ms: REDIRECT_DELAY_MS,
        }
    }
}

impl SimulationConfig {
    /// Creates a validated configuration.
    pub fn new(
        tick_interval_ms: u32,
        progress_step: u8,
        completion_delay_ms: u32,
    ) -> Result<Self, ConfigError> {
        if tick_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if progress_step == 0 || progress_step > 100 {
            return Err(ConfigError::InvalidStep);
        }
        Ok(Self {
            tick_interval_ms,
            progress_step,
            completion_delay_ms,
        })
    }

    /// Number of ticks needed to reach 100% from a fresh start.
    pub fn ticks_to_complete(&self) -> u32 {
        (100 + u32::from(self.progress_step) - 1) / u32::from(self.progress_step)
    }
}
