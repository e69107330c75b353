use thiserror::Error;

use crate::config::SimulationConfig;

/// Generation marker for one file selection.
///
/// Every selection gets a fresh token; a read result carrying an older
/// token is ignored, so a slow read can never clobber a newer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadToken(u64);

/// The single error kind this widget models. Everything else anomalous
/// (no file in the event, unauthorized attempt) is a no-op, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("failed to read file: {0}")]
    Failed(String),
}

/// The file currently driving the widget, generic over the host's raw
/// file handle (`gloo::file::File` in the browser, anything cloneable in
/// tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub handle: F,
}

/// Lifecycle of one selection. The payload lives inside the phase so a
/// simulation without a payload, or a pending notification without a
/// completed run, cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Reading { token: ReadToken },
    Simulating { payload: String },
    /// Progress reached 100. `pending` holds the payload until the
    /// post-completion delay elapses and the caller is notified.
    Completed { pending: Option<String> },
}

/// External stimulus applied to the machine.
///
/// Drag/drop/input events are gated on the `authorized` argument of
/// [`UploadMachine::apply`]; read completion and timer expiries are
/// internal follow-ups and ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<F> {
    /// File picker selection changed. `None` when the change event
    /// carried no file.
    InputChange(Option<SelectedFile<F>>),
    DragEnter,
    DragOver,
    DragLeave,
    /// Drop payload, reduced to its first file if any.
    Drop(Option<SelectedFile<F>>),
    /// The asynchronous read finished with a data URL or an error.
    ReadFinished {
        token: ReadToken,
        result: Result<String, ReadError>,
    },
    /// The repeating progress ticker fired.
    Tick,
    /// The post-completion delay elapsed.
    DelayElapsed,
}

/// Instruction for the host, returned from [`UploadMachine::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<F> {
    /// Begin an asynchronous read of `file`, reporting back with
    /// [`Event::ReadFinished`] and the same token.
    Read { token: ReadToken, file: F },
    /// Start the repeating progress ticker. Never emitted while another
    /// ticker is live; a `StopTicker` always precedes it if needed.
    StartTicker { interval_ms: u32 },
    /// Cancel the repeating ticker.
    StopTicker,
    /// Schedule the one-shot delay before notifying the caller.
    ScheduleCompletion { delay_ms: u32 },
    /// Cancel a pending completion delay (a new selection superseded it).
    CancelCompletion,
    /// Invoke the completion callback with the encoded payload.
    Notify { payload: String },
}

/// Drag-and-drop upload widget state machine.
///
/// The machine owns all widget state and decides every transition; the
/// host owns the actual timers and the file read, and must cancel any
/// timers it still holds when the widget is torn down. Progress is an
/// integer percentage, non-decreasing within a run and frozen at 100
/// until the next selection.
#[derive(Debug)]
pub struct UploadMachine<F> {
    config: SimulationConfig,
    phase: Phase,
    file: Option<SelectedFile<F>>,
    progress: u8,
    dragging: bool,
    ticker_active: bool,
    next_token: u64,
}

impl<F: Clone> UploadMachine<F> {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            file: None,
            progress: 0,
            dragging: false,
            ticker_active: false,
            next_token: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn file(&self) -> Option<&SelectedFile<F>> {
        self.file.as_ref()
    }

    /// Current progress percentage, 0 to 100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Whether a drag interaction is hovering the drop target.
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn ticker_active(&self) -> bool {
        self.ticker_active
    }

    /// Applies one event and returns the effects the host must run, in
    /// order. `authorized` is the externally owned sign-in flag; it gates
    /// the user-facing entry points only.
    pub fn apply(&mut self, event: Event<F>, authorized: bool) -> Vec<Effect<F>> {
        match event {
            Event::DragEnter | Event::DragOver => {
                // Unauthorized users get no drag affordance.
                if authorized {
                    self.dragging = true;
                }
                Vec::new()
            }
            Event::DragLeave => {
                // Ungated so the drop target can never stick in its
                // dragging visual state.
                self.dragging = false;
                Vec::new()
            }
            Event::Drop(file) => {
                self.dragging = false;
                if !authorized {
                    return Vec::new();
                }
                match file {
                    Some(file) => self.select(file),
                    None => Vec::new(),
                }
            }
            Event::InputChange(file) => {
                if !authorized {
                    return Vec::new();
                }
                match file {
                    Some(file) => self.select(file),
                    None => Vec::new(),
                }
            }
            Event::ReadFinished { token, result } => self.read_finished(token, result),
            Event::Tick => self.tick(),
            Event::DelayElapsed => self.delay_elapsed(),
        }
    }

    /// Replaces any current selection with `file` and kicks off its read.
    fn select(&mut self, file: SelectedFile<F>) -> Vec<Effect<F>> {
        let token = ReadToken(self.next_token);
        self.next_token += 1;
        log::debug!("selected file {:?}", file.name);

        let handle = file.handle.clone();
        self.file = Some(file);
        self.progress = 0;
        let previous = std::mem::replace(&mut self.phase, Phase::Reading { token });

        let mut effects = Vec::new();
        if self.ticker_active {
            self.ticker_active = false;
            effects.push(Effect::StopTicker);
        }
        if matches!(previous, Phase::Completed { pending: Some(_) }) {
            effects.push(Effect::CancelCompletion);
        }
        effects.push(Effect::Read {
            token,
            file: handle,
        });
        effects
    }

    fn read_finished(&mut self, token: ReadToken, result: Result<String, ReadError>) -> Vec<Effect<F>> {
        match self.phase {
            Phase::Reading { token: current } if current == token => {}
            _ => {
                log::debug!("ignoring read result from a superseded selection");
                return Vec::new();
            }
        }

        match result {
            Ok(payload) => self.begin_simulation(payload),
            Err(error) => {
                // Silent reset back to the pre-selection baseline; the
                // user has to re-select.
                log::warn!("file read failed: {error}");
                self.file = None;
                self.progress = 0;
                self.phase = Phase::Idle;
                if self.ticker_active {
                    self.ticker_active = false;
                    vec![Effect::StopTicker]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn begin_simulation(&mut self, payload: String) -> Vec<Effect<F>> {
        let mut effects = Vec::new();
        // Cancel-then-start keeps at most one ticker alive.
        if self.ticker_active {
            self.ticker_active = false;
            effects.push(Effect::StopTicker);
        }
        self.progress = 0;
        self.phase = Phase::Simulating { payload };
        self.ticker_active = true;
        effects.push(Effect::StartTicker {
            interval_ms: self.config.tick_interval_ms,
        });
        effects
    }

    fn tick(&mut self) -> Vec<Effect<F>> {
        let payload = match &self.phase {
            Phase::Simulating { payload } => payload.clone(),
            // A tick arriving outside a simulation is stale; drop it.
            _ => return Vec::new(),
        };

        self.progress = self
            .progress
            .saturating_add(self.config.progress_step)
            .min(100);
        if self.progress < 100 {
            return Vec::new();
        }

        self.ticker_active = false;
        self.phase = Phase::Completed {
            pending: Some(payload),
        };
        vec![
            Effect::StopTicker,
            Effect::ScheduleCompletion {
                delay_ms: self.config.completion_delay_ms,
            },
        ]
    }

    fn delay_elapsed(&mut self) -> Vec<Effect<F>> {
        if let Phase::Completed { pending } = &mut self.phase {
            // `take` makes the notification fire at most once per run.
            if let Some(payload) = pending.take() {
                return vec![Effect::Notify { payload }];
            }
        }
        Vec::new()
    }
}
