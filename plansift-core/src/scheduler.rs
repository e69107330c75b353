/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Timer facility the upload widget schedules against.
///
/// The browser host satisfies this with `setInterval`/`setTimeout` style
/// timers; tests use [`VirtualScheduler`] so timing is deterministic.
/// Cancelling an already fired or unknown handle is a no-op.
pub trait Scheduler {
    /// Schedules a repeating timer firing every `interval_ms`.
    fn schedule_repeating(&mut self, interval_ms: u32) -> TimerId;

    /// Schedules a one-shot timer firing after `delay_ms`.
    fn schedule_once(&mut self, delay_ms: u32) -> TimerId;

    /// Cancels a scheduled timer.
    fn cancel(&mut self, id: TimerId);
}

/// A single timer expiry reported by [`VirtualScheduler::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    pub id: TimerId,
    pub at_ms: u64,
}

#[derive(Debug, Clone)]
struct TimerEntry {
    id: TimerId,
    due_ms: u64,
    // Some for repeating timers, None for one-shots.
    interval_ms: Option<u64>,
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Nothing fires on its own; callers move time forward with
/// [`advance`](VirtualScheduler::advance) or one expiry at a time with
/// [`step`](VirtualScheduler::step) and react to the returned fires.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    next_id: u64,
    timers: Vec<TimerEntry>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advances the clock to the next expiry at or before `deadline_ms` and
    /// returns it, or moves the clock to the deadline when nothing is due.
    ///
    /// Stepping one expiry at a time lets the caller cancel or reschedule
    /// timers between fires, the way a real event loop interleaves them.
    pub fn step(&mut self, deadline_ms: u64) -> Option<TimerFire> {
        let next = match self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= deadline_ms)
            .min_by_key(|(index, entry)| (entry.due_ms, *index))
            .map(|(index, _)| index)
        {
            Some(index) => index,
            None => {
                self.now_ms = deadline_ms;
                return None;
            }
        };

        let fire = {
            let entry = &mut self.timers[next];
            let fire = TimerFire {
                id: entry.id,
                at_ms: entry.due_ms,
            };
            if let Some(interval) = entry.interval_ms {
                entry.due_ms += interval;
            }
            fire
        };
        if self.timers[next].interval_ms.is_none() {
            self.timers.remove(next);
        }
        self.now_ms = fire.at_ms;
        Some(fire)
    }

    /// Advances the clock by `ms`, returning every expiry in order.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerFire> {
        let deadline_ms = self.now_ms + ms;
        let mut fires = Vec::new();
        while let Some(fire) = self.step(deadline_ms) {
            fires.push(fire);
        }
        fires
    }

    fn allocate(&mut self, due_ms: u64, interval_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(TimerEntry {
            id,
            due_ms,
            interval_ms,
        });
        id
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_repeating(&mut self, interval_ms: u32) -> TimerId {
        // A zero interval would never let `advance` terminate.
        let interval = u64::from(interval_ms.max(1));
        self.allocate(self.now_ms + interval, Some(interval))
    }

    fn schedule_once(&mut self, delay_ms: u32) -> TimerId {
        self.allocate(self.now_ms + u64::from(delay_ms), None)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|entry| entry.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once_at_due_time() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.schedule_once(500);

        assert_eq!(scheduler.advance(499), vec![]);
        assert_eq!(
            scheduler.advance(1),
            vec![TimerFire { id, at_ms: 500 }]
        );
        assert_eq!(scheduler.advance(10_000), vec![]);
    }

    #[test]
    fn repeating_fires_every_interval() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.schedule_repeating(100);

        let fires = scheduler.advance(350);
        assert_eq!(
            fires,
            vec![
                TimerFire { id, at_ms: 100 },
                TimerFire { id, at_ms: 200 },
                TimerFire { id, at_ms: 300 },
            ]
        );
        assert_eq!(scheduler.now_ms(), 350);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = VirtualScheduler::new();
        let repeating = scheduler.schedule_repeating(100);
        let one_shot = scheduler.schedule_once(150);

        scheduler.cancel(repeating);
        assert_eq!(
            scheduler.advance(1_000),
            vec![TimerFire {
                id: one_shot,
                at_ms: 150
            }]
        );
    }

    #[test]
    fn fires_interleave_in_time_order() {
        let mut scheduler = VirtualScheduler::new();
        let repeating = scheduler.schedule_repeating(100);
        let one_shot = scheduler.schedule_once(250);

        let fires = scheduler.advance(300);
        assert_eq!(
            fires,
            vec![
                TimerFire {
                    id: repeating,
                    at_ms: 100
                },
                TimerFire {
                    id: repeating,
                    at_ms: 200
                },
                TimerFire {
                    id: one_shot,
                    at_ms: 250
                },
                TimerFire {
                    id: repeating,
                    at_ms: 300
                },
            ]
        );
    }

    #[test]
    fn step_allows_cancelling_between_fires() {
        let mut scheduler = VirtualScheduler::new();
        let repeating = scheduler.schedule_repeating(100);

        let first = scheduler.step(1_000).unwrap();
        assert_eq!(first.id, repeating);
        scheduler.cancel(repeating);
        assert_eq!(scheduler.step(1_000), None);
    }
}
