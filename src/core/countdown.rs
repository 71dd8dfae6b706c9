//! Live "time left until target" with an owned, cancellable ticking task.
//!
//! The timer evaluates once when started or retargeted, then once per tick
//! period on a tokio task. Reaching the target ends the task; `stop`,
//! `retarget`, `invalidate` and `Drop` abort it. At most one ticking task
//! exists per timer.

use crate::errors::ClockError;
use crate::models::countdown::{CountdownPhase, CountdownSnapshot};
use chrono::{DateTime, Local, TimeDelta};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Source of "now" for countdown evaluation.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub struct CountdownTimer {
    clock: Arc<dyn Clock>,
    period: Duration,
    state: Arc<watch::Sender<CountdownSnapshot>>,
    task: Option<JoinHandle<()>>,
    /// Bumped on every cancellation; a ticker only publishes for its own generation.
    generation: Arc<AtomicU64>,
}

impl CountdownTimer {
    pub fn new(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (state, _) = watch::channel(CountdownSnapshot::idle());
        Self {
            clock,
            period,
            state: Arc::new(state),
            task: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CountdownSnapshot {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> CountdownPhase {
        self.state.borrow().phase.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.state.subscribe()
    }

    /// Whether a ticking task is scheduled right now.
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Count down to `target`. Must be called inside a tokio runtime.
    pub fn start(&mut self, target: DateTime<Local>) {
        self.cancel();
        let snap = self.evaluate(target);
        let running = snap.phase == CountdownPhase::Running;
        self.state.send_replace(snap);

        if running {
            self.spawn_ticker(target);
        }
    }

    /// Replace the target. A stopped, elapsed or invalid timer resumes
    /// ticking when the new target is still ahead.
    pub fn retarget(&mut self, target: DateTime<Local>) {
        self.start(target);
    }

    /// Stop ticking; the last state stays published. Idempotent.
    pub fn stop(&mut self) {
        self.cancel();
    }

    /// Stop ticking and publish `err` as the terminal state.
    pub fn invalidate(&mut self, err: ClockError) {
        self.cancel();
        let tick = self.state.borrow().tick + 1;
        self.state.send_replace(CountdownSnapshot {
            phase: CountdownPhase::Invalid(err),
            target: None,
            remaining: TimeDelta::zero(),
            tick,
        });
    }

    fn evaluate(&self, target: DateTime<Local>) -> CountdownSnapshot {
        let tick = self.state.borrow().tick + 1;
        CountdownSnapshot::evaluate(target, self.clock.now(), tick)
    }

    fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
    }

    fn spawn_ticker(&mut self, target: DateTime<Local>) {
        let clock = Arc::clone(&self.clock);
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let own = generation.load(Ordering::SeqCst);
        let period = self.period;

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let mut elapsed = false;
                let published = state.send_if_modified(|cur| {
                    if generation.load(Ordering::SeqCst) != own {
                        return false;
                    }
                    *cur = CountdownSnapshot::evaluate(target, clock.now(), cur.tick + 1);
                    elapsed = cur.phase == CountdownPhase::Elapsed;
                    true
                });

                if !published || elapsed {
                    break;
                }
            }
        }));
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
