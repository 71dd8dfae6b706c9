use crate::errors::ClockError;
use chrono::{DateTime, Local, TimeDelta};
use std::fmt;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Pure duration decomposition of the time left (no calendar months/years).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Split a positive number of milliseconds by day/hour/minute/second.
    /// Negative input is clamped to zero.
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn view(&self) -> CountdownView {
        if self.days > 0 {
            CountdownView::Coarse {
                days: self.days,
                hours: self.hours,
            }
        } else {
            CountdownView::Fine {
                hours: self.hours,
                minutes: self.minutes,
                seconds: self.seconds,
            }
        }
    }

    /// Less than a day and fewer than `threshold_minutes` minutes left.
    pub fn is_urgent(&self, threshold_minutes: i64) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes < threshold_minutes
    }
}

/// What a display shows while the countdown runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownView {
    /// More than a day left.
    Coarse { days: i64, hours: i64 },
    /// Under a day left; rendered zero-padded.
    Fine { hours: i64, minutes: i64, seconds: i64 },
}

impl fmt::Display for CountdownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownView::Coarse { days, hours } => write!(f, "{}d {}h", days, hours),
            CountdownView::Fine {
                hours,
                minutes,
                seconds,
            } => write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownPhase {
    /// Never started.
    Idle,
    Running,
    /// Target reached; terminal until retargeted.
    Elapsed,
    /// Target could not be derived; terminal until retargeted.
    Invalid(ClockError),
}

impl CountdownPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CountdownPhase::Elapsed | CountdownPhase::Invalid(_))
    }
}

/// State published after every evaluation of the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSnapshot {
    pub phase: CountdownPhase,
    pub target: Option<DateTime<Local>>,
    /// `target - now` at evaluation time; zero or negative once elapsed.
    pub remaining: TimeDelta,
    pub tick: u64,
}

impl CountdownSnapshot {
    pub fn idle() -> Self {
        Self {
            phase: CountdownPhase::Idle,
            target: None,
            remaining: TimeDelta::zero(),
            tick: 0,
        }
    }

    /// Evaluate `target` at `now`. Exactly zero remaining counts as elapsed.
    pub fn evaluate(target: DateTime<Local>, now: DateTime<Local>, tick: u64) -> Self {
        let remaining = target - now;
        let phase = if remaining > TimeDelta::zero() {
            CountdownPhase::Running
        } else {
            CountdownPhase::Elapsed
        };

        Self {
            phase,
            target: Some(target),
            remaining,
            tick,
        }
    }

    pub fn breakdown(&self) -> Option<Remaining> {
        match self.phase {
            CountdownPhase::Running => Some(Remaining::from_millis(self.remaining.num_milliseconds())),
            _ => None,
        }
    }

    /// Coarse or fine view while running, `None` otherwise.
    pub fn view(&self) -> Option<CountdownView> {
        self.breakdown().map(|r| r.view())
    }
}
