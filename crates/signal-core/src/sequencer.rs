//! Phase schedules and one-shot latches.
//!
//! A [`PhaseSchedule`] maps elapsed time onto `(phase index, progress)` using
//! cumulative phase boundaries. A [`Latch`] guards transitions that must fire
//! exactly once no matter how many paths try to trigger them.

use crate::error::ScheduleError;

#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    pub duration_ms: f64,
    pub label: &'static str,
}

impl Phase {
    pub const fn new(duration_ms: f64, label: &'static str) -> Self {
        Self { duration_ms, label }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhasePosition {
    /// Equals the phase count once the schedule is complete.
    pub index: usize,
    /// Progress within the phase, always in `[0, 1]`.
    pub progress: f64,
    pub complete: bool,
}

#[derive(Clone, Debug)]
pub struct PhaseSchedule {
    phases: Vec<Phase>,
    ends: Vec<f64>,
}

impl PhaseSchedule {
    pub fn new(phases: Vec<Phase>) -> Result<Self, ScheduleError> {
        if phases.is_empty() {
            return Err(ScheduleError::Empty);
        }
        let mut ends = Vec::with_capacity(phases.len());
        let mut sum = 0.0;
        for (index, p) in phases.iter().enumerate() {
            if !(p.duration_ms.is_finite() && p.duration_ms > 0.0) {
                return Err(ScheduleError::NonPositiveDuration {
                    index,
                    duration_ms: p.duration_ms,
                });
            }
            sum += p.duration_ms;
            ends.push(sum);
        }
        Ok(Self { phases, ends })
    }

    pub fn from_durations(durations: &[f64]) -> Result<Self, ScheduleError> {
        Self::new(durations.iter().map(|&d| Phase::new(d, "")).collect())
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn total_ms(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Start offset of a phase; the total duration for `index >= len`.
    pub fn start_of(&self, index: usize) -> f64 {
        match index {
            0 => 0.0,
            i => self.ends.get(i - 1).copied().unwrap_or_else(|| self.total_ms()),
        }
    }

    pub fn locate(&self, elapsed_ms: f64) -> PhasePosition {
        let elapsed = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else if elapsed_ms > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };
        for (i, &end) in self.ends.iter().enumerate() {
            if elapsed < end {
                let start = self.start_of(i);
                let progress = ((elapsed - start) / self.phases[i].duration_ms).clamp(0.0, 1.0);
                return PhasePosition {
                    index: i,
                    progress,
                    complete: false,
                };
            }
        }
        PhasePosition {
            index: self.phases.len(),
            progress: 1.0,
            complete: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LatchState {
    #[default]
    Pending,
    Active,
    Finished,
}

/// `Pending -> Active -> Finished`, with `Finished` terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latch {
    state: LatchState,
}

impl Latch {
    pub const fn new() -> Self {
        Self {
            state: LatchState::Pending,
        }
    }

    pub fn state(&self) -> LatchState {
        self.state
    }

    /// Returns `true` when the latch moved from pending to active.
    pub fn activate(&mut self) -> bool {
        if self.state == LatchState::Pending {
            self.state = LatchState::Active;
            true
        } else {
            false
        }
    }

    /// Returns `true` only for the call that actually finished the latch.
    pub fn finish(&mut self) -> bool {
        if self.state == LatchState::Finished {
            return false;
        }
        self.state = LatchState::Finished;
        true
    }

    pub fn is_active(&self) -> bool {
        self.state == LatchState::Active
    }

    pub fn is_finished(&self) -> bool {
        self.state == LatchState::Finished
    }
}
