//! A background-thread deadline timer that sets a `StopFlag` when a search's
//! time budget expires, independent of the search loop's own periodic node-
//! count poll. Belt and braces: a search stuck generating moves at a single
//! node (pathological branching) still gets cut off on the wall clock.

use crate::sync::StopFlag;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

#[must_use]
pub fn duration_until(deadline: Instant) -> Option<Duration> {
    let now = Instant::now();
    if deadline > now {
        Some(deadline - now)
    } else {
        None
    }
}

pub struct DeadlineTimer {
    handle: Option<JoinHandle<()>>,
    stop_flag: StopFlag,
}

impl DeadlineTimer {
    /// Spawns a timer that calls `stop_flag.stop()` after `duration` elapses,
    /// unless cancelled first.
    #[must_use]
    pub fn start(duration: Duration, stop_flag: StopFlag) -> Self {
        let flag_for_thread = stop_flag.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(duration);
            flag_for_thread.stop();
        });
        DeadlineTimer {
            handle: Some(handle),
            stop_flag,
        }
    }

    /// Like `start`, but takes an absolute deadline. A `None` deadline means
    /// "no time limit" and spawns no thread at all.
    #[must_use]
    pub fn start_at(deadline: Option<Instant>, stop_flag: StopFlag) -> Option<Self> {
        let deadline = deadline?;
        let duration = duration_until(deadline).unwrap_or(Duration::ZERO);
        Some(Self::start(duration, stop_flag))
    }

    /// Drops the timer without waiting for it or triggering the flag early.
    /// The background thread still fires at its deadline; its `stop()` call
    /// becomes a harmless no-op once the search has already finished.
    pub fn cancel(self) {
        drop(self);
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.stop_flag.is_stopped()
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            drop(handle); // detach; the thread is daemon-like and self-terminates
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_duration() {
        let flag = StopFlag::new();
        let timer = DeadlineTimer::start(Duration::from_millis(20), flag.clone());
        assert!(!flag.is_stopped());
        std::thread::sleep(Duration::from_millis(80));
        assert!(flag.is_stopped());
        timer.cancel();
    }

    #[test]
    fn no_deadline_spawns_nothing() {
        let flag = StopFlag::new();
        assert!(DeadlineTimer::start_at(None, flag).is_none());
    }

    #[test]
    fn duration_until_past_deadline_is_none() {
        let past = Instant::now() - Duration::from_secs(1);
        assert!(duration_until(past).is_none());
    }
}
