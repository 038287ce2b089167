use std::time::Duration;

/// Start/end bookkeeping for one session, measured on the scheduler clock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerState {
    pub started_ms: Option<u64>,
    pub ended_ms: Option<u64>,
}

impl TimerState {
    pub fn started(now_ms: u64) -> Self {
        Self {
            started_ms: Some(now_ms),
            ended_ms: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_ms.is_some() && self.ended_ms.is_none()
    }

    pub fn elapsed(&self, now_ms: u64) -> Duration {
        let Some(started) = self.started_ms else {
            return Duration::default();
        };
        let until = self.ended_ms.unwrap_or(now_ms);
        Duration::from_millis(until.saturating_sub(started))
    }

    pub fn ended(&self, now_ms: u64) -> TimerState {
        let mut new_state = self.clone();
        new_state.ended_ms = Some(now_ms);
        new_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_running() {
        let timer = TimerState::started(1_000);
        assert_eq!(timer.elapsed(3_500), Duration::from_millis(2_500));
        assert!(timer.is_running());
    }

    #[test]
    fn test_elapsed_with_end() {
        let timer = TimerState::started(1_000).ended(4_000);
        assert_eq!(timer.elapsed(99_000), Duration::from_millis(3_000));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_elapsed_never_started() {
        assert_eq!(TimerState::default().elapsed(5_000), Duration::ZERO);
    }
}
