// Turn countdown derived from the snapshot's timer descriptor.

use super::snapshot::LobbySnapshot;

pub const INACTIVE_TEXT: &str = "Time remaining: --";
pub const EXPIRED_TEXT: &str = "Time expired! Waiting for server...";

/// Wall-clock epoch milliseconds, the clock the lobby service stamps turns with.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// What the timer line shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDisplay {
    pub text: String,
    pub warning: bool,
    pub expired: bool,
}

impl TimerDisplay {
    pub fn inactive() -> Self {
        TimerDisplay {
            text: INACTIVE_TEXT.to_string(),
            warning: false,
            expired: false,
        }
    }
}

impl Default for TimerDisplay {
    fn default() -> Self {
        Self::inactive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    deadline_ms: i64,
    warning_threshold_secs: i64,
}

impl Countdown {
    pub fn new(deadline_ms: i64, warning_threshold_secs: u64) -> Self {
        Countdown {
            deadline_ms,
            warning_threshold_secs: i64::try_from(warning_threshold_secs).unwrap_or(i64::MAX),
        }
    }

    /// Armed only during a ban/pick turn whose timer is active with both a
    /// start time and a duration.
    pub fn for_snapshot(snapshot: &LobbySnapshot, warning_threshold_secs: u64) -> Option<Self> {
        if !snapshot.game_state.is_active_draft() {
            return None;
        }
        snapshot
            .timer_state
            .deadline_ms()
            .map(|deadline| Countdown::new(deadline, warning_threshold_secs))
    }

    pub fn deadline_ms(&self) -> i64 {
        self.deadline_ms
    }

    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.deadline_ms - now_ms).max(0)
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.remaining_ms(now_ms) == 0
    }

    pub fn display(&self, now_ms: i64) -> TimerDisplay {
        let remaining = self.remaining_ms(now_ms);
        if remaining == 0 {
            return TimerDisplay {
                text: EXPIRED_TEXT.to_string(),
                warning: true,
                expired: true,
            };
        }
        // Round up so the last partial second still reads "1s".
        let seconds = (remaining + 999) / 1000;
        TimerDisplay {
            text: format!("Time remaining: {seconds}s"),
            warning: seconds <= self.warning_threshold_secs,
            expired: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::snapshot::{GameState, TimerState};

    fn timed(state: GameState, start: i64, duration: i64) -> LobbySnapshot {
        LobbySnapshot {
            game_state: state,
            timer_state: TimerState {
                is_active: true,
                start_time: Some(start),
                duration: Some(duration),
            },
            ..Default::default()
        }
    }

    #[test]
    fn armed_only_in_active_turns_with_complete_timer() {
        assert!(Countdown::for_snapshot(&timed(GameState::Ban1P1, 1_000, 30_000), 10).is_some());
        assert!(Countdown::for_snapshot(&timed(GameState::ReadyCheck, 1_000, 30_000), 10).is_none());
        assert!(Countdown::for_snapshot(&timed(GameState::Complete, 1_000, 30_000), 10).is_none());

        let mut inactive = timed(GameState::Pick1P1, 1_000, 30_000);
        inactive.timer_state.is_active = false;
        assert!(Countdown::for_snapshot(&inactive, 10).is_none());
    }

    #[test]
    fn seconds_round_up() {
        let c = Countdown::new(30_000, 10);
        assert_eq!(c.display(0).text, "Time remaining: 30s");
        assert_eq!(c.display(1).text, "Time remaining: 30s");
        assert_eq!(c.display(29_001).text, "Time remaining: 1s");
    }

    #[test]
    fn warning_at_threshold() {
        let c = Countdown::new(30_000, 10);
        assert!(!c.display(19_000).warning); // 11s
        let d = c.display(20_000); // 10s
        assert_eq!(d.text, "Time remaining: 10s");
        assert!(d.warning);
        assert!(!d.expired);
    }

    #[test]
    fn expiry() {
        let c = Countdown::new(30_000, 10);
        let d = c.display(30_000);
        assert_eq!(d.text, EXPIRED_TEXT);
        assert!(d.warning && d.expired);
        assert!(c.is_expired(45_000));
        assert_eq!(c.remaining_ms(45_000), 0);
    }

    #[test]
    fn inactive_display() {
        let d = TimerDisplay::default();
        assert_eq!(d.text, "Time remaining: --");
        assert!(!d.warning);
    }
}
