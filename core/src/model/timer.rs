use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Single-slot stopwatch for one topic at a time.
///
/// The timer only measures; committing the elapsed hours to the ledger
/// is the schedule's job. It is owned by the schedule and serialized
/// with it, so a running session survives between invocations.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WorkTimer {
    session: Option<Session>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Session {
    topic: String,
    started_at: DateTime<Utc>,
}

impl WorkTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topic the timer is currently running on, if any.
    pub fn running_topic(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.topic.as_str())
    }

    pub fn start(&mut self, topic: &str) -> Result<()> {
        if let Some(session) = &self.session {
            return Err(ScheduleError::TimerAlreadyRunning(session.topic.clone()));
        }
        self.session = Some(Session {
            topic: topic.to_string(),
            started_at: Utc::now(),
        });
        Ok(())
    }

    /// Stops the session and returns `(topic, elapsed_hours)`.
    ///
    /// The returned hours are unrounded; rounding happens where they
    /// are committed to the ledger.
    pub fn stop(&mut self) -> Result<(String, f64)> {
        let session = self.session.take().ok_or(ScheduleError::NoTimerActive)?;
        let elapsed = Utc::now().signed_duration_since(session.started_at);
        let hours = elapsed.num_seconds() as f64 / 3600.0;
        Ok((session.topic, hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn start_twice_fails() {
        let mut timer = WorkTimer::new();
        timer.start("Lernen").unwrap();
        let err = timer.start("Arbeiten").unwrap_err();
        match err {
            ScheduleError::TimerAlreadyRunning(topic) => assert_eq!(topic, "Lernen"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stop_without_session_fails() {
        let mut timer = WorkTimer::new();
        assert!(matches!(
            timer.stop(),
            Err(ScheduleError::NoTimerActive)
        ));
    }

    #[test]
    fn stop_returns_elapsed_hours() {
        let mut timer = WorkTimer {
            session: Some(Session {
                topic: "Lernen".to_string(),
                started_at: Utc::now() - Duration::minutes(90),
            }),
        };
        let (topic, hours) = timer.stop().unwrap();
        assert_eq!(topic, "Lernen");
        assert!((hours - 1.5).abs() < 0.01);
        assert_eq!(timer.running_topic(), None);
    }

    #[test]
    fn stop_clears_the_slot_for_the_next_session() {
        let mut timer = WorkTimer::new();
        timer.start("Lernen").unwrap();
        timer.stop().unwrap();
        assert!(timer.start("Arbeiten").is_ok());
    }
}
