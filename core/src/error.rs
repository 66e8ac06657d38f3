use thiserror::Error;

/// Error type shared by all schedule operations.
///
/// Every variant is a caller-visible, recoverable condition; the core
/// never retries and never corrects silently.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("'{0}' is not a valid name")]
    InvalidName(String),

    #[error("topic '{0}' already exists")]
    DuplicateTopic(String),

    #[error("a goal named '{0}' already exists")]
    DuplicateGoal(String),

    #[error("no topic named '{0}'")]
    NoSuchTopic(String),

    #[error("no goal named '{0}'")]
    NoSuchGoal(String),

    #[error("no schedule is active, create one with 'new' or pick one with 'use'")]
    NoScheduleActive,

    #[error("a timer is already running on topic '{0}'")]
    TimerAlreadyRunning(String),

    #[error("there is no active timer")]
    NoTimerActive,

    #[error("the timer is still running on topic '{0}', stop it first")]
    TimerRunningOnTopic(String),

    #[error("no schedule named '{0}' is stored")]
    StorageNotFound(String),

    #[error("could not parse hours from '{0}'")]
    InvalidHours(String),

    #[error("malformed seed line '{0}', expected '<topic>: <hours>'")]
    MalformedSeedLine(String),

    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not decode schedule file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
