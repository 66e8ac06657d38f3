pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{Result, ScheduleError};
pub use model::goal::{find_goal, sort_goals, Goal};
pub use model::history::{Entry, GoalEvent, GoalEventKind, History, Period};
pub use model::schedule::Schedule;
pub use model::timer::WorkTimer;
pub use repository::{import_seed, FileScheduleRepository, ScheduleRepository};
pub use service::dto::{GoalView, ScheduleOverview, TopicOverview};
pub use time::{parse_hours, round_hours};
