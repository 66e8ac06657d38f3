use crate::error::{Result, ScheduleError};
use crate::model::schedule::Schedule;

/// Durable store for schedule snapshots.
///
/// A snapshot is the whole aggregate (maps, timer, history), replaced
/// as one unit on save. The store also remembers which schedule is the
/// active one.
pub trait ScheduleRepository {
    fn load(&self, name: &str) -> Result<Schedule>;
    fn save(&self, name: &str, schedule: &Schedule) -> Result<()>;
    fn list(&self) -> Result<Vec<String>>;
    fn active(&self) -> Result<Option<String>>;
    fn set_active(&self, name: &str) -> Result<()>;

    /// Loads the active schedule, failing when none is set.
    fn load_active(&self) -> Result<(String, Schedule)> {
        let name = self.active()?.ok_or(ScheduleError::NoScheduleActive)?;
        let schedule = self.load(&name)?;
        Ok((name, schedule))
    }
}
