use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{Result, ScheduleError};
use crate::model::schedule::Schedule;
use crate::repository::traits::ScheduleRepository;

const ACTIVE_MARKER: &str = "active";

/// Stores each schedule as a pretty-printed JSON snapshot under
/// `~/.workschedule/<name>.json`, with an `active` marker file naming
/// the schedule commands operate on.
#[derive(Clone)]
pub struct FileScheduleRepository {
    base_dir: PathBuf,
}

impl FileScheduleRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir().ok_or(ScheduleError::NoHomeDirectory)?;
                home_dir.join(".workschedule")
            }
        };
        fs::create_dir_all(&path)?;
        Ok(FileScheduleRepository { base_dir: path })
    }

    fn schedule_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.json"))
    }
}

impl ScheduleRepository for FileScheduleRepository {
    fn load(&self, name: &str) -> Result<Schedule> {
        let path = self.schedule_path(name);
        if !path.exists() {
            return Err(ScheduleError::StorageNotFound(name.to_string()));
        }
        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let schedule = serde_json::from_reader(reader)?;
        Ok(schedule)
    }

    fn save(&self, name: &str, schedule: &Schedule) -> Result<()> {
        let file = File::create(self.schedule_path(name))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, schedule)?;
        writer.flush()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn active(&self) -> Result<Option<String>> {
        let path = self.base_dir.join(ACTIVE_MARKER);
        if !path.exists() {
            return Ok(None);
        }
        let name = fs::read_to_string(path)?.trim().to_string();
        if name.is_empty() {
            Ok(None)
        } else {
            Ok(Some(name))
        }
    }

    fn set_active(&self, name: &str) -> Result<()> {
        fs::write(self.base_dir.join(ACTIVE_MARKER), name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, FileScheduleRepository) {
        let dir = TempDir::new().unwrap();
        let repo = FileScheduleRepository::new(Some(dir.path().to_path_buf())).unwrap();
        (dir, repo)
    }

    fn sample() -> Schedule {
        let mut schedule = Schedule::new();
        schedule.add_topic("Lernen", 5.0).unwrap();
        schedule.add_topic("Arbeiten", 20.0).unwrap();
        schedule.work("Lernen", 6.5).unwrap();
        schedule.add_goal("Lernen", "Goal#1", "desc", true).unwrap();
        schedule.mark_done("Goal#1").unwrap();
        schedule.reset(&["Lernen".to_string()], &[]).unwrap();
        schedule
    }

    #[test]
    fn save_then_load_reproduces_the_snapshot() {
        let (_dir, repo) = repo();
        let schedule = sample();
        repo.save("default", &schedule).unwrap();
        let loaded = repo.load("default").unwrap();
        assert_eq!(loaded, schedule);
    }

    #[test]
    fn load_of_unknown_name_fails() {
        let (_dir, repo) = repo();
        assert!(matches!(
            repo.load("missing"),
            Err(ScheduleError::StorageNotFound(_))
        ));
    }

    #[test]
    fn active_marker_round_trips() {
        let (_dir, repo) = repo();
        assert_eq!(repo.active().unwrap(), None);
        assert!(matches!(
            repo.load_active(),
            Err(ScheduleError::NoScheduleActive)
        ));

        let saved = sample();
        repo.save("uni", &saved).unwrap();
        repo.set_active("uni").unwrap();
        let (name, schedule) = repo.load_active().unwrap();
        assert_eq!(name, "uni");
        assert_eq!(schedule, saved);
    }

    #[test]
    fn list_reports_stored_schedules_sorted() {
        let (_dir, repo) = repo();
        repo.save("work", &Schedule::new()).unwrap();
        repo.save("uni", &Schedule::new()).unwrap();
        repo.set_active("uni").unwrap();
        assert_eq!(repo.list().unwrap(), vec!["uni", "work"]);
    }
}
