use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::schedule::Schedule;

/// Bootstraps a brand-new schedule from a seed file, one topic per
/// line as `<name>: <hours>`.
pub fn import_seed(path: &Path) -> Result<Schedule> {
    let text = fs::read_to_string(path)?;
    Schedule::from_seed(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn seed_file_becomes_a_fresh_schedule() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Lernen: 5.0").unwrap();
        writeln!(file, "Arbeiten: 20").unwrap();

        let schedule = import_seed(file.path()).unwrap();
        assert_eq!(schedule.target_hours("Lernen"), Some(5.0));
        assert_eq!(schedule.target_hours("Arbeiten"), Some(20.0));
        assert_eq!(schedule.carry_hours("Lernen"), Some(0.0));
    }

    #[test]
    fn missing_seed_file_is_an_io_error() {
        assert!(import_seed(Path::new("/nonexistent/seed.txt")).is_err());
    }
}
