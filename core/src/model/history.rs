use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One merged ledger slot: hours worked on a topic on one day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub topic: String,
    pub hours: f64,
    pub date: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalEventKind {
    Added,
    Done,
    Dropped,
}

/// Goal-lifecycle record kept in the period next to the work entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GoalEvent {
    pub kind: GoalEventKind,
    pub topic: String,
    pub goal: String,
    pub date: NaiveDate,
}

/// One accounting interval, bounded by resets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Period {
    pub start: DateTime<Utc>,
    entries: Vec<Entry>,
    #[serde(default)]
    goal_events: Vec<GoalEvent>,
}

impl Period {
    pub fn new() -> Self {
        Self {
            start: Utc::now(),
            entries: Vec::new(),
            goal_events: Vec::new(),
        }
    }

    /// Books hours on a topic for today, merging into an existing
    /// `(topic, date)` slot if there is one.
    pub fn add_entry(&mut self, topic: &str, hours: f64) {
        self.add_entry_on(topic, hours, Local::now().date_naive());
    }

    pub fn add_entry_on(&mut self, topic: &str, hours: f64, date: NaiveDate) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.topic == topic && e.date == date)
        {
            entry.hours += hours;
            return;
        }
        self.entries.push(Entry {
            topic: topic.to_string(),
            hours,
            date,
        });
        self.entries
            .sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.topic.cmp(&b.topic)));
    }

    /// Hours worked in this period, for one topic or for all of them.
    pub fn get_hours(&self, topic: Option<&str>) -> f64 {
        self.entries
            .iter()
            .filter(|e| topic.is_none_or(|t| e.topic == t))
            .map(|e| e.hours)
            .sum()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn record_goal_event(&mut self, kind: GoalEventKind, topic: &str, goal: &str) {
        self.goal_events.push(GoalEvent {
            kind,
            topic: topic.to_string(),
            goal: goal.to_string(),
            date: Local::now().date_naive(),
        });
    }

    pub fn goal_events(&self) -> &[GoalEvent] {
        &self.goal_events
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only sequence of periods. The current period is mutable,
/// everything already rolled into `past` is frozen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct History {
    past: Vec<Period>,
    current: Period,
}

impl History {
    pub fn new() -> Self {
        Self {
            past: Vec::new(),
            current: Period::new(),
        }
    }

    pub fn current(&self) -> &Period {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Period {
        &mut self.current
    }

    pub fn past(&self) -> &[Period] {
        &self.past
    }

    pub fn add_entry(&mut self, topic: &str, hours: f64) {
        self.current.add_entry(topic, hours);
    }

    /// Hours worked in the current period only.
    pub fn get_hours(&self, topic: Option<&str>) -> f64 {
        self.current.get_hours(topic)
    }

    /// Freezes the current period and opens a fresh one.
    pub fn new_period(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.past.push(finished);
    }

    pub fn period_count(&self) -> usize {
        self.past.len() + 1
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn same_topic_same_day_merges_into_one_entry() {
        let mut period = Period::new();
        period.add_entry_on("b", 1.0, date(2));
        period.add_entry_on("b", 2.0, date(2));
        assert_eq!(period.entries().len(), 1);
        assert_eq!(period.get_hours(Some("b")), 3.0);
    }

    #[test]
    fn entries_stay_sorted_by_date_then_topic() {
        let mut period = Period::new();
        period.add_entry_on("b", 1.0, date(2));
        period.add_entry_on("a", 3.0, date(1));
        period.add_entry_on("a", 4.0, date(2));

        let order: Vec<(&str, NaiveDate)> = period
            .entries()
            .iter()
            .map(|e| (e.topic.as_str(), e.date))
            .collect();
        assert_eq!(
            order,
            vec![("a", date(1)), ("a", date(2)), ("b", date(2))]
        );
    }

    #[test]
    fn get_hours_sums_per_topic_and_overall() {
        let mut period = Period::new();
        period.add_entry_on("b", 1.0, date(1));
        period.add_entry_on("c", 2.0, date(1));
        period.add_entry_on("a", 3.0, date(1));
        period.add_entry_on("a", 4.0, date(2));

        assert_eq!(period.get_hours(Some("a")), 7.0);
        assert_eq!(period.get_hours(Some("b")), 1.0);
        assert_eq!(period.get_hours(Some("c")), 2.0);
        assert_eq!(period.get_hours(None), 10.0);
    }

    #[test]
    fn new_period_freezes_the_old_one() {
        let mut history = History::new();
        history.add_entry("a", 2.0);
        history.new_period();

        assert_eq!(history.period_count(), 2);
        assert_eq!(history.get_hours(Some("a")), 0.0);
        assert_eq!(history.past()[0].get_hours(Some("a")), 2.0);
    }

    #[test]
    fn negative_hours_are_accepted_as_is() {
        // Validation is a schedule-level concern, not the ledger's.
        let mut period = Period::new();
        period.add_entry_on("a", -1.0, date(1));
        assert_eq!(period.get_hours(None), -1.0);
    }
}
