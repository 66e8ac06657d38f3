use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::model::goal::{self, Goal};
use crate::model::history::{GoalEventKind, History};
use crate::model::timer::WorkTimer;
use crate::service::dto::{ScheduleOverview, TopicOverview};
use crate::time::round_hours;

/// Topic names that would collide with command words.
const RESERVED_NAMES: &[&str] = &[
    "overview", "topic", "add", "remove", "work", "start", "stop", "goal", "done", "reset",
    "new", "use", "schedules",
];

/// The schedule aggregate: target hours, carried hours and goals per
/// topic, plus the owned work timer and period history.
///
/// The three maps always share one key set; topics are added to and
/// removed from all of them together. Everything serializes as a
/// single snapshot so the schedule and its history can never drift
/// apart on disk.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    target_hours: BTreeMap<String, f64>,
    carry_hours: BTreeMap<String, f64>,
    goals: BTreeMap<String, Vec<Goal>>,
    timer: WorkTimer,
    history: History,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            target_hours: BTreeMap::new(),
            carry_hours: BTreeMap::new(),
            goals: BTreeMap::new(),
            timer: WorkTimer::new(),
            history: History::new(),
        }
    }

    /// Builds a fresh schedule from seed text, one topic per line in
    /// the form `<name>: <hours>`. Blank lines are skipped.
    pub fn from_seed(text: &str) -> Result<Self> {
        let mut schedule = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, hours) = line
                .split_once(':')
                .ok_or_else(|| ScheduleError::MalformedSeedLine(line.to_string()))?;
            let hours: f64 = hours
                .trim()
                .parse()
                .map_err(|_| ScheduleError::MalformedSeedLine(line.to_string()))?;
            schedule.add_topic(name.trim(), hours)?;
        }
        Ok(schedule)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.target_hours.keys().map(String::as_str)
    }

    /// All topics with their target hours, in display order.
    pub fn targets(&self) -> impl Iterator<Item = (&str, f64)> {
        self.target_hours
            .iter()
            .map(|(name, hours)| (name.as_str(), *hours))
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.target_hours.contains_key(topic)
    }

    pub fn target_hours(&self, topic: &str) -> Option<f64> {
        self.target_hours.get(topic).copied()
    }

    pub fn carry_hours(&self, topic: &str) -> Option<f64> {
        self.carry_hours.get(topic).copied()
    }

    pub fn goals(&self, topic: &str) -> Option<&[Goal]> {
        self.goals.get(topic).map(Vec::as_slice)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn timer(&self) -> &WorkTimer {
        &self.timer
    }

    /// Hours worked on a topic in the current period.
    pub fn worked_hours(&self, topic: &str) -> f64 {
        self.history.get_hours(Some(topic))
    }

    fn ensure_topic(&self, topic: &str) -> Result<()> {
        if self.has_topic(topic) {
            Ok(())
        } else {
            Err(ScheduleError::NoSuchTopic(topic.to_string()))
        }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() || RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
            return Err(ScheduleError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    pub fn add_topic(&mut self, name: &str, hours: f64) -> Result<()> {
        Self::validate_name(name)?;
        if self.has_topic(name) {
            return Err(ScheduleError::DuplicateTopic(name.to_string()));
        }
        self.target_hours.insert(name.to_string(), hours);
        self.carry_hours.insert(name.to_string(), 0.0);
        self.goals.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Removes a topic from all three maps. Refused while the timer is
    /// running on it, so the timer can never reference a dead topic.
    pub fn remove_topic(&mut self, name: &str) -> Result<()> {
        self.ensure_topic(name)?;
        if self.timer.running_topic() == Some(name) {
            return Err(ScheduleError::TimerRunningOnTopic(name.to_string()));
        }
        self.target_hours.remove(name);
        self.carry_hours.remove(name);
        self.goals.remove(name);
        Ok(())
    }

    /// Books hours on a topic, rounded to two decimals at the point
    /// they enter the ledger.
    pub fn work(&mut self, topic: &str, hours: f64) -> Result<()> {
        self.ensure_topic(topic)?;
        self.history.add_entry(topic, round_hours(hours));
        Ok(())
    }

    pub fn start_working(&mut self, topic: &str) -> Result<()> {
        self.ensure_topic(topic)?;
        self.timer.start(topic)
    }

    /// Stops the timer and commits the session to the ledger.
    pub fn stop_working(&mut self) -> Result<(String, f64)> {
        let (topic, hours) = self.timer.stop()?;
        let hours = round_hours(hours);
        self.work(&topic, hours)?;
        Ok((topic, hours))
    }

    /// Adds a goal under a topic. Goal names are unique across the
    /// whole schedule, not just within their topic.
    pub fn add_goal(
        &mut self,
        topic: &str,
        name: &str,
        description: &str,
        periodic: bool,
    ) -> Result<()> {
        self.ensure_topic(topic)?;
        if name.is_empty() {
            return Err(ScheduleError::InvalidName(name.to_string()));
        }
        if self
            .goals
            .values()
            .any(|list| goal::find_goal(list, name).is_some())
        {
            return Err(ScheduleError::DuplicateGoal(name.to_string()));
        }
        if let Some(list) = self.goals.get_mut(topic) {
            list.push(Goal::new(name, description, periodic));
        }
        self.history
            .current_mut()
            .record_goal_event(GoalEventKind::Added, topic, name);
        Ok(())
    }

    /// Marks a goal done, found by name across all topics.
    pub fn mark_done(&mut self, name: &str) -> Result<()> {
        for (topic, list) in self.goals.iter_mut() {
            if let Some(pos) = goal::position_of(list, name) {
                list[pos].done = true;
                let topic = topic.clone();
                self.history
                    .current_mut()
                    .record_goal_event(GoalEventKind::Done, &topic, name);
                return Ok(());
            }
        }
        Err(ScheduleError::NoSuchGoal(name.to_string()))
    }

    pub fn remove_goal(&mut self, topic: &str, name: &str) -> Result<()> {
        let list = match self.goals.get_mut(topic) {
            Some(list) => list,
            None => return Err(ScheduleError::NoSuchTopic(topic.to_string())),
        };
        let pos =
            goal::position_of(list, name).ok_or_else(|| ScheduleError::NoSuchGoal(name.to_string()))?;
        list.remove(pos);
        self.history
            .current_mut()
            .record_goal_event(GoalEventKind::Dropped, topic, name);
        Ok(())
    }

    /// Closes the current period and opens a new one.
    ///
    /// A running timer session is committed first. Topics listed in
    /// `carry_hours_topics` accumulate `target - worked` into their
    /// carry (signed, never clamped); all other carries are zeroed.
    /// Goal lists roll over per topic according to
    /// `carry_goals_topics`. Per-topic updates are independent, so the
    /// whole operation either applies cleanly or fails before touching
    /// anything.
    pub fn reset(
        &mut self,
        carry_hours_topics: &[String],
        carry_goals_topics: &[String],
    ) -> Result<()> {
        if self.timer.running_topic().is_some() {
            self.stop_working()?;
        }

        let topics: Vec<String> = self.target_hours.keys().cloned().collect();
        for topic in &topics {
            let carry = if carry_hours_topics.contains(topic) {
                let target = self.target_hours.get(topic).copied().unwrap_or(0.0);
                let prior = self.carry_hours.get(topic).copied().unwrap_or(0.0);
                prior + target - self.worked_hours(topic)
            } else {
                0.0
            };
            self.carry_hours.insert(topic.clone(), carry);

            if let Some(list) = self.goals.get_mut(topic) {
                let dropped = goal::roll_over(list, carry_goals_topics.contains(topic));
                for name in dropped {
                    self.history
                        .current_mut()
                        .record_goal_event(GoalEventKind::Dropped, topic, &name);
                }
            }
        }

        self.history.new_period();
        Ok(())
    }

    /// Read-only projection of the whole schedule for display.
    pub fn overview(&self) -> ScheduleOverview {
        ScheduleOverview::from_schedule(self)
    }

    /// Read-only projection of a single topic for display.
    pub fn topic_overview(&self, topic: &str) -> Result<TopicOverview> {
        TopicOverview::from_schedule(self, topic)
    }
}
