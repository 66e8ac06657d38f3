use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::model::goal::{sort_goals, Goal};
use crate::model::schedule::Schedule;

/// Flattened goal fields for display; carries the status flags the
/// presentation layer colors by.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GoalView {
    pub name: String,
    pub description: String,
    pub periodic: bool,
    pub done: bool,
}

impl GoalView {
    fn from_entity(goal: &Goal) -> Self {
        Self {
            name: goal.name.clone(),
            description: goal.description.clone(),
            periodic: goal.periodic,
            done: goal.done,
        }
    }
}

/// Per-topic projection: current-period hours against target and
/// carry, plus the goal list in display order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TopicOverview {
    pub topic: String,
    pub target_hours: f64,
    pub carry_hours: f64,
    pub worked_hours: f64,
    pub goals: Vec<GoalView>,
}

impl TopicOverview {
    fn new(schedule: &Schedule, topic: &str, target_hours: f64) -> Self {
        let goals = schedule.goals(topic).unwrap_or(&[]);
        Self {
            topic: topic.to_string(),
            target_hours,
            carry_hours: schedule.carry_hours(topic).unwrap_or(0.0),
            worked_hours: schedule.worked_hours(topic),
            goals: sort_goals(goals).iter().map(GoalView::from_entity).collect(),
        }
    }

    pub fn from_schedule(schedule: &Schedule, topic: &str) -> Result<Self> {
        let target_hours = schedule
            .target_hours(topic)
            .ok_or_else(|| ScheduleError::NoSuchTopic(topic.to_string()))?;
        Ok(Self::new(schedule, topic, target_hours))
    }

    /// Hours still owed this period, target plus carry minus worked.
    pub fn remaining_hours(&self) -> f64 {
        self.target_hours + self.carry_hours - self.worked_hours
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleOverview {
    pub topics: Vec<TopicOverview>,
    /// Topic the timer is currently running on, if any.
    pub running_topic: Option<String>,
    pub period_count: usize,
    pub period_start: DateTime<Utc>,
}

impl ScheduleOverview {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let topics = schedule
            .targets()
            .map(|(topic, target)| TopicOverview::new(schedule, topic, target))
            .collect();
        Self {
            topics,
            running_topic: schedule.timer().running_topic().map(str::to_string),
            period_count: schedule.history().period_count(),
            period_start: schedule.history().current().start,
        }
    }

    pub fn total_worked(&self) -> f64 {
        self.topics.iter().map(|t| t.worked_hours).sum()
    }
}
