use serde::{Deserialize, Serialize};

/// A goal can be a task or a note attached to a topic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub name: String,
    pub description: String,
    /// Periodic goals are reinstated (not-done) at every reset.
    pub periodic: bool,
    pub done: bool,
}

impl Goal {
    pub fn new(name: &str, description: &str, periodic: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            periodic,
            done: false,
        }
    }
}

/// Display ordering: open goals first, each group alphabetical.
/// Purely presentational, the stored order is never touched.
pub fn sort_goals(goals: &[Goal]) -> Vec<Goal> {
    let mut sorted = goals.to_vec();
    sorted.sort_by(|a, b| a.done.cmp(&b.done).then_with(|| a.name.cmp(&b.name)));
    sorted
}

pub fn find_goal<'a>(goals: &'a [Goal], name: &str) -> Option<&'a Goal> {
    goals.iter().find(|g| g.name == name)
}

pub fn position_of(goals: &[Goal], name: &str) -> Option<usize> {
    goals.iter().position(|g| g.name == name)
}

/// Rolls a topic's goal list into the next period and returns the
/// names of the goals that were dropped.
///
/// With `carry`: periodic goals stay with `done` cleared, finished
/// one-off goals are dropped, open one-off goals stay. Without
/// `carry`: only periodic goals survive, reset to not-done.
pub fn roll_over(goals: &mut Vec<Goal>, carry: bool) -> Vec<String> {
    let keep = |g: &Goal| if carry { g.periodic || !g.done } else { g.periodic };
    let dropped = goals
        .iter()
        .filter(|&g| !keep(g))
        .map(|g| g.name.clone())
        .collect();
    goals.retain(keep);
    for goal in goals.iter_mut() {
        if goal.periodic {
            goal.done = false;
        }
    }
    dropped
}
