use chrono::{DateTime, Local};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthStr;
use workschedule_core::{GoalView, ScheduleOverview, TopicOverview};

#[derive(Tabled)]
struct TopicRow {
    #[tabled(rename = "Topic")]
    topic: String,
    #[tabled(rename = "Worked (h)")]
    worked: String,
    #[tabled(rename = "Target (h)")]
    target: String,
    #[tabled(rename = "Carry (h)")]
    carry: String,
    #[tabled(rename = "Remaining (h)")]
    remaining: String,
    #[tabled(rename = "Goals")]
    goals: String,
}

pub fn print_overview(name: &str, overview: &ScheduleOverview) {
    let started: DateTime<Local> = DateTime::from(overview.period_start);
    println!(
        "\n\x1b[1;36mSchedule '{}'\x1b[0m (period {} since {}, {:.2}h worked)",
        name,
        overview.period_count,
        started.format("%Y-%m-%d"),
        overview.total_worked()
    );
    if let Some(topic) = &overview.running_topic {
        println!("Timer running on '{topic}'.");
    }

    let rows: Vec<TopicRow> = overview
        .topics
        .iter()
        .map(|t| {
            let open = t.goals.iter().filter(|g| !g.done).count();
            let done = t.goals.len() - open;
            TopicRow {
                topic: t.topic.clone(),
                worked: format!("{:.2}", t.worked_hours),
                target: format!("{:.2}", t.target_hours),
                carry: format!("{:.2}", t.carry_hours),
                remaining: format!("{:.2}", t.remaining_hours()),
                goals: format!("{open} open / {done} done"),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{table}");
}

pub fn print_topic(view: &TopicOverview, width: usize) {
    println!("{}", topic_header(view));

    if view.goals.is_empty() {
        println!("No goals under this topic.");
        return;
    }
    for goal in &view.goals {
        println!("{}", goal_line(goal));
        for line in wrap(&goal.description, width) {
            println!("      {line}");
        }
    }
}

/// Carry is signed: banked over-work shows as a negative amount.
fn topic_header(view: &TopicOverview) -> String {
    format!(
        "\n\x1b[1;36m{}\x1b[0m  worked {:.2}h of {:.2}h ({:+.2}h carry), {:.2}h remaining",
        view.topic,
        view.worked_hours,
        view.target_hours,
        view.carry_hours,
        view.remaining_hours()
    )
}

/// One colored status line per goal: green check for done goals,
/// yellow cycle marker for periodic ones.
fn goal_line(goal: &GoalView) -> String {
    let marker = if goal.done {
        "\x1b[32m[x]\x1b[0m"
    } else {
        "[ ]"
    };
    if goal.periodic {
        format!("  {marker} {} \x1b[33m(periodic)\x1b[0m", goal.name)
    } else {
        format!("  {marker} {}", goal.name)
    }
}

/// Greedy word wrap on display width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_the_line_length() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn wrap_of_empty_text_yields_no_lines() {
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn topic_header_formats_carry_with_its_sign() {
        let mut view = TopicOverview {
            topic: "Lernen".to_string(),
            target_hours: 5.0,
            carry_hours: -1.5,
            worked_hours: 2.0,
            goals: Vec::new(),
        };
        assert!(topic_header(&view).contains("(-1.50h carry)"));

        view.carry_hours = 6.0;
        assert!(topic_header(&view).contains("(+6.00h carry)"));
    }
}
