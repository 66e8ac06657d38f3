mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use workschedule_core::{
    import_seed, parse_hours, FileScheduleRepository, Schedule, ScheduleRepository,
};

#[derive(Parser)]
#[command(name = "workschedule")]
#[command(about = "Track worked hours and goals per topic", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current period, or a single topic in detail
    Overview {
        #[arg(short, long)]
        topic: Option<String>,
        /// Line length goal descriptions are wrapped to
        #[arg(short, long, default_value_t = 60)]
        width: usize,
    },
    /// Manage topics
    Topic {
        #[command(subcommand)]
        command: TopicCommands,
    },
    /// Log worked hours on a topic (e.g. `work Lernen 1.5` or `work Lernen 90m`)
    Work { topic: String, hours: String },
    /// Start the work timer on a topic
    Start { topic: String },
    /// Stop the work timer and log the elapsed hours
    Stop,
    /// Manage goals
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Close the current period and start a new one
    Reset {
        /// Topics whose unmet hours roll into the next period
        #[arg(long, value_delimiter = ',')]
        carry_hours: Vec<String>,
        /// Topics whose open one-off goals are kept
        #[arg(long, value_delimiter = ',')]
        carry_goals: Vec<String>,
        /// Carry hours for every topic
        #[arg(long)]
        all_hours: bool,
        /// Carry goals for every topic
        #[arg(long)]
        all_goals: bool,
    },
    /// Create a schedule and make it active
    New {
        name: String,
        /// Seed file with one `<topic>: <hours>` line per topic
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Switch the active schedule
    Use { name: String },
    /// List stored schedules
    Schedules,
}

#[derive(Subcommand)]
enum TopicCommands {
    /// Add a topic with its target hours per period
    Add { name: String, hours: String },
    /// Remove a topic and everything attached to it
    Remove { name: String },
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Add a goal under a topic
    Add {
        topic: String,
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Periodic goals come back not-done after every reset
        #[arg(short, long)]
        periodic: bool,
    },
    /// Mark a goal as done (goal names are unique schedule-wide)
    Done { name: String },
    /// Remove a goal from a topic
    Remove { topic: String, name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let repo = FileScheduleRepository::new(None)?;

    match cli.command {
        Commands::Overview { topic, width } => {
            let (name, schedule) = repo.load_active()?;
            match topic {
                Some(topic) => render::print_topic(&schedule.topic_overview(&topic)?, width),
                None => render::print_overview(&name, &schedule.overview()),
            }
        }
        Commands::Topic { command } => match command {
            TopicCommands::Add { name, hours } => {
                let hours = parse_hours(&hours)?;
                let (schedule_name, mut schedule) = repo.load_active()?;
                schedule.add_topic(&name, hours)?;
                repo.save(&schedule_name, &schedule)?;
                println!("Added topic '{name}' with {hours}h per period.");
            }
            TopicCommands::Remove { name } => {
                let (schedule_name, mut schedule) = repo.load_active()?;
                schedule.remove_topic(&name)?;
                repo.save(&schedule_name, &schedule)?;
                println!("Removed topic '{name}'.");
            }
        },
        Commands::Work { topic, hours } => {
            let hours = parse_hours(&hours)?;
            let (name, mut schedule) = repo.load_active()?;
            schedule.work(&topic, hours)?;
            repo.save(&name, &schedule)?;
            println!(
                "Logged {:.2}h on '{}' ({:.2}h this period).",
                hours,
                topic,
                schedule.worked_hours(&topic)
            );
        }
        Commands::Start { topic } => {
            let (name, mut schedule) = repo.load_active()?;
            schedule.start_working(&topic)?;
            repo.save(&name, &schedule)?;
            println!("Timer started on '{topic}'.");
        }
        Commands::Stop => {
            let (name, mut schedule) = repo.load_active()?;
            let (topic, hours) = schedule.stop_working()?;
            repo.save(&name, &schedule)?;
            println!("Timer stopped, logged {hours:.2}h on '{topic}'.");
        }
        Commands::Goal { command } => match command {
            GoalCommands::Add {
                topic,
                name,
                description,
                periodic,
            } => {
                let (schedule_name, mut schedule) = repo.load_active()?;
                schedule.add_goal(&topic, &name, &description, periodic)?;
                repo.save(&schedule_name, &schedule)?;
                if periodic {
                    println!("Added periodic goal '{name}' under '{topic}'.");
                } else {
                    println!("Added goal '{name}' under '{topic}'.");
                }
            }
            GoalCommands::Done { name } => {
                let (schedule_name, mut schedule) = repo.load_active()?;
                schedule.mark_done(&name)?;
                repo.save(&schedule_name, &schedule)?;
                println!("Goal '{name}' marked as done.");
            }
            GoalCommands::Remove { topic, name } => {
                let (schedule_name, mut schedule) = repo.load_active()?;
                schedule.remove_goal(&topic, &name)?;
                repo.save(&schedule_name, &schedule)?;
                println!("Removed goal '{name}' from '{topic}'.");
            }
        },
        Commands::Reset {
            carry_hours,
            carry_goals,
            all_hours,
            all_goals,
        } => {
            let (name, mut schedule) = repo.load_active()?;
            let all: Vec<String> = schedule.topics().map(str::to_string).collect();
            let carry_hours = if all_hours { all.clone() } else { carry_hours };
            let carry_goals = if all_goals { all } else { carry_goals };
            schedule.reset(&carry_hours, &carry_goals)?;
            repo.save(&name, &schedule)?;
            println!(
                "Period closed, schedule '{}' is now in period {}.",
                name,
                schedule.history().period_count()
            );
        }
        Commands::New { name, from } => {
            if repo.list()?.contains(&name) {
                anyhow::bail!("a schedule named '{name}' already exists");
            }
            let schedule = match from {
                Some(path) => import_seed(&path)?,
                None => Schedule::new(),
            };
            repo.save(&name, &schedule)?;
            repo.set_active(&name)?;
            println!("Created schedule '{name}' and made it active.");
        }
        Commands::Use { name } => {
            // Fails with StorageNotFound before touching the marker.
            repo.load(&name)?;
            repo.set_active(&name)?;
            println!("Schedule '{name}' is now active.");
        }
        Commands::Schedules => {
            let names = repo.list()?;
            if names.is_empty() {
                println!("No schedules stored yet, create one with 'new'.");
                return Ok(());
            }
            let active = repo.active()?;
            for name in names {
                if active.as_deref() == Some(name.as_str()) {
                    println!("* {name}");
                } else {
                    println!("  {name}");
                }
            }
        }
    }
    Ok(())
}
