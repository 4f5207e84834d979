mod app;
mod domain;
mod persistence;
mod ticker;

use anyhow::{Context, Result};
use app::AppState;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use domain::{calendar_grid, prompt_for, session_line, task_row, BreathingPreset, Feeling};
use persistence::{ensure_data_dir, init_local_data_dir, load_settings_or_default, save_settings, settings_file, DirStore};
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mimente")]
#[command(about = "Tasks, a mood journal and guided breathing, kept on your own machine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .mimente directory in the current directory
    Init,
    /// Manage the to-do list
    #[command(subcommand)]
    Task(TaskCommand),
    /// Write and browse the journal
    #[command(subcommand)]
    Diary(DiaryCommand),
    /// Run one guided breathing cycle
    Breathe(BreatheArgs),
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Add a task
    Add {
        #[arg(short, long)]
        title: String,
        /// Subject or area, e.g. "Maths"
        #[arg(short, long)]
        subject: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Only show tasks that are not completed
        #[arg(long)]
        pending: bool,
    },
    /// Mark a task done (or not done again)
    Toggle {
        /// Start of the task id as shown by `task list`
        id: String,
    },
    /// Delete a task
    Remove { id: String },
}

#[derive(Subcommand)]
enum DiaryCommand {
    /// Write today's entry (replaces an earlier entry from today)
    Write {
        /// happy, worried, sad, angry, anxious or relaxed
        #[arg(short, long)]
        feeling: String,
        text: Vec<String>,
    },
    /// Show the entry for a day. Defaults to today.
    Show {
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show a month with the feeling of each written day
    Calendar {
        /// Month to show (YYYY-MM). Defaults to this month.
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Print today's writing prompt
    Prompt,
}

#[derive(Args)]
struct BreatheArgs {
    /// classic, fast, deep or custom. Defaults to the saved preset.
    #[arg(short, long)]
    preset: Option<String>,
    #[arg(long)]
    inhale: Option<u32>,
    #[arg(long)]
    hold: Option<u32>,
    #[arg(long)]
    exhale: Option<u32>,
    /// Remember this preset for next time
    #[arg(long)]
    save: bool,
}

/// Initialize tracing, written to stderr so command output stays clean
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mimente=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Commands::Init = cli.command {
        let data_dir = init_local_data_dir()?;
        println!("Initialized data directory: {}", data_dir.display());
        println!("mimente will now keep tasks and journal entries here.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");
    let settings_path = settings_file(&data_dir);
    let mut settings = load_settings_or_default(&settings_path);
    let mut app = AppState::open(DirStore::open(&data_dir)?, &settings);

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Task(command) => run_task(&mut app, command),
        Commands::Diary(command) => run_diary(&mut app, command),
        Commands::Breathe(args) => {
            let requested = resolve_preset(&args)?;
            let preset = app.prepare_breathing(requested)?;
            if args.save && requested.is_some() {
                settings.preset = preset;
                save_settings(&settings_path, &settings)?;
            }
            run_breathing(&mut app, preset)
        }
    }
}

fn run_task(app: &mut AppState<DirStore>, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add { title, subject, due } => {
            let due_date = due.as_deref().map(parse_date).transpose()?;
            let id = app.add_task(&title, &subject, due_date)?;
            if let Some(task) = app.tasks.find_by_key(&id) {
                println!("Added {}", task_row(task));
            }
        }
        TaskCommand::List { pending } => {
            let today = Local::now().date_naive();
            let tasks: Vec<_> = if pending {
                app.tasks.pending().collect()
            } else {
                app.tasks.records().iter().collect()
            };
            if app.tasks.is_empty() {
                println!("No tasks yet.");
                return Ok(());
            }
            if tasks.is_empty() {
                println!("Nothing to do.");
            }
            for task in tasks {
                let flag = if task.is_overdue(today) { "  ! overdue" } else { "" };
                println!("{}{}", task_row(task), flag);
            }
            let overdue = app.tasks.overdue(today).count();
            println!("{} tasks, {} overdue", app.tasks.len(), overdue);
        }
        TaskCommand::Toggle { id } => {
            let task = app.toggle_task(&id)?;
            println!("{}", task_row(task));
        }
        TaskCommand::Remove { id } => {
            let task = app.remove_task(&id)?;
            println!("Removed {}", task_row(&task));
        }
    }
    Ok(())
}

fn run_diary(app: &mut AppState<DirStore>, command: DiaryCommand) -> Result<()> {
    match command {
        DiaryCommand::Write { feeling, text } => {
            let feeling = parse_feeling(&feeling)?;
            let now = Local::now().fixed_offset();
            let entry = app.write_entry(now, &text.join(" "), feeling)?;
            println!("Saved entry for {} ({})", entry.day(), entry.feeling.name());
        }
        DiaryCommand::Show { date } => {
            let day = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };
            match app.diary.entry_for(day) {
                Some(entry) => {
                    println!("{}", entry.date.format("%A, %-d %B %Y"));
                    println!("Feeling: {} ({})", entry.feeling.name(), entry.feeling.color());
                    println!();
                    println!("{}", entry.text);
                }
                None => println!("No entry for {}.", day),
            }
        }
        DiaryCommand::Calendar { month } => {
            let (year, month) = match month {
                Some(month) => parse_month(&month)?,
                None => {
                    let today = Local::now().date_naive();
                    (today.year(), today.month())
                }
            };
            let title = NaiveDate::from_ymd_opt(year, month, 1)
                .context("Invalid month")?
                .format("%B %Y");
            println!("{}", title);
            println!(
                "{}",
                calendar_grid(year, month, |day| app.diary.entry_for(day).map(|e| e.feeling.marker()))
            );
            let entries = app.diary.entries_in_month(year, month);
            if !entries.is_empty() {
                println!();
                for entry in entries {
                    println!("{}  {} {}", entry.day(), entry.feeling.marker(), entry.feeling.name());
                }
            }
        }
        DiaryCommand::Prompt => {
            println!("{}", prompt_for(Local::now().date_naive()));
        }
    }
    Ok(())
}

fn run_breathing(app: &mut AppState<DirStore>, preset: BreathingPreset) -> Result<()> {
    let durations = app.session.durations();
    tracing::info!(
        preset = preset.name(),
        inhale = durations.inhale(),
        hold = durations.hold(),
        exhale = durations.exhale(),
        "starting breathing session"
    );
    println!("{}: {}s cycle", preset.name(), durations.cycle_length());
    println!("{}", session_line(&app.session.state()));

    let mut stdout = io::stdout();
    let mut write_error = None;
    ticker::run_session(&mut app.session, ticker::tick_duration(), |state| {
        if write_error.is_some() {
            return;
        }
        let result = write!(stdout, "\r\x1b[2K{}", session_line(state)).and_then(|_| stdout.flush());
        if let Err(e) = result {
            write_error = Some(e);
        }
    });
    if let Some(e) = write_error {
        return Err(e).context("Failed to write to terminal");
    }

    println!();
    tracing::info!("breathing session finished");
    Ok(())
}

/// Preset from command-line options, None to fall back to the saved one
fn resolve_preset(args: &BreatheArgs) -> Result<Option<BreathingPreset>> {
    let has_custom_values = args.inhale.is_some() || args.hold.is_some() || args.exhale.is_some();
    match args.preset.as_deref() {
        Some(name) if name.eq_ignore_ascii_case("custom") => Ok(Some(custom_preset(args)?)),
        Some(name) => {
            if has_custom_values {
                anyhow::bail!("--inhale/--hold/--exhale only apply to the custom preset");
            }
            BreathingPreset::from_name(name)
                .map(Some)
                .with_context(|| format!("Unknown preset '{}'. Use classic, fast, deep or custom", name))
        }
        None if has_custom_values => Ok(Some(custom_preset(args)?)),
        None => Ok(None),
    }
}

fn custom_preset(args: &BreatheArgs) -> Result<BreathingPreset> {
    match (args.inhale, args.hold, args.exhale) {
        (Some(inhale), Some(hold), Some(exhale)) => Ok(BreathingPreset::Custom { inhale, hold, exhale }),
        _ => anyhow::bail!("The custom preset needs --inhale, --hold and --exhale"),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))
}

fn parse_month(s: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid month format. Use YYYY-MM: {}", e))?;
    Ok((date.year(), date.month()))
}

fn parse_feeling(s: &str) -> Result<Feeling> {
    Feeling::from_name(s).with_context(|| {
        let names: Vec<&str> = Feeling::all().iter().map(|f| f.name()).collect();
        format!("Unknown feeling '{}'. Choose one of: {}", s, names.join(", "))
    })
}
