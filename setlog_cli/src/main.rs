use clap::{ArgGroup, Parser, Subcommand};
use setlog_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "setlog")]
#[command(about = "Workout routine tracker with guided sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty routine
    New {
        /// Routine name
        name: String,
    },

    /// List saved routines
    List,

    /// Show a routine's workout table
    Show {
        /// Routine name or path to a routine file
        routine: String,
    },

    /// Add an exercise to the end of a routine
    Add {
        /// Routine name or path to a routine file
        routine: String,

        /// Exercise name
        exercise: String,

        /// Equipment (barbell, dumbbell, machine, none)
        #[arg(long, short, value_parser = parse_equipment, default_value = "none")]
        equipment: Equipment,

        /// Goal sets
        #[arg(long, short)]
        sets: u32,

        /// Goal reps per set
        #[arg(long, short)]
        reps: u32,
    },

    /// Remove an exercise from a routine by name
    Remove {
        /// Routine name or path to a routine file
        routine: String,

        /// Exercise name
        exercise: String,
    },

    /// Change an exercise's name, equipment or goal
    #[command(group(
        ArgGroup::new("changes")
            .required(true)
            .multiple(true)
            .args(["name", "equipment", "sets", "reps"])
    ))]
    Edit {
        /// Routine name or path to a routine file
        routine: String,

        /// Exercise name
        exercise: String,

        /// New exercise name
        #[arg(long, short)]
        name: Option<String>,

        /// New equipment (barbell, dumbbell, machine, none)
        #[arg(long, short, value_parser = parse_equipment)]
        equipment: Option<Equipment>,

        /// New goal sets
        #[arg(long, short)]
        sets: Option<u32>,

        /// New goal reps per set
        #[arg(long, short)]
        reps: Option<u32>,
    },

    /// Rename a routine (the file is renamed to match)
    Rename {
        /// Routine name or path to a routine file
        routine: String,

        /// New routine name
        new_name: String,
    },

    /// Work through a routine set by set
    Session {
        /// Routine name or path to a routine file
        routine: String,

        /// Write the finished workout table to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show the event log
    Log,
}

fn parse_equipment(s: &str) -> std::result::Result<Equipment, String> {
    s.parse::<Equipment>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    logging::init_with_level(&config.logging.level);

    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    let routines_dir = config.data.routines_dir();
    let event_log = config.data.event_log_path();

    match cli.command {
        Commands::New { name } => cmd_new(&routines_dir, &event_log, &name),
        Commands::List => cmd_list(&routines_dir),
        Commands::Show { routine } => cmd_show(&resolve_routine(&routines_dir, &routine)),
        Commands::Add {
            routine,
            exercise,
            equipment,
            sets,
            reps,
        } => cmd_add(
            &resolve_routine(&routines_dir, &routine),
            &event_log,
            Exercise::new(exercise, equipment),
            sets,
            reps,
        ),
        Commands::Remove { routine, exercise } => cmd_remove(
            &resolve_routine(&routines_dir, &routine),
            &event_log,
            &exercise,
        ),
        Commands::Edit {
            routine,
            exercise,
            name,
            equipment,
            sets,
            reps,
        } => cmd_edit(
            &resolve_routine(&routines_dir, &routine),
            &event_log,
            &exercise,
            ExerciseEdit {
                name,
                equipment,
                sets,
                reps,
            },
        ),
        Commands::Rename { routine, new_name } => cmd_rename(
            &resolve_routine(&routines_dir, &routine),
            &event_log,
            &new_name,
        ),
        Commands::Session { routine, export } => {
            let path = resolve_routine(&routines_dir, &routine);
            let mut routine = open_routine(&path, &event_log)?;
            let stdin = io::stdin();
            run_session(&mut routine, stdin.lock(), io::stdout())?;
            if let Some(csv_path) = export {
                let count = export_csv(&routine, &csv_path)?;
                println!("✓ Exported {} exercises to {}", count, csv_path.display());
            }
            Ok(())
        }
        Commands::Log => cmd_log(&event_log),
    }
}

/// A routine argument is either an existing `.json` path or a routine name
fn resolve_routine(routines_dir: &Path, routine: &str) -> PathBuf {
    let path = Path::new(routine);
    if path.extension().is_some_and(|ext| ext == "json") && path.exists() {
        path.to_path_buf()
    } else {
        routines_dir.join(routine_file_name(routine))
    }
}

fn open_routine(path: &Path, event_log: &Path) -> Result<Routine> {
    let routine = Routine::load(path)?;
    Ok(routine.with_event_sink(JsonlEventSink::new(event_log)))
}

fn cmd_new(routines_dir: &Path, event_log: &Path, name: &str) -> Result<()> {
    let path = routines_dir.join(routine_file_name(name));
    if path.exists() {
        return Err(Error::RoutineExists(path));
    }

    Routine::new(name).save(&path)?;
    let event = Event::new(format!("Created routine {}", name));
    if let Err(e) = JsonlEventSink::new(event_log).record(&event) {
        tracing::warn!("Failed to record event {:?}: {}", event.description, e);
    }

    println!("✓ Created routine {}", name);
    println!("  File: {}", path.display());
    Ok(())
}

fn cmd_list(routines_dir: &Path) -> Result<()> {
    let paths = list_routines(routines_dir)?;
    if paths.is_empty() {
        println!("No saved routines.");
        return Ok(());
    }

    for path in paths {
        match Routine::load(&path) {
            Ok(routine) => println!("  {} ({} exercises)", routine.name(), routine.len()),
            Err(e) => {
                tracing::warn!("Skipping unreadable routine {:?}: {}", path, e);
                println!("  {} (unreadable)", path.display());
            }
        }
    }
    Ok(())
}

fn cmd_show(path: &Path) -> Result<()> {
    let routine = Routine::load(path)?;
    println!("{}", routine.view_workout());
    Ok(())
}

fn cmd_add(path: &Path, event_log: &Path, exercise: Exercise, sets: u32, reps: u32) -> Result<()> {
    let mut routine = open_routine(path, event_log)?;
    let name = exercise.name().to_string();
    routine.add_exercise(exercise, sets, reps);
    routine.save(path)?;

    println!("✓ Added {} to {}", name, routine.name());
    Ok(())
}

fn cmd_remove(path: &Path, event_log: &Path, exercise: &str) -> Result<()> {
    let mut routine = open_routine(path, event_log)?;
    let index = routine
        .index_of_exercise(exercise)
        .ok_or_else(|| Error::ExerciseNotFound(exercise.to_string()))?;
    routine.remove_exercise(index)?;
    routine.save(path)?;

    println!("✓ {} removed", exercise);
    Ok(())
}

fn cmd_edit(path: &Path, event_log: &Path, exercise: &str, edit: ExerciseEdit) -> Result<()> {
    let mut routine = open_routine(path, event_log)?;
    let index = routine
        .index_of_exercise(exercise)
        .ok_or_else(|| Error::ExerciseNotFound(exercise.to_string()))?;
    routine.edit_exercise(index, edit)?;
    routine.save(path)?;

    println!("✓ Updated {}", routine.exercises()[index].name());
    Ok(())
}

fn cmd_rename(path: &Path, event_log: &Path, new_name: &str) -> Result<()> {
    let mut routine = open_routine(path, event_log)?;
    let new_path = path.with_file_name(routine_file_name(new_name));
    if new_path != path && new_path.exists() {
        return Err(Error::RoutineExists(new_path));
    }

    routine.set_name(new_name);
    routine.save(&new_path)?;
    if new_path != path {
        std::fs::remove_file(path)?;
    }

    println!("✓ Renamed routine to {}", new_name);
    println!("  File: {}", new_path.display());
    Ok(())
}

fn cmd_log(event_log: &Path) -> Result<()> {
    let events = read_events(event_log)?;
    if events.is_empty() {
        println!("No events logged.");
        return Ok(());
    }

    for event in events {
        println!(
            "{}  {}",
            event.logged_at.format("%Y-%m-%d %H:%M:%S"),
            event.description
        );
    }
    Ok(())
}

enum SessionAction {
    /// Weight argument as typed, if given on the same line
    Weight(Option<String>),
    AddSet,
    Skip,
    View,
    Back,
    Invalid,
}

fn parse_action(line: &str) -> SessionAction {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();
    match command.as_str() {
        "w" => SessionAction::Weight(parts.next().map(str::to_string)),
        "a" => SessionAction::AddSet,
        "s" => SessionAction::Skip,
        "v" => SessionAction::View,
        "b" | "q" => SessionAction::Back,
        _ => SessionAction::Invalid,
    }
}

fn display_session_menu(out: &mut impl Write, routine: &Routine) -> Result<()> {
    writeln!(out, "\n{}", routine.view_workout())?;
    writeln!(out, "Select from:")?;
    writeln!(out, "\tw <lb> -> Set weight of exercise (plates per side for barbell)")?;
    writeln!(out, "\ta      -> Add set")?;
    writeln!(out, "\ts      -> Skip exercise")?;
    writeln!(out, "\tv      -> View routine")?;
    writeln!(out, "\tb      -> Back")?;
    write!(out, "Make your selection: ")?;
    out.flush()?;
    Ok(())
}

/// Drive a session from line-based commands until the workout completes,
/// the user backs out, or input ends
fn run_session(routine: &mut Routine, input: impl BufRead, mut out: impl Write) -> Result<()> {
    routine.begin_session()?;
    display_session_menu(&mut out, routine)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let line = line?;
        match parse_action(&line) {
            SessionAction::Weight(arg) => {
                let raw = match arg {
                    Some(raw) => raw,
                    None => {
                        write!(out, "\nWeight (in lb): ")?;
                        out.flush()?;
                        match lines.next() {
                            Some(next) => next?,
                            None => break,
                        }
                    }
                };
                match raw.trim().parse::<u32>() {
                    Ok(w) => routine.add_weight_to_current(w)?,
                    Err(_) => writeln!(out, "\nNot a valid weight")?,
                }
            }
            SessionAction::AddSet => routine.add_set_to_progress()?,
            SessionAction::Skip => routine.skip_exercise()?,
            SessionAction::View => {}
            SessionAction::Back => break,
            SessionAction::Invalid => writeln!(out, "\nNot a valid selection")?,
        }

        if !routine.in_session() {
            writeln!(out, "\n{}", routine.view_workout())?;
            writeln!(out, "Workout complete!")?;
            break;
        }
        display_session_menu(&mut out, routine)?;
    }

    if routine.in_session() {
        routine.end_session()?;
        writeln!(out)?;
    }

    if routine.has_met_all_goals() {
        writeln!(out, "You met all your goals! Have a great day!")?;
    } else {
        writeln!(out, "Rest up and better luck next time!")?;
    }
    Ok(())
}
