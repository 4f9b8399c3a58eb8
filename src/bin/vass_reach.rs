use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{info, LevelFilter};
use std::process::ExitCode;
use std::time::Duration;
use vass_reach::driver::{self, DriverConfig, Verdict};
use vass_reach::io;
use vass_reach::smt::Z3Backend;

#[derive(Parser)]
#[command(name = "vass-reach")]
#[command(about = "Decide and witness reachability for a 2-dimensional VASS")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Per-LPS solver deadline in milliseconds. Unbounded if omitted.
    #[arg(long, global = true, require_equals = true)]
    deadline_ms: Option<u64>,

    /// Verbose logging level: "trace", "debug", or "info".
    /// If specified without a value (--verbose or -v), defaults to "info".
    #[arg(long, short = 'v', global = true, value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Subcommand)]
enum Command {
    /// Load a VASS, enumerate LPSes, and discharge against its configured target.
    Solve {
        /// Path to the VASS JSON file.
        file: String,
        /// Cap on how many LPS candidates are discharged.
        #[arg(long, require_equals = true)]
        max_lps: Option<usize>,
    },
    /// Discharge a single already-compiled LPS JSON file against a target.
    SolveLps {
        /// Path to the LPS JSON file.
        file: String,
        /// Target value for the x counter.
        x: f64,
        /// Target value for the y counter.
        y: f64,
    },
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let deadline = args.deadline_ms.map(Duration::from_millis);

    match args.command {
        Command::Solve { file, max_lps } => run_solve(&file, deadline, max_lps),
        Command::SolveLps { file, x, y } => run_solve_lps(&file, x, y, deadline),
    }
}

fn run_solve(file: &str, deadline: Option<Duration>, max_lps: Option<usize>) -> ExitCode {
    let json = match std::fs::read_to_string(file) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("failed to read {file}: {e}");
            return ExitCode::from(2);
        }
    };

    let vass = match io::parse_vass(&json) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("failed to parse VASS: {e}");
            return ExitCode::from(2);
        }
    };

    let (target_x, target_y) = io::configured_target(&vass);
    info!("solving for target ({target_x}, {target_y})");

    let mut config = DriverConfig::new();
    if let Some(d) = deadline {
        config = config.deadline(d);
    }
    if let Some(n) = max_lps {
        config = config.max_lps(n);
    }

    let mut backend = Z3Backend::new();
    report(driver::solve(&vass, target_x as f64, target_y as f64, &config, &mut backend))
}

fn run_solve_lps(file: &str, x: f64, y: f64, deadline: Option<Duration>) -> ExitCode {
    let json = match std::fs::read_to_string(file) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("failed to read {file}: {e}");
            return ExitCode::from(2);
        }
    };

    let lps = match io::parse_lps(&json) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("failed to parse LPS: {e}");
            return ExitCode::from(2);
        }
    };

    let config = match deadline {
        Some(d) => DriverConfig::new().deadline(d),
        None => DriverConfig::new(),
    };

    let mut backend = Z3Backend::new();
    report(driver::discharge_all(&[lps], x, y, &config, &mut backend))
}

fn report(result: Result<Verdict, vass_reach::error::Error>) -> ExitCode {
    match result {
        Ok(Verdict::Reachable { model, .. }) => {
            println!("reachable");
            let mut entries: Vec<_> = model.0.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (name, value) in entries {
                println!("  {name} = {value}");
            }
            ExitCode::from(0)
        }
        Ok(Verdict::Unreachable) => {
            println!("unreachable");
            ExitCode::from(1)
        }
        Err(vass_reach::error::Error::SolverTimeout) => {
            eprintln!("solver timed out");
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
