use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{default_time_quantum, AlgoConfig, ProcessConfig, SimConfig};

#[derive(Parser, Debug)]
#[command(
    name = "sched-sim",
    version,
    about = "Compare CPU scheduling algorithms on a process set",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate and print the comparison (the default).
    Run(RunArgs),
    /// Print the supported algorithm names.
    ListAlgorithms,
    /// Print the configuration a run would use, without simulating.
    ShowConfig(RunArgs),
    /// Print a random process set as a TOML config.
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// TOML or JSON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Comma-separated `id:arrival:burst` list.
    #[arg(long)]
    pub processes: Option<String>,
    /// A single `id:arrival:burst` entry; repeatable.
    #[arg(long = "process", value_name = "ID:ARRIVAL:BURST")]
    pub process: Vec<String>,
    #[arg(long, allow_negative_numbers = true, help = "Round robin time quantum [default: 2]")]
    pub quantum: Option<i64>,
    #[arg(
        long = "context-switch",
        allow_negative_numbers = true,
        help = "Context switch cost in time units [default: 0]"
    )]
    pub context_switch: Option<i64>,
    /// Restrict the comparison to these algorithms; repeatable.
    #[arg(long, value_enum)]
    pub algo: Vec<AlgoArg>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    /// Run one thread per algorithm.
    #[arg(long)]
    pub parallel: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of processes; 5 to 10 when omitted.
    #[arg(long)]
    pub count: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgoArg {
    Fcfs,
    Spn,
    Hrrn,
    Rr,
    Srtf,
}

impl From<AlgoArg> for AlgoConfig {
    fn from(value: AlgoArg) -> Self {
        match value {
            AlgoArg::Fcfs => AlgoConfig::Fcfs,
            AlgoArg::Spn => AlgoConfig::Spn,
            AlgoArg::Hrrn => AlgoConfig::Hrrn,
            AlgoArg::Rr => AlgoConfig::Rr,
            AlgoArg::Srtf => AlgoConfig::Srtf,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    #[default]
    Human,
    Summary,
    Json,
    Csv,
}

/// What the binary was asked to do, with its configuration resolved.
#[derive(Debug)]
pub enum Invocation {
    Run { config: SimConfig, format: FormatArg },
    ListAlgorithms,
    ShowConfig(SimConfig),
    Generate(SimConfig),
}

pub fn parse_args() -> Result<Args> {
    match Args::try_parse() {
        Ok(args) => Ok(args),
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => Err(Error::Cli(err.to_string().trim_end().to_string())),
    }
}

pub fn resolve(args: Args) -> Result<Invocation> {
    match args.command {
        None => {
            let format = args.run.format;
            Ok(Invocation::Run {
                config: build_config(args.run)?,
                format,
            })
        }
        Some(Command::Run(run)) => {
            let format = run.format;
            Ok(Invocation::Run {
                config: build_config(run)?,
                format,
            })
        }
        Some(Command::ListAlgorithms) => Ok(Invocation::ListAlgorithms),
        Some(Command::ShowConfig(run)) => Ok(Invocation::ShowConfig(build_config(run)?)),
        Some(Command::Generate(generate)) => {
            let seed = generate.seed.unwrap_or_else(rand::random);
            Ok(Invocation::Generate(generate_config(generate.count, seed)))
        }
    }
}

/// Merges the config file (if any) with command-line values. Command-line
/// processes are appended; scalar flags override the file.
pub fn build_config(args: RunArgs) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig {
            time_quantum: default_time_quantum(),
            context_switch_time: 0,
            algorithms: AlgoConfig::all(),
            parallel: false,
            processes: Vec::new(),
        },
    };

    if let Some(list) = &args.processes {
        config.processes.extend(parse_process_list(list)?);
    }
    for entry in &args.process {
        config.processes.push(parse_process_entry(entry)?);
    }
    if let Some(quantum) = args.quantum {
        config.time_quantum = quantum;
    }
    if let Some(switch) = args.context_switch {
        config.context_switch_time = switch;
    }
    if !args.algo.is_empty() {
        config.algorithms = args.algo.into_iter().map(AlgoConfig::from).collect();
    }
    config.parallel |= args.parallel;

    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Parses `a:0:5,b:1:3`. A blank list yields no processes; blank entries
/// inside a list are errors.
pub fn parse_process_list(input: &str) -> Result<Vec<ProcessConfig>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input.split(',').map(parse_process_entry).collect()
}

pub fn parse_process_entry(entry: &str) -> Result<ProcessConfig> {
    let trimmed = entry.trim();
    let invalid = || Error::InvalidProcessEntry(trimmed.to_string());

    let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
    let [id, arrival, burst] = parts.as_slice() else {
        return Err(invalid());
    };
    let arrival_time: i64 = arrival.parse().map_err(|_| invalid())?;
    let burst_time: i64 = burst.parse().map_err(|_| invalid())?;

    Ok(ProcessConfig::new(*id, arrival_time, burst_time))
}

/// Random workload: burst 1..=20, arrival 0..=10, ids `P1..Pn`.
pub fn generate_config(count: Option<usize>, seed: u64) -> SimConfig {
    let mut rng = StdRng::seed_from_u64(seed);
    let count = count.unwrap_or_else(|| rng.gen_range(5..=10));
    let processes = (1..=count)
        .map(|idx| {
            let burst_time = rng.gen_range(1..=20);
            let arrival_time = rng.gen_range(0..=10);
            ProcessConfig::new(format!("P{}", idx), arrival_time, burst_time)
        })
        .collect();

    SimConfig {
        time_quantum: default_time_quantum(),
        context_switch_time: 0,
        algorithms: AlgoConfig::all(),
        parallel: false,
        processes,
    }
}
