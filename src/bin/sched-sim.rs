use sched_sim::config::{self, FormatArg, Invocation};
use sched_sim::error::{Error, Result};
use sched_sim::orchestrator;
use sched_sim::output::{
    self, CsvFormatter, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter,
};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = config::parse_args()?;
    match config::resolve(args)? {
        Invocation::Run { config, format } => {
            let result = orchestrator::run_comparison(&config)?;
            let formatter = formatter_for(&format);
            print!("{}", formatter.write(&result)?);
        }
        Invocation::ListAlgorithms => print!("{}", output::render_algorithms()),
        Invocation::ShowConfig(config) => print!("{}", output::render_config(&config)),
        Invocation::Generate(config) => {
            let toml = toml::to_string(&config)
                .map_err(|err| Error::Serialize(format!("failed to encode TOML: {}", err)))?;
            print!("{}", toml);
        }
    }

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
        FormatArg::Csv => Box::new(CsvFormatter),
    }
}
