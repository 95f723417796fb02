use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use stillwater::validation::Validation;
use tally::engine::{Output, Session};
use tally::input::parse_keys;
use tally::CalculatorConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Line-oriented front end for the tally calculator core.
///
/// Each input line is a whitespace-separated key script, for example
/// `12 + 3 Enter` or `5/0=`. After every line the history and display
/// are printed.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the error reset delay in milliseconds
    #[arg(long)]
    reset_delay_ms: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn render(output: &Output) {
    if !output.history.is_empty() {
        println!("  {}", output.history);
    }
    println!("{}", output.display);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CalculatorConfig::default(),
    };
    if let Some(delay) = cli.reset_delay_ms {
        config.reset_delay_ms = delay;
        config = config.validated().context("applying --reset-delay-ms")?;
    }

    let mut session = Session::with_config(&config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(&session.output());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match parse_keys(&line) {
                    Validation::Success(events) => {
                        for event in events {
                            session.dispatch(event);
                        }
                        render(&session.output());
                    }
                    Validation::Failure(errors) => {
                        for error in errors.iter() {
                            eprintln!("{error}");
                        }
                    }
                }
            }
            output = session.tick() => render(&output),
        }
    }

    Ok(())
}
