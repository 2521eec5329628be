//! Command line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use tracing::level_filters::LevelFilter;

use crate::error::{Error, Result};
use crate::io::{format_result, read_network_file, write_result};
use crate::network::stats::stats;
use crate::sim::SimConfig;
use crate::Signal;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, default_value = "warn", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a network until its signals stabilize
    ///
    /// Prints the final value of every pleat: 1, 0 or X for unknown.
    #[clap(alias = "sim")]
    Run(RunArgs),

    /// Show statistics about a network
    ///
    /// Will print the number of pleats, primary inputs and outputs, and gadgets by kind.
    #[clap()]
    Show(ShowArgs),

    /// Show the evaluation order of the gadgets
    ///
    /// Fails if the network contains a dependency cycle.
    #[clap()]
    Order(OrderArgs),
}

impl Commands {
    /// Execute the command
    pub fn run(&self) -> Result<()> {
        match self {
            Commands::Run(a) => a.run(),
            Commands::Show(a) => a.run(),
            Commands::Order(a) => a.run(),
        }
    }
}

/// Parse a log level
fn parse_level(s: &str) -> std::result::Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("invalid log level '{s}', expected trace, debug, info, warn, error or off"))
}

/// Parse a `NAME=VALUE` assignment
fn parse_assignment(s: &str) -> Result<(String, Signal)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| Error::InvalidSignal(s.to_string()))?;
    Ok((name.trim().to_string(), value.parse()?))
}

/// Command arguments for simulation
#[derive(Args)]
pub struct RunArgs {
    /// Network description (JSON)
    network: PathBuf,

    /// Maximum number of evaluation passes
    #[arg(short = 'm', long, default_value_t = SimConfig::default().max_iterations)]
    max_iterations: usize,

    /// Print the trace of the run
    #[arg(short = 't', long)]
    trace: bool,

    /// Output the result as JSON
    #[arg(long)]
    json: bool,

    /// Drive a pleat before the run, as NAME=VALUE with VALUE in 1, 0, x
    #[arg(short = 's', long = "set", value_parser = parse_assignment)]
    assignments: Vec<(String, Signal)>,
}

impl RunArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let mut net = read_network_file(&self.network)?;
        net.set_inputs(self.assignments.iter().map(|(n, s)| (n, *s)));
        let config = SimConfig {
            max_iterations: self.max_iterations,
            trace: self.trace,
        };
        let res = net.run(&config)?;
        if self.json {
            write_result(std::io::stdout().lock(), &res)?;
        } else {
            print!("{}", format_result(&res));
        }
        Ok(())
    }
}

/// Command arguments for network informations
#[derive(Args)]
pub struct ShowArgs {
    /// Network to show
    network: PathBuf,
}

impl ShowArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let net = read_network_file(&self.network)?;
        println!("Network stats:\n{}", stats(&net));
        Ok(())
    }
}

/// Command arguments for the evaluation order
#[derive(Args)]
pub struct OrderArgs {
    /// Network to sort
    network: PathBuf,
}

impl OrderArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let net = read_network_file(&self.network)?;
        println!("{}", net.topological_ids()?.iter().join("\n"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tracing::level_filters::LevelFilter;

    use super::{parse_assignment, Cli, Commands};
    use crate::Signal;

    #[test]
    fn test_assignment() {
        assert_eq!(
            parse_assignment("a=1").unwrap(),
            ("a".to_string(), Signal::True)
        );
        assert_eq!(
            parse_assignment("b = x").unwrap(),
            ("b".to_string(), Signal::Unknown)
        );
        assert!(parse_assignment("a").is_err());
        assert!(parse_assignment("a=2").is_err());
    }

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from([
            "origami", "run", "net.json", "-m", "10", "--trace", "-s", "a=1", "-s", "b=0",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.max_iterations, 10);
                assert!(args.trace);
                assert!(!args.json);
                assert_eq!(args.assignments.len(), 2);
            }
            _ => panic!("Expected a run command"),
        }
        assert_eq!(cli.log_level, LevelFilter::WARN);

        let cli = Cli::try_parse_from(["origami", "order", "net.json", "--log-level", "debug"])
            .unwrap();
        assert_eq!(cli.log_level, LevelFilter::DEBUG);
        // Bad log levels are rejected rather than ignored
        assert!(Cli::try_parse_from(["origami", "order", "net.json", "--log-level", "loud"]).is_err());

        // Missing arguments are rejected
        assert!(Cli::try_parse_from(["origami"]).is_err());
        assert!(Cli::try_parse_from(["origami", "run"]).is_err());
    }
}
