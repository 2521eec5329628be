use clap::Parser;
use origami::cmd::Cli;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.command.run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
