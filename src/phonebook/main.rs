use clap::Parser;
use colored::Colorize;

mod args;
mod cli;

fn main() {
    let args = args::Cli::parse();
    cli::init_logging(args.verbose);

    if let Err(e) = cli::run(args) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}
