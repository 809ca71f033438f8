use clap::Parser;
use covid_dashboard::cli::{run, Cli};
use covid_dashboard::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
