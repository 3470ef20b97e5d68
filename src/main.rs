use anyhow::Result;
use puritycheck::cli;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::run(cli.command)
}
