mod cmd;

use clap::{Parser, Subcommand};
use cmd::calculate::CalculateCommand;
use cmd::compare::CompareCommand;
use cmd::rates::RatesCommand;
use cmd::schema::SchemaCommand;
use cmd::validate::ValidateCommand;

#[derive(Parser, Debug)]
#[command(name = "importc", version, about = "French vehicle import cost calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate VAT, malus, customs and fees for one import
    Calculate(CalculateCommand),
    /// Compare the total cost of two import scenarios
    Compare(CompareCommand),
    /// Check an input file without calculating
    Validate(ValidateCommand),
    /// Print the fiscal reference tables
    Rates(RatesCommand),
    /// Print the expected input format
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(cmd) => cmd.exec(),
        Command::Compare(cmd) => cmd.exec(),
        Command::Validate(cmd) => cmd.exec(),
        Command::Rates(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
