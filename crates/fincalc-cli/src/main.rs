mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use fincalc_core::{GroupingStyle, NumberFormat};

use commands::investment::SipArgs;
use commands::loan::EmiArgs;
use commands::numbers::{FormatArgs, NormalizeArgs};
use commands::session::{FieldsArgs, SessionArgs};

/// Loan EMI and SIP calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan EMI and SIP calculators",
    long_about = "Computes loan EMIs and SIP maturity values. Amounts may be typed the way \
                  they are written (\"₹ 1,00,000\"); they are cleaned up before use. \
                  Results can be printed as JSON, a table, CSV, or just the headline figure."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Digit grouping for displayed numbers (western, indian, none)
    #[arg(long, default_value = "western", global = true)]
    locale: GroupingStyle,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly installment, total interest and total payment for a loan
    Emi(EmiArgs),
    /// Invested amount, estimated returns and total value of a monthly plan
    Sip(SipArgs),
    /// Clean up a typed amount and print the number it represents
    Normalize(NormalizeArgs),
    /// Print a number with digit grouping
    Format(FormatArgs),
    /// Replay a list of field edits against a calculator
    Session(SessionArgs),
    /// List a calculator's input fields and their usual ranges
    Fields(FieldsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let fmt = NumberFormat::new(cli.locale);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Sip(args) => commands::investment::run_sip(args),
        Commands::Normalize(args) => commands::numbers::run_normalize(args),
        Commands::Format(args) => commands::numbers::run_format(args, &fmt),
        Commands::Session(args) => commands::session::run_session(args, &fmt),
        Commands::Fields(args) => commands::session::run_fields(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &fmt);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
