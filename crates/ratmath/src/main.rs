//! ratmath - exact calculator front end.
//!
//! Evaluates each expression argument and prints one result per line.
//! Logging is controlled by `RATMATH_LOG` (or `RUST_LOG`).

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use tracing_subscriber::EnvFilter;

use ratmath::prelude::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Fraction,
    Mixed,
    Decimal,
    Repeating,
    Scientific,
    Cf,
    Uncertainty,
}

impl From<FormatArg> for Notation {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Fraction => Self::Fraction,
            FormatArg::Mixed => Self::Mixed,
            FormatArg::Decimal => Self::Decimal,
            FormatArg::Repeating => Self::Repeating,
            FormatArg::Scientific => Self::Scientific,
            FormatArg::Cf => Self::ContinuedFraction,
            FormatArg::Uncertainty => Self::Uncertainty,
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "ratmath", version, about = "Exact rational and interval calculator")]
struct Cli {
    /// Output notation
    #[arg(short, long, value_enum, default_value = "fraction")]
    format: FormatArg,

    /// Period digits shown in repeating notation
    #[arg(short, long, default_value_t = 20)]
    digits: usize,

    /// Return every result as an interval
    #[arg(short, long)]
    uniform: bool,

    /// Expressions to evaluate
    #[arg(required = true, allow_hyphen_values = true)]
    expressions: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("RATMATH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let parser = Parser::new(ParseOptions {
        type_aware: !cli.uniform,
    });
    let digits = ExpansionLimits::default().clamp_digits(cli.digits);
    let notation = Notation::from(cli.format);

    for expression in &cli.expressions {
        let value = parser
            .parse(expression)
            .with_context(|| format!("failed to evaluate `{expression}`"))?;
        tracing::debug!(%expression, kind = value.type_name(), "evaluated");
        println!("{}", render(&value, notation, digits));
    }
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
