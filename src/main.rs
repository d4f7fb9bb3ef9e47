use std::{fs, path::PathBuf};

use amountkit::{
    CurrencyWatcher, DecimalDigitsFilter, EditField, FormatConfig, NormalizationMode,
    amount::{
        filter::validate_keystroke_with,
        format::{format_currency, format_currency_dollar, format_currency_no_symbol},
        is_numeric, to_safe_amount,
    },
    config::load_config,
    helpers::image::{read_image_base64, write_image_from_base64},
    normalize_with,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

const BACKSPACE: char = '<';

#[derive(Parser)]
#[command(name = "amountkit", version, about = "Currency amount entry helpers")]
struct Cli {
    /// JSON file overriding symbols, separators and digit limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log normalization steps
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Cents-first with currency symbol
    Symbol,
    /// Cents-first without symbol
    Plain,
    /// Grouped whole number, typed decimals kept
    Grouped,
}

impl From<ModeArg> for NormalizationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Symbol => NormalizationMode::WithSymbolTwoDecimals,
            ModeArg::Plain => NormalizationMode::PlainTwoDecimalsNoSymbol,
            ModeArg::Grouped => NormalizationMode::WholeNumberGrouped,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Symbol,
    Plain,
    Dollar,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize amount text once
    Normalize {
        text: String,
        #[arg(long, value_enum, default_value_t = ModeArg::Plain)]
        mode: ModeArg,
    },
    /// Type keys one by one into an amount field ('<' is backspace)
    Type {
        keys: String,
        #[arg(long, value_enum, default_value_t = ModeArg::Plain)]
        mode: ModeArg,
        /// Apply the configured digit limits to each keystroke
        #[arg(long)]
        limit: bool,
    },
    /// Check whether appending text keeps within digit limits
    Check {
        current: String,
        inserted: String,
        #[arg(long)]
        max_int: Option<usize>,
        #[arg(long)]
        max_frac: Option<usize>,
    },
    /// Format a numeric amount as currency
    Format {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long, value_enum, default_value_t = StyleArg::Symbol)]
        style: StyleArg,
    },
    /// Report whether a value is a plain signed decimal number
    IsNumeric { value: String },
    /// Print an image file as base64
    EncodeImage { path: PathBuf },
    /// Write the image held as base64 in a text file
    DecodeImage { input: PathBuf, output: PathBuf },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn type_keys(keys: &str, mode: NormalizationMode, config: &FormatConfig, field: &EditField) {
    let watcher = CurrencyWatcher::new(mode)
        .with_config(config.clone())
        .on_amount(|amount| println!("  amount {amount}"))
        .attach(field);

    for key in keys.chars() {
        let accepted = if key == BACKSPACE {
            field.delete_backward()
        } else {
            field.type_text(&key.to_string())
        };
        let label = if key == BACKSPACE { "⌫".to_string() } else { key.to_string() };
        if accepted {
            println!("{label} -> {:?}", field.text());
        } else {
            println!("{label} -> rejected");
        }
    }

    println!("final {:?} = {}", field.text(), watcher.amount());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize { text, mode } => {
            let normalized = normalize_with(&text, mode.into(), &config);
            println!("{}", normalized.display);
            println!("{}", normalized.amount);
        }
        Commands::Type { keys, mode, limit } => {
            let mode: NormalizationMode = mode.into();
            let field = EditField::new();
            if limit {
                field.add_filter(DecimalDigitsFilter::for_mode(config.digit_limits(), mode));
            }
            type_keys(&keys, mode, &config, &field);
        }
        Commands::Check {
            current,
            inserted,
            max_int,
            max_frac,
        } => {
            let mut limits = config.digit_limits();
            limits.max_integer_digits = max_int.unwrap_or(limits.max_integer_digits);
            limits.max_fraction_digits = max_frac.unwrap_or(limits.max_fraction_digits);
            let accepted = validate_keystroke_with(&current, &inserted, &limits);
            println!("{}", if accepted { "accepted" } else { "rejected" });
        }
        Commands::Format { amount, style } => {
            let amount = to_safe_amount(&amount);
            let formatted = match style {
                StyleArg::Symbol => format_currency(amount, &config),
                StyleArg::Plain => format_currency_no_symbol(amount, &config),
                StyleArg::Dollar => format_currency_dollar(amount, &config),
            };
            println!("{formatted}");
        }
        Commands::IsNumeric { value } => println!("{}", is_numeric(&value)),
        Commands::EncodeImage { path } => {
            let encoded = read_image_base64(&path)
                .with_context(|| format!("failed to encode image {path:?}"))?;
            println!("{encoded}");
        }
        Commands::DecodeImage { input, output } => {
            let encoded = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {input:?}"))?;
            let written = write_image_from_base64(&output, &encoded)
                .with_context(|| format!("failed to write image {output:?}"))?;
            println!("Wrote {written} bytes to {output:?}");
        }
    }

    Ok(())
}
