use clap::{Parser, Subcommand};
use qn_cli::{CliResult, commands, load_settings};
use qn_core::Settings;
use qn_uncertainty::{Coverage, Law};
use qn_units::Catalog;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qn")]
#[command(
    about = "quanta CLI - dimensioned quantities and measurement uncertainty",
    long_about = None
)]
struct Cli {
    /// Settings file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between two catalogue units
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Source unit symbol (e.g. degC, kWh, psi)
        from: String,
        /// Target unit symbol
        to: String,
        /// Uncertainty of the value, in the source unit
        #[arg(short, long)]
        uncertainty: Option<f64>,
    },
    /// Show dimension, scale and origin of a unit
    Dimension {
        /// Unit symbol
        symbol: String,
    },
    /// List catalogue units
    Units {
        /// Only units sharing the dimension of this symbol
        #[arg(long)]
        like: Option<String>,
    },
    /// Combine samples and systematic errors into value and deviation
    Combine {
        /// Repeated measurements
        #[arg(
            long,
            value_delimiter = ',',
            num_args = 1..,
            allow_negative_numbers = true,
            required = true
        )]
        samples: Vec<f64>,
        /// Systematic error contributions
        #[arg(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
        systematic: Vec<f64>,
        /// Probability law (none, normal, uniform, triangular, asymmetric, arcsine, uniform_gap)
        #[arg(long, default_value = "none")]
        law: Law,
        /// Coverage in sigma (1, 2 or 3)
        #[arg(long, default_value = "1", value_parser = commands::parse_coverage)]
        coverage: Coverage,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the effective settings as YAML
    Settings,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert {
            value,
            from,
            to,
            uncertainty,
        } => cmd_convert(settings, value, uncertainty, &from, &to),
        Commands::Dimension { symbol } => cmd_dimension(settings, &symbol),
        Commands::Units { like } => cmd_units(settings, like.as_deref()),
        Commands::Combine {
            samples,
            systematic,
            law,
            coverage,
            json,
        } => cmd_combine(settings, &samples, &systematic, law, coverage, json),
        Commands::Settings => cmd_settings(settings),
    }
}

fn cmd_convert(
    settings: Settings,
    value: f64,
    uncertainty: Option<f64>,
    from: &str,
    to: &str,
) -> CliResult<()> {
    let catalog = Catalog::standard(&settings)?;
    let q = commands::convert(&catalog, settings, value, uncertainty, from, to)?;
    match q.uncertainty() {
        Some(u) => println!("{} ± {} {}", q.value(), u, to),
        None => println!("{} {}", q.value(), to),
    }
    Ok(())
}

fn cmd_dimension(settings: Settings, symbol: &str) -> CliResult<()> {
    let catalog = Catalog::standard(&settings)?;
    let unit = commands::lookup(&catalog, symbol)?;
    println!("{}", symbol);
    println!("  dimension: {}", unit.dimension());
    println!("  scale:     {} ({})", unit.scale(), unit.scale().value());
    println!("  origin:    {}", unit.origin());
    Ok(())
}

fn cmd_units(settings: Settings, like: Option<&str>) -> CliResult<()> {
    let catalog = Catalog::standard(&settings)?;
    for entry in commands::units(&catalog, like)? {
        println!(
            "  {:<6} {:<26} {}",
            entry.symbol,
            entry.name,
            entry.unit.dimension()
        );
    }
    Ok(())
}

fn cmd_combine(
    settings: Settings,
    samples: &[f64],
    systematic: &[f64],
    law: Law,
    coverage: Coverage,
    json: bool,
) -> CliResult<()> {
    let report = commands::combine(&settings, samples, systematic, law, coverage)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} ± {} ({} samples, {} systematic, law {}, {} % coverage)",
            report.estimate.value,
            report.estimate.deviation,
            report.samples,
            report.systematic,
            report.law,
            report.coverage.percent()
        );
    }
    Ok(())
}

fn cmd_settings(settings: Settings) -> CliResult<()> {
    print!("{}", serde_yaml::to_string(&settings)?);
    Ok(())
}
