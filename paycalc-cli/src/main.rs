use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use paycalc_cli::args::{
    parse_bonus, parse_contribution, parse_deduction, parse_frequency, parse_province,
};
use paycalc_cli::config::{DEFAULT_CONFIG_FILE, PaycalcConfig};
use paycalc_cli::report::{self, BatchEntry};
use paycalc_cli::{logging, scenario_loader};
use paycalc_core::calculations::{MortgageInput, PaymentFrequency, calculate_mortgage_payment};
use paycalc_core::{
    BonusEntry, ContributionSpec, DeductionEntry, IncomeSpec, ProvinceCode, TableSet,
    TaxCalculator, TaxInput, VoluntaryContributions,
};
use paycalc_data::TableLoader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Canadian payroll tax estimator.
///
/// Computes federal and provincial income tax, pension and insurance
/// contributions, and take-home pay from the bundled reference tables.
#[derive(Debug, Parser)]
#[command(name = "paycalc", version, about)]
struct Cli {
    /// Configuration file. Defaults to `paycalc.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of CSV files overriding the bundled tables.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `paycalc_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate taxes for one income.
    Tax(TaxArgs),
    /// Calculate taxes for every row of a scenario CSV file.
    Batch(BatchArgs),
    /// Calculate a fixed mortgage payment.
    Mortgage(MortgageArgs),
    /// List the reference tables that are loaded.
    Tables,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("income").required(true).args(["annual", "hourly"])))]
struct TaxArgs {
    /// Province code (defaults to the configured province).
    #[arg(long, value_parser = parse_province)]
    province: Option<ProvinceCode>,

    /// Tax year (defaults to the configured or current year).
    #[arg(long)]
    year: Option<i32>,

    /// Annual salary.
    #[arg(long)]
    annual: Option<Decimal>,

    /// Hourly wage; requires --hours.
    #[arg(long, requires = "hours")]
    hourly: Option<Decimal>,

    /// Hours worked per week.
    #[arg(long)]
    hours: Option<Decimal>,

    /// `percentage:<pct>`, `premium:<amount>:<hours>` or `travel:<amount>:<distance>`.
    #[arg(long = "bonus", value_parser = parse_bonus)]
    bonuses: Vec<BonusEntry>,

    /// Retirement plan contribution: `percent:<pct>` or `amount:<dollars>`.
    #[arg(long, value_parser = parse_contribution)]
    rrsp: Option<ContributionSpec>,

    /// Tax-free savings contribution: `percent:<pct>` or `amount:<dollars>`.
    #[arg(long, value_parser = parse_contribution)]
    tfsa: Option<ContributionSpec>,

    /// `<name>:percent:<pct>` or `<name>:amount:<dollars>`.
    #[arg(long = "deduction", value_parser = parse_deduction)]
    deductions: Vec<DeductionEntry>,

    /// Print JSON instead of a text report.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Scenario CSV file.
    #[arg(short, long)]
    file: PathBuf,

    /// Print JSON instead of a summary table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct MortgageArgs {
    /// Purchase price.
    #[arg(long)]
    price: Decimal,

    /// Down payment.
    #[arg(long, default_value = "0")]
    down: Decimal,

    /// Annual interest rate in percent.
    #[arg(long)]
    rate: Decimal,

    /// Amortization period in years.
    #[arg(long, default_value_t = 25)]
    years: u32,

    /// `monthly`, `bi-weekly` or `annual`.
    #[arg(long, default_value = "monthly", value_parser = parse_frequency)]
    frequency: PaymentFrequency,

    /// Print JSON instead of a text report.
    #[arg(long)]
    json: bool,
}

// ─── commands ────────────────────────────────────────────────────────────────

fn load_tables(data_dir: Option<&Path>) -> Result<TableSet> {
    match data_dir {
        Some(dir) => TableLoader::load_dir(dir)
            .with_context(|| format!("Failed to load tables from: {}", dir.display())),
        None => TableLoader::shipped().context("Failed to load bundled tables"),
    }
}

fn run_tax(
    args: TaxArgs,
    config: &PaycalcConfig,
    calculator: &TaxCalculator<Arc<TableSet>>,
) -> Result<()> {
    let income = match (args.annual, args.hourly, args.hours) {
        (Some(amount), _, _) => IncomeSpec::Annual { amount },
        (None, Some(rate), Some(hours_per_week)) => IncomeSpec::Hourly {
            rate,
            hours_per_week,
        },
        _ => anyhow::bail!("either --annual or --hourly with --hours is required"),
    };

    let input = TaxInput {
        province: args.province.unwrap_or_else(|| config.province()),
        tax_year: args.year.unwrap_or_else(|| config.year()),
        income,
        bonuses: args.bonuses,
        contributions: VoluntaryContributions {
            retirement: args.rrsp,
            tax_free: args.tfsa,
        },
        deductions: args.deductions,
    };
    debug!(?input, "calculating");

    let result = calculator
        .calculate(&input)
        .context("Calculation failed")?;

    if args.json {
        println!("{}", report::to_json(&result)?);
    } else {
        print!("{}", report::render_tax(&result));
    }
    Ok(())
}

fn run_batch(
    args: BatchArgs,
    calculator: &TaxCalculator<Arc<TableSet>>,
) -> Result<()> {
    let inputs = scenario_loader::load_from_file(&args.file)
        .with_context(|| format!("Failed to load scenarios: {}", args.file.display()))?;
    info!(scenarios = inputs.len(), file = %args.file.display(), "running batch");

    let outcomes: Vec<_> = inputs
        .iter()
        .map(|input| calculator.calculate(input))
        .collect();
    let entries: Vec<BatchEntry<'_>> = outcomes
        .iter()
        .enumerate()
        .map(|(idx, outcome)| BatchEntry::new(idx + 1, outcome))
        .collect();

    if args.json {
        println!("{}", report::to_json(&entries)?);
    } else {
        print!("{}", report::render_batch(&entries));
    }

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    if failed > 0 {
        info!(failed, "some scenarios could not be calculated");
    }
    Ok(())
}

fn run_mortgage(args: MortgageArgs) -> Result<()> {
    let input = MortgageInput {
        purchase_price: args.price,
        down_payment: args.down,
        annual_rate_percent: args.rate,
        amortization_years: args.years,
        frequency: args.frequency,
    };
    let payment = calculate_mortgage_payment(&input).context("Mortgage calculation failed")?;

    if args.json {
        println!("{}", report::to_json(&payment)?);
    } else {
        print!("{}", report::render_mortgage(&payment));
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        PaycalcConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut logging_config = config.logging.clone();
    if let Some(level) = cli.log_level {
        logging_config.level = level;
    }
    logging::init_logging(&logging_config)?;
    match &config.source {
        Some(path) => debug!(path = %path.display(), "configuration loaded"),
        None => debug!("no {DEFAULT_CONFIG_FILE} found; using defaults"),
    }

    let data_dir = cli.data_dir.as_deref().or(config.data_dir.as_deref());
    let tables = load_tables(data_dir)?;

    match cli.command {
        Command::Tax(args) => run_tax(args, &config, &TaxCalculator::new(Arc::new(tables))),
        Command::Batch(args) => run_batch(args, &TaxCalculator::new(Arc::new(tables))),
        Command::Mortgage(args) => run_mortgage(args),
        Command::Tables => {
            print!("{}", report::render_tables(&tables));
            Ok(())
        }
    }
}
