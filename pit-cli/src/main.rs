use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use pit_cli::{format_vnd, parse_dependent_window, parse_months};
use pit_core::{
    AggregationContext, InsuranceOptions, NetTaxInput, Regime, Region, TaxInput, TaxResult,
    aggregate_months, compute_tax, gross_from_net, reconcile,
};

/// Vietnamese personal income tax calculator.
///
/// Computes monthly withholding (gross to net and back) and year-end
/// settlements under the pre- and post-July-2026 tax laws.
#[derive(Parser, Debug)]
#[command(name = "pit")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute net take-home pay from a gross salary
    GrossToNet {
        /// Monthly gross salary in VND
        #[arg(long)]
        gross: Decimal,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Solve for the gross salary that yields a target net income
    NetToGross {
        /// Target monthly net income in VND
        #[arg(long)]
        net: Decimal,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Reconcile a year of monthly income into a settlement
    Settle {
        /// CSV file with columns month,gross_salary,bonus,tax_paid
        #[arg(short, long)]
        file: PathBuf,

        /// Settlement year
        #[arg(long)]
        year: i32,

        /// Minimum-wage region (1-4)
        #[arg(long, default_value_t = 1)]
        region: u8,

        /// Dependent registration windows, e.g. --dependent 1-12 --dependent 7-12
        #[arg(long = "dependent")]
        dependents: Vec<String>,

        /// Skip all insurance contributions
        #[arg(long, default_value_t = false)]
        no_insurance: bool,

        /// Override the summed monthly withholding with a known total
        #[arg(long)]
        tax_paid: Option<Decimal>,
    },
}

/// Parameters shared by the monthly gross/net conversions.
#[derive(Args, Debug)]
struct CommonArgs {
    /// Salary registered for insurance/tax, when different from gross
    #[arg(long)]
    declared: Option<Decimal>,

    /// Number of registered dependents
    #[arg(long, default_value_t = 0)]
    dependents: u32,

    /// Extra deductions (charity, capped voluntary pension) in VND
    #[arg(long, default_value_t = Decimal::ZERO)]
    other_deductions: Decimal,

    /// Minimum-wage region (1-4)
    #[arg(long, default_value_t = 1)]
    region: u8,

    /// Tax regime: "old", "new", or derived from --date when omitted
    #[arg(long)]
    regime: Option<String>,

    /// Date for cap schedules and regime selection (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Skip all insurance contributions
    #[arg(long, default_value_t = false)]
    no_insurance: bool,
}

impl CommonArgs {
    fn region(&self) -> Result<Region> {
        Region::from_number(self.region)
            .with_context(|| format!("region must be 1-4, got {}", self.region))
    }

    fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    fn regime(&self) -> Result<Regime> {
        match &self.regime {
            Some(s) => match Regime::parse(s) {
                Some(regime) => Ok(regime),
                None => bail!("regime must be 'old' or 'new', got '{s}'"),
            },
            None => Ok(Regime::for_date(self.date())),
        }
    }

    fn insurance(&self) -> InsuranceOptions {
        if self.no_insurance { InsuranceOptions::none() } else { InsuranceOptions::all_enabled() }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::GrossToNet { gross, common } => gross_to_net(gross, &common),
        Command::NetToGross { net, common } => net_to_gross(net, &common),
        Command::Settle { file, year, region, dependents, no_insurance, tax_paid } => {
            settle(&file, year, region, &dependents, no_insurance, tax_paid)
        }
    }
}

fn gross_to_net(
    gross: Decimal,
    common: &CommonArgs,
) -> Result<()> {
    let input = TaxInput {
        gross_income: gross,
        declared_salary: common.declared,
        dependents: common.dependents,
        other_deductions: common.other_deductions,
        insurance: common.insurance(),
        region: common.region()?,
        regime: common.regime()?,
        as_of: common.date(),
    };

    print_tax_result(&compute_tax(&input), input.regime);
    Ok(())
}

fn net_to_gross(
    net: Decimal,
    common: &CommonArgs,
) -> Result<()> {
    let params = NetTaxInput {
        declared_salary: common.declared,
        dependents: common.dependents,
        other_deductions: common.other_deductions,
        insurance: common.insurance(),
        region: common.region()?,
        regime: common.regime()?,
        as_of: common.date(),
    };

    let outcome = gross_from_net(net, &params);
    if outcome.approximate {
        println!("Warning: target net could not be reached exactly; result is approximate.");
    }
    println!("Gross salary:     {}", format_vnd(outcome.result.gross_income));
    print_tax_result(&outcome.result, params.regime);
    Ok(())
}

fn settle(
    file: &PathBuf,
    year: i32,
    region: u8,
    dependents: &[String],
    no_insurance: bool,
    tax_paid: Option<Decimal>,
) -> Result<()> {
    let region = Region::from_number(region)
        .with_context(|| format!("region must be 1-4, got {region}"))?;
    let windows = dependents
        .iter()
        .map(|s| parse_dependent_window(s))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --dependent window")?;

    let handle =
        File::open(file).with_context(|| format!("Failed to open: {}", file.display()))?;
    let entries = parse_months(handle)
        .with_context(|| format!("Failed to parse month file: {}", file.display()))?;

    println!("Parsed {} month entries for {year}", entries.len());

    let context = AggregationContext {
        year,
        region,
        insurance: if no_insurance {
            InsuranceOptions::none()
        } else {
            InsuranceOptions::all_enabled()
        },
    };
    let totals = aggregate_months(&entries, &windows, &context);
    let settlement = reconcile(&totals, tax_paid);

    println!("Total gross:      {}", format_vnd(totals.total_gross));
    println!("Total insurance:  {}", format_vnd(totals.total_insurance));
    println!("Assessable:       {}", format_vnd(settlement.assessable_income));
    for period in &settlement.periods {
        println!(
            "  {} law, {} months: assessable {}, due {}",
            period.regime.as_str(),
            period.month_count,
            format_vnd(period.assessable_income),
            format_vnd(period.tax_due),
        );
    }
    println!("Annual tax due:   {}", format_vnd(settlement.annual_tax_due));
    println!("Tax already paid: {}", format_vnd(settlement.total_tax_paid));
    println!("Difference:       {}", format_vnd(settlement.difference));
    println!("Settlement:       {}", settlement.settlement_type.as_str());
    Ok(())
}

fn print_tax_result(
    result: &TaxResult,
    regime: Regime,
) {
    println!("Regime:           {}", regime.as_str());
    println!("Insurance:        {}", format_vnd(result.insurance.total));
    println!("  social:         {}", format_vnd(result.insurance.social));
    println!("  health:         {}", format_vnd(result.insurance.health));
    println!("  unemployment:   {}", format_vnd(result.insurance.unemployment));
    println!("Deductions:       {}", format_vnd(result.deductions.total));
    println!("Taxable income:   {}", format_vnd(result.taxable_income));
    println!("Tax:              {}", format_vnd(result.tax));
    for line in &result.breakdown {
        println!(
            "  bracket {} ({}%): {} taxed, {}",
            line.bracket + 1,
            (line.rate * Decimal::from(100)).normalize(),
            format_vnd(line.taxable_amount),
            format_vnd(line.tax_amount),
        );
    }
    println!("Net income:       {}", format_vnd(result.net_income));
    println!("Effective rate:   {}%", result.effective_rate.round_dp(2));
}
