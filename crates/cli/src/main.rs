use std::{error::Error, fs::File, io::BufReader, path::PathBuf};

use api_types::group::GroupDoc;
use clap::{Parser, Subcommand};
use engine::{CurrencySymbol, Group, is_settled};

mod snapshot;

#[derive(Parser, Debug)]
#[command(name = "splitledger")]
#[command(about = "Balances, settlement plans and stats for a group snapshot")]
struct Cli {
    /// Path to a group snapshot (JSON document from the remote store).
    #[arg(long, env = "SPLITLEDGER_SNAPSHOT")]
    snapshot: PathBuf,

    /// Display currency symbol or code (₹, $, €, £, ¥ / INR, USD, ...).
    #[arg(long, default_value = "₹")]
    currency: String,

    /// Emit JSON instead of the human-readable report.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Net balance per member.
    Balances,
    /// Transfer plan that settles all debts.
    Settle,
    /// Spending totals, per member and per month.
    Stats,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("splitledger=info")),
        )
        .init();

    let cli = Cli::parse();
    let currency = CurrencySymbol::try_from(cli.currency.as_str())?;

    let file = File::open(&cli.snapshot)?;
    let doc: GroupDoc = serde_json::from_reader(BufReader::new(file))?;
    let group = snapshot::group_from_doc(doc);
    tracing::debug!(
        group = %group.id,
        members = group.members.len(),
        records = group.records.len(),
        "snapshot loaded"
    );

    match cli.command {
        Command::Balances => print_balances(&group, currency, cli.json)?,
        Command::Settle => print_settlements(&group, currency, cli.json)?,
        Command::Stats => print_stats(&group, currency, cli.json)?,
    }

    Ok(())
}

fn print_balances(
    group: &Group,
    currency: CurrencySymbol,
    json: bool,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let balances = group.balances();

    if json {
        let views: Vec<_> = balances.iter().map(snapshot::balance_view).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if balances.is_empty() {
        println!("No members in group '{}'.", group.name);
        return Ok(());
    }
    for balance in &balances {
        let status = if is_settled(balance.amount) {
            "settled".to_string()
        } else if balance.amount > 0.0 {
            format!("is owed {}", currency.format(balance.amount))
        } else {
            format!("owes {}", currency.format(-balance.amount))
        };
        println!("{:<20} {}", balance.name, status);
    }
    Ok(())
}

fn print_settlements(
    group: &Group,
    currency: CurrencySymbol,
    json: bool,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let plan = group.settlement_plan();

    if json {
        let views: Vec<_> = plan.iter().map(snapshot::transfer_view).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("All settled, nothing to pay.");
        return Ok(());
    }
    for transfer in &plan {
        println!(
            "{} -> {}  {}",
            transfer.from_name,
            transfer.to_name,
            currency.format(transfer.amount)
        );
    }
    Ok(())
}

fn print_stats(
    group: &Group,
    currency: CurrencySymbol,
    json: bool,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let stats = snapshot::stats_view(group);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Total spent: {}", currency.format(stats.total_spent));
    println!();
    println!("By member:");
    for spending in &stats.spending_by_member {
        println!("  {:<20} {}", spending.name, currency.format(spending.amount));
    }
    if !stats.monthly_totals.is_empty() {
        println!();
        println!("By month:");
        for month in &stats.monthly_totals {
            println!("  {:<10} {}", month.label, currency.format(month.amount));
        }
    }
    Ok(())
}
