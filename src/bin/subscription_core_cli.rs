use std::{error::Error, path::PathBuf, process::exit};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use uuid::Uuid;

use subscription_core::{
    config::{Config, ConfigManager},
    core::{
        ledger::{self, LedgerFilter, LedgerPeriod},
        notifications,
        services::SubscriptionService,
        DerivedViews, FixedClock, SubscriptionTracker,
    },
    domain::{parse_timestamp, Subscription, Transaction, UserProfile},
    storage::{save_export, JsonRepository},
};

/// Read-only reports over a directory of stored subscriptions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Data directory holding `config.json` and `subscriptions/`. Defaults to the app data dir.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Owner whose subscriptions are read.
    #[arg(long, global = true)]
    owner: Option<Uuid>,

    /// Reference time (RFC 3339 or YYYY-MM-DD). Defaults to the current time.
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dashboard totals, category breakdown, and the six-month billing summary.
    Report {
        /// Print the derived views as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Synthetic payment history, newest first.
    Ledger {
        /// One of all, month, quarter, year.
        #[arg(long, default_value = "all")]
        period: LedgerPeriod,
        /// Case-insensitive match on subscription name or category.
        #[arg(long)]
        search: Option<String>,
    },
    /// Payments due soon with their reminder dates.
    Upcoming {
        /// Window in days. Defaults to the configured upcoming window.
        #[arg(long)]
        days: Option<i64>,
    },
    /// Writes the data export document.
    Export {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Destination file. Prints to stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() {
    subscription_core::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("{} {err}", "error:".red().bold());
        exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.data_dir {
        Some(dir) => ConfigManager::with_base_dir(dir.clone()).load()?,
        None => ConfigManager::new().load()?,
    };
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| config.resolve_data_root());
    let owner = args.owner.ok_or("--owner is required")?;

    let service = SubscriptionService::new(Box::new(JsonRepository::in_base_dir(&data_dir)));
    let tracker = match &args.now {
        Some(raw) => {
            let clock = FixedClock(parse_timestamp(raw)?);
            SubscriptionTracker::with_clock(owner, service, config, Box::new(clock))?
        }
        None => SubscriptionTracker::new(owner, service, config)?,
    };

    match args.command {
        Command::Report { json } => {
            let views = tracker.views()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                print_report(&views, tracker.config());
            }
        }
        Command::Ledger { period, search } => {
            let history = tracker.ledger(&LedgerFilter { period, search })?;
            print_ledger(&history);
        }
        Command::Upcoming { days } => {
            let days = days.unwrap_or(tracker.config().upcoming_window_days);
            print_upcoming(&tracker.subscriptions()?, tracker.now(), days);
        }
        Command::Export {
            username,
            email,
            output,
        } => {
            let export = tracker.export(UserProfile::new(owner, username, email)?)?;
            match output {
                Some(path) => {
                    save_export(&export, &path)?;
                    println!("{} {}", "Exported to".green(), path.display());
                }
                None => println!("{}", export.to_json()?),
            }
        }
    }
    Ok(())
}

fn section(title: &str) {
    println!("{}", format!("=== {title} ===").bold());
}

fn money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

fn print_report(views: &DerivedViews, config: &Config) {
    let currency = config.default_currency.as_str();
    section("Overview");
    println!(
        "Monthly expense:   {}",
        money(views.total_monthly_expense, currency).green()
    );
    println!(
        "Yearly projection: {}",
        money(views.yearly_projection, currency)
    );
    println!("Active:            {}", views.active_count);
    match &views.next_payment {
        Some(next) => println!(
            "Next payment:      {} on {}",
            next.name.cyan(),
            next.next_billing_date.format("%b %d, %Y")
        ),
        None => println!("Next payment:      {}", "none".dimmed()),
    }

    section("By category");
    if views.category_totals.is_empty() {
        println!("{}", "No active subscriptions.".dimmed());
    }
    for total in &views.category_totals {
        println!(
            "{:<14} {}",
            total.category.label(),
            money(total.monthly_amount, currency)
        );
    }

    section("Billing summary");
    for bucket in &views.billing_summary {
        println!("{:<4} {}", bucket.label, money(bucket.amount, currency));
    }
}

/// Amounts are summed per currency code and never converted.
fn currency_totals(transactions: &[Transaction]) -> String {
    ledger::totals_by_currency(transactions)
        .iter()
        .map(|(code, total)| money(*total, code))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_ledger(history: &[Transaction]) {
    if history.is_empty() {
        println!("{}", "No transactions.".dimmed());
        return;
    }
    for group in ledger::group_by_month(history) {
        section(&group.label);
        for txn in &group.transactions {
            println!(
                "{}  {:<20} {:>12}  {}",
                txn.date.format("%Y-%m-%d"),
                txn.subscription_name,
                money(txn.amount, &txn.currency),
                txn.category.label().dimmed()
            );
        }
        println!(
            "{} {}",
            "Month total:".bold(),
            currency_totals(&group.transactions)
        );
    }
    println!("{} {}", "Total:".bold(), currency_totals(history));
}

fn print_upcoming(subscriptions: &[Subscription], now: DateTime<Utc>, days: i64) {
    let upcoming = notifications::upcoming_notifications(subscriptions, now, days);
    section(&format!("Due within {days} days"));
    if upcoming.is_empty() {
        println!("{}", "Nothing due.".dimmed());
        return;
    }
    for payment in upcoming {
        let subscription = &payment.subscription;
        println!(
            "{:<20} {:>12}  in {} day(s)  notify: {}",
            subscription.name.cyan(),
            money(subscription.amount, &subscription.currency),
            payment.days_until_billing,
            payment.notify_at.label().yellow()
        );
    }
}
