//! Intraday Stock Screener
//!
//! Buckets equity quotes into breakout, pullback and watch signals, then sizes
//! each trade so a stop-out loses at most a fixed fraction of capital.

mod feed;
mod models;
mod report;
mod trading;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::report::ScreenReport;
use crate::trading::{PositionSizer, RiskSettings, ScreenerConfig, SignalClassifier};

/// Intraday screener CLI.
#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Screen intraday breakout and pullback setups with risk-based sizing", long_about = None)]
struct Cli {
    /// Screener thresholds as JSON (defaults used when omitted)
    #[arg(long, env = "SCREENER_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Capital and risk per trade.
#[derive(Args, Clone, Copy)]
struct RiskArgs {
    /// Trading capital
    #[arg(short, long, env = "SCREENER_CAPITAL", default_value = "100000")]
    capital: Decimal,

    /// Risk per trade in percent of capital (max 5)
    #[arg(short, long, env = "SCREENER_RISK_PERCENT", default_value = "1")]
    risk: Decimal,
}

impl RiskArgs {
    fn settings(&self) -> Result<RiskSettings> {
        let settings = RiskSettings::new(self.capital, self.risk);
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify quotes and size every setup
    Screen {
        /// Quote file (JSON), or "-" for stdin
        #[arg(short, long, env = "SCREENER_QUOTES", default_value = "-")]
        quotes: String,

        #[command(flatten)]
        risk: RiskArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Size a single trade
    Size {
        /// Entry price
        #[arg(long)]
        entry: Decimal,

        /// Stop-loss price
        #[arg(long)]
        stop_loss: Decimal,

        /// Target price
        #[arg(long)]
        target: Option<Decimal>,

        #[command(flatten)]
        risk: RiskArgs,
    },

    /// Re-screen a quote file on a fixed interval
    Watch {
        /// Quote file (JSON)
        #[arg(short, long, env = "SCREENER_QUOTES")]
        quotes: String,

        /// Refresh interval in seconds
        #[arg(short, long, default_value = "60")]
        interval: u64,

        #[command(flatten)]
        risk: RiskArgs,
    },

    /// Show current configuration
    Config {
        #[command(flatten)]
        risk: RiskArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => ScreenerConfig::from_file(path)?,
        None => ScreenerConfig::default(),
    };
    let classifier = SignalClassifier::new(config);

    match cli.command {
        Commands::Screen { quotes, risk, json } => {
            let settings = risk.settings()?;
            let quotes = feed::load_quotes(&quotes).await?;

            let report = ScreenReport::build(&classifier, settings, &quotes);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }

        Commands::Size {
            entry,
            stop_loss,
            target,
            risk,
        } => {
            let settings = risk.settings()?;
            let sizer = PositionSizer::new(settings);
            let target = target.unwrap_or(entry);
            let plan = sizer.plan_levels(entry, stop_loss, target);

            info!(
                entry = %entry,
                stop_loss = %stop_loss,
                quantity = plan.quantity,
                "Sized trade"
            );

            println!("\n=== Position Size ===");
            println!("Capital:         {}", settings.capital);
            println!("Risk Per Trade:  {}%", settings.risk_percent);
            println!("Max Risk:        {:.2}", settings.max_risk_per_trade());
            println!("Risk Per Share:  {:.2}", entry.saturating_sub(stop_loss));
            println!("\nQuantity:        {}", plan.quantity);
            println!("Investment:      {:.2}", plan.investment);
            println!("Max Loss:        {:.2}", plan.potential_loss);
            println!("Potential Profit: {:.2}", plan.potential_profit);

            if plan.is_empty() {
                println!("\nNo position: stop-loss must be below entry.");
            } else if plan.investment > settings.capital {
                println!("\nWarning: investment exceeds capital of {}.", settings.capital);
            }
        }

        Commands::Watch {
            quotes,
            interval,
            risk,
        } => {
            let settings = risk.settings()?;
            info!(quotes = %quotes, interval = interval, "Starting watch mode");

            println!("\n=== Intraday Screener: Watch Mode ===");
            println!("Quotes:   {}", quotes);
            println!("Interval: {}s", interval);
            println!("Press Ctrl+C to stop.\n");

            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval.max(1)));

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        println!("\nStopping watch mode...");
                        break;
                    }
                    _ = ticker.tick() => {
                        match feed::load_quotes(&quotes).await {
                            Ok(batch) => {
                                let report = ScreenReport::build(&classifier, settings, &batch);
                                println!("{}", report);
                                println!(
                                    "[{}] {} quotes | {} actionable",
                                    chrono::Local::now().format("%H:%M:%S"),
                                    report.summary.total(),
                                    report.summary.actionable()
                                );
                            }
                            Err(e) => {
                                warn!(error = %e, "Failed to refresh quotes");
                            }
                        }
                    }
                }
            }
        }

        Commands::Config { risk } => {
            let config = classifier.config();

            println!("\n=== Screener Configuration ===\n");
            println!("Signal Rules:");
            println!("  Volume Threshold:     {}", config.volume_threshold);
            println!("  Breakout Change:      > {}%", config.breakout_change_pct);
            println!(
                "  Pullback Change:      {}% - {}%",
                config.pullback_change_pct, config.breakout_change_pct
            );

            println!("\nTrade Levels:");
            println!("  Breakout Stop:        {}x entry", config.breakout_stop_multiplier);
            println!("  Breakout Target:      {}x entry", config.breakout_target_multiplier);
            println!("  Pullback Stop:        {}x entry", config.pullback_stop_multiplier);
            println!("  Pullback Target:      {}x entry", config.pullback_target_multiplier);

            let settings = risk.settings()?;
            println!("\nRisk Settings:");
            println!("  Capital:              {}", settings.capital);
            println!("  Risk Per Trade:       {}%", settings.risk_percent);
            println!("  Max Risk Per Trade:   {:.2}", settings.max_risk_per_trade());
        }
    }

    Ok(())
}
