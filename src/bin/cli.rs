//! Hydration CLI
//!
//! Talks to a running hydration server over HTTP:
//! - Log a drink the way the bottle does
//! - List logged drinks
//! - Check server status
//! - Write a default server config

use chrono::Local;
use clap::{Parser, Subcommand};
use hydration::api::dto::{HealthResponse, LogDrinkResponse};
use hydration::config::generate_default_config;
use hydration::store::{DrinkRecord, NewDrink};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hydration-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Log and inspect drinks on a hydration server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:8000", global = true)]
    pub api_url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a drink (fluid ounces)
    Log {
        /// Amount drunk
        amount: f64,
        /// Device clock reading (default: current local time, HH:MM:SS)
        #[arg(short, long)]
        rtc_time: Option<String>,
        /// Device drink counter
        #[arg(short, long, default_value = "1")]
        drink_number: i64,
    },

    /// List all logged drinks
    List {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show server status
    Status,

    /// Generate default server config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Log {
            amount,
            rtc_time,
            drink_number,
        } => {
            let rtc_time = rtc_time.unwrap_or_else(|| Local::now().format("%H:%M:%S").to_string());
            let drink = NewDrink::new(amount, rtc_time, drink_number);

            let response = client
                .post(format!("{}/log_drink", cli.api_url))
                .json(&drink)
                .send()
                .await?;

            if response.status().is_success() {
                let logged: LogDrinkResponse = response.json().await?;
                println!(
                    "Logged drink #{}: {:.1} Fl oz (rtc {})",
                    logged.drink.drink_number, logged.drink.amount_drank, logged.drink.rtc_time
                );
            } else {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed ({}): {}", status, text);
                std::process::exit(1);
            }
        }

        Commands::List { format } => {
            let response = client
                .get(format!("{}/api/drinks", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                eprintln!("Failed to fetch drinks: {}", response.status());
                std::process::exit(1);
            }

            let drinks: Vec<DrinkRecord> = response.json().await?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&drinks)?);
            } else {
                print_table(&drinks);
            }
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: HealthResponse = resp.json().await?;

                    println!("Hydration server v{}", health.version);
                    println!();
                    println!("Status: {}", health.status);
                    println!("Drink log: {}", health.store);
                    if let Some(count) = health.drinks_logged {
                        println!("Drinks logged: {}", count);
                    }
                    println!();
                    println!("Uptime: {}", format_duration(health.uptime_seconds));
                }
                Ok(resp) => {
                    eprintln!("Server returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to hydration server at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin hydration");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            if let Some(path) = output {
                std::fs::write(&path, &config)?;
                println!("Config written to {:?}", path);
            } else {
                print!("{}", config);
            }
        }
    }

    Ok(())
}

/// Print drinks with the same totals the dashboard shows
fn print_table(drinks: &[DrinkRecord]) {
    if drinks.is_empty() {
        println!("No drinks logged yet.");
        println!();
        println!("Log your first drink with:");
        println!("  hydration-cli log 8.5");
        return;
    }

    println!("{:<8} {:>10}  {}", "Drink #", "Fl oz", "Received");
    println!("{}", "-".repeat(50));

    for drink in drinks {
        println!(
            "{:<8} {:>10.1}  {}",
            drink.drink_number, drink.amount, drink.timestamp
        );
    }

    let total: f64 = drinks.iter().map(|d| d.amount).sum();
    println!("{}", "-".repeat(50));
    println!("Total: {:.1} Fl oz over {} drinks", total, drinks.len());
}

fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, seconds % 60)
    }
}
