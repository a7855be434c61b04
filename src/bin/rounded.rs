//! Terminal client for the weather gateway.
//!
//! Prints the condition emoji and location name, then the "feels like"
//! temperature rounded to the nearest five degrees.

use clap::Parser;
use serde_json::Value;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use weather_gateway::display::RoundedReading;
use weather_gateway::upstream::{DEFAULT_COUNTRY, DEFAULT_ZIP};

#[derive(Debug, Parser)]
#[command(name = "rounded", about = "Show the rounded real-feel temperature for a zip code")]
struct Args {
    /// Zip code to look up.
    #[arg(default_value = DEFAULT_ZIP)]
    zip: String,

    /// Gateway endpoint.
    #[arg(long, default_value = "http://127.0.0.1:8787")]
    endpoint: String,

    /// Show the exact real feel and description instead of the rounded value.
    #[arg(long)]
    real_feel: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), String> {
    let zip = args.zip.trim();
    if zip.is_empty() {
        return Err("Error: zip code is empty".to_string());
    }

    let response = reqwest::Client::new()
        .get(&args.endpoint)
        .query(&[("zip", zip), ("country", DEFAULT_COUNTRY)])
        .send()
        .await
        .map_err(|err| {
            tracing::debug!("Gateway request failed: {}", err);
            "Failed to fetch weather".to_string()
        })?;

    let status = response.status();
    let body: Option<Value> = response.json().await.ok();

    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Error: {}", status));
        return Err(message);
    }

    let reading = body
        .as_ref()
        .and_then(RoundedReading::from_weather)
        .ok_or_else(|| "Failed to parse weather response".to_string())?;

    println!("{}", reading.headline());
    if args.real_feel {
        println!("{}", reading.real_feel_label());
    } else {
        println!("{}", reading.rounded_label());
    }
    Ok(())
}
