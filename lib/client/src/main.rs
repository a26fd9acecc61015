//! Prints the features reported by a featuregate server and, when
//! `ValuesFeature` is on, the values resource.
//!
//! Usage: `featuregate_client [BASE_URL]`

use anyhow::Result;
use log::warn;

use featuregate_client::{FeaturesClient, Values};
use featuregate_common::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("http://localhost:{}", DEFAULT_API_LISTEN_PORT));

    let client = FeaturesClient::new(&base)?;
    let features = client.features().await?;

    println!("Features");
    let width = features.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, enabled) in features.iter() {
        println!("  {:width$}  {}", name, if enabled { "on" } else { "off" });
    }

    match features.get("ValuesFeature") {
        Some(true) => {
            println!("Values");
            match client.values().await? {
                Values::Available(values) => values.iter().for_each(|v| println!("  {}", v)),
                Values::Unavailable(message) => println!("  {}", message),
            }
        }
        Some(false) => {}
        None => warn!("server did not report ValuesFeature"),
    }

    Ok(())
}
