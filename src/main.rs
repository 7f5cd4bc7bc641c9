//! capmatch - HTTP service matching uploaded images against a fixed caption set
//!
//! This binary serves the caption matching API: an uploaded image is embedded
//! with a CLIP model pair and ranked against a fixed caption list.

use capmatch::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Start server
    capmatch::start_server(config).await?;

    Ok(())
}
