//! External tool availability check.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::tools::SystemTool;

/// Check that the downloader and the encoder can be run
pub fn cmd_check_tools(config: &Config) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    println!("Checking external tools...\n");

    let downloader = SystemTool::new(config.download.downloader.clone());
    let encoder = SystemTool::new(config.convert.encoder.clone());

    for (tool, flag) in [(&downloader, "--version"), (&encoder, "-version")] {
        match rt.block_on(tool.version(flag)) {
            Some(version) => println!("✓ {}: {}", tool.program(), version),
            None => println!("✗ {}: NOT FOUND", tool.program()),
        }
    }

    println!();
    println!("Search endpoint: {}", config.download.search_url);
    Ok(())
}
