//! Feature extractor invoker - pcap to flow CSV via cicflowmeter

use std::path::Path;

use tokio::process::Command;

use crate::config::Config;
use super::{remove_stale, PipelineError};

/// Build `cicflowmeter -f <pcap> -c <csv>`
pub fn extract_command(config: &Config, pcap: &Path, csv: &Path) -> Command {
    let mut cmd = Command::new(&config.cicflowmeter_bin);
    cmd.arg("-f").arg(pcap).arg("-c").arg(csv);
    cmd
}

pub async fn run_extractor(config: &Config) -> Result<(), PipelineError> {
    let (pcap, csv) = (config.pcap_path(), config.flows_csv());
    remove_stale(&csv).await?;

    let mut cmd = extract_command(config, &pcap, &csv);
    tracing::info!("Running: {:?}", cmd.as_std());

    let status = cmd
        .status()
        .await
        .map_err(|source| PipelineError::Spawn { tool: "cicflowmeter", source })?;

    match status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(PipelineError::Exit { tool: "cicflowmeter", code }),
        None => Err(PipelineError::Signal { tool: "cicflowmeter" }),
    }
}
