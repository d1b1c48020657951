//! Capture invoker - time-bounded tcpdump run

use std::path::Path;

use tokio::process::Command;

use crate::config::Config;
use super::{remove_stale, PipelineError};

/// Exit code `timeout` reports when the time limit was reached
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Build `timeout <timespan> tcpdump -i <interface> -w <pcap>`
pub fn capture_command(config: &Config, interface: &str, timespan: u32, pcap: &Path) -> Command {
    let mut cmd = Command::new(&config.timeout_bin);
    cmd.arg(timespan.to_string())
        .arg(&config.tcpdump_bin)
        .arg("-i")
        .arg(interface)
        .arg("-w")
        .arg(pcap);
    cmd
}

/// Interpret the wrapper's exit code; `None` means killed by a signal
pub fn check_capture_exit(code: Option<i32>) -> Result<(), PipelineError> {
    match code {
        Some(0) | Some(TIMEOUT_EXIT_CODE) => Ok(()),
        Some(code) => Err(PipelineError::Exit { tool: "tcpdump", code }),
        None => Err(PipelineError::Signal { tool: "tcpdump" }),
    }
}

/// Capture packets from `interface` for `timespan` seconds into the runtime pcap
pub async fn run_capture(config: &Config, interface: &str, timespan: u32) -> Result<(), PipelineError> {
    let pcap = config.pcap_path();
    remove_stale(&pcap).await?;

    let mut cmd = capture_command(config, interface, timespan, &pcap);
    tracing::info!("Running: {:?}", cmd.as_std());

    let status = cmd
        .status()
        .await
        .map_err(|source| PipelineError::Spawn { tool: "tcpdump", source })?;

    check_capture_exit(status.code())?;
    tracing::debug!("Capture on {} finished ({})", interface, status);
    Ok(())
}
