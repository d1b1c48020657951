//! Pipeline Module - capture → extract → classify
//!
//! One cycle shells out to the capture tool, then the flow extractor, then
//! classifies the resulting CSV with the loaded artifacts.

pub mod capture;
pub mod extract;
pub mod classify;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::Config;
use crate::flows::FlowRecord;
use crate::model::ArtifactBundle;

pub use capture::{run_capture, TIMEOUT_EXIT_CODE};
pub use extract::run_extractor;
pub use classify::classify_flows;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with code {code}")]
    Exit { tool: &'static str, code: i32 },

    #[error("{tool} was terminated by a signal")]
    Signal { tool: &'static str },

    #[error("runtime file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("classification task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result of one full cycle
#[derive(Debug)]
pub struct CycleReport {
    pub elapsed: Duration,
    pub records: Vec<FlowRecord>,
}

/// Run capture, extraction and classification in sequence
pub async fn run_cycle(
    config: Arc<Config>,
    bundle: Option<Arc<ArtifactBundle>>,
    interface: &str,
    timespan: u32,
) -> Result<CycleReport, PipelineError> {
    let start = Instant::now();

    run_capture(&config, interface, timespan).await?;
    run_extractor(&config).await?;

    let records = tokio::task::spawn_blocking(move || {
        let predictions_csv = config.predictions_csv();
        classify_flows(&config.flows_csv(), Some(&predictions_csv), bundle.as_deref())
    })
    .await?;

    Ok(CycleReport {
        elapsed: start.elapsed(),
        records,
    })
}

/// Remove a file left over from the previous cycle
pub(crate) async fn remove_stale(path: &Path) -> Result<(), PipelineError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{write_bundle, write_script};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_full_cycle_with_stub_tools() {
        let dir = tempdir().unwrap();
        let mut config = Config::with_base_dir(dir.path());
        std::fs::create_dir_all(&config.runtime_dir).unwrap();

        config.tcpdump_bin = write_script(dir.path(), "tcpdump", "touch \"$4\"").display().to_string();
        config.cicflowmeter_bin = write_script(
            dir.path(),
            "cicflowmeter",
            "printf 'src_ip,dst_ip,tot_fwd_pkts\\n10.1.1.1,10.1.1.2,40\\n' > \"$4\"",
        )
        .display()
        .to_string();

        let bundle = ArtifactBundle::load(&write_bundle(dir.path())).unwrap();
        let config = Arc::new(config);
        let report = run_cycle(config.clone(), Some(Arc::new(bundle)), "lo", 1).await.unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].prediction.to_string(), "DDoS");
        assert!(config.pcap_path().exists());
        assert!(config.predictions_csv().exists());
    }

    #[tokio::test]
    async fn test_extractor_failure_stops_cycle() {
        let dir = tempdir().unwrap();
        let mut config = Config::with_base_dir(dir.path());
        std::fs::create_dir_all(&config.runtime_dir).unwrap();
        config.tcpdump_bin = write_script(dir.path(), "tcpdump", "exit 0").display().to_string();
        config.cicflowmeter_bin = write_script(dir.path(), "cicflowmeter", "exit 1").display().to_string();

        let err = run_cycle(Arc::new(config), None, "lo", 1).await.unwrap_err();
        assert_eq!(err.to_string(), "cicflowmeter failed with code 1");
    }
}
