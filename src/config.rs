//! Configuration module

use std::env;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Load `.env` (or `env_file`), then build the log filter from `RUST_LOG`.
///
/// Both steps live here so a `RUST_LOG` set in `.env` is always visible to
/// the filter.
pub fn load_env_filter(env_file: Option<&Path>, default_filter: &str) -> EnvFilter {
    let loaded = match env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    // A missing .env is normal
    loaded.ok();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the capture, flow and prediction files
    pub runtime_dir: PathBuf,

    /// Directory holding the trained artifacts
    pub output_dir: PathBuf,

    /// Directory holding the web UI (`static/index.html` lives below it)
    pub web_dir: PathBuf,

    /// File name prefix shared by the four artifacts
    pub artifact_prefix: String,

    /// `timeout` wrapper bounding the capture
    pub timeout_bin: String,

    /// Packet capture tool
    pub tcpdump_bin: String,

    /// Flow feature extractor
    pub cicflowmeter_bin: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let base_dir = env::var("BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let dir_or = |key: &str, default: &str| {
            env::var(key)
                .map(PathBuf::from)
                .unwrap_or_else(|_| base_dir.join(default))
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            runtime_dir: dir_or("RUNTIME_DIR", "runtime"),
            output_dir: dir_or("OUTPUT_DIR", "outputs"),
            web_dir: dir_or("WEB_DIR", "webui"),

            artifact_prefix: env::var("ARTIFACT_PREFIX")
                .unwrap_or_else(|_| "ddos_full".to_string()),

            timeout_bin: env::var("TIMEOUT_BIN")
                .unwrap_or_else(|_| "timeout".to_string()),

            tcpdump_bin: env::var("TCPDUMP_BIN")
                .unwrap_or_else(|_| "tcpdump".to_string()),

            cicflowmeter_bin: env::var("CICFLOWMETER_BIN")
                .unwrap_or_else(|_| "cicflowmeter".to_string()),
        }
    }

    /// Configuration rooted at `base_dir` with default tool names
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            port: 8000,
            runtime_dir: base_dir.join("runtime"),
            output_dir: base_dir.join("outputs"),
            web_dir: base_dir.join("webui"),
            artifact_prefix: "ddos_full".to_string(),
            timeout_bin: "timeout".to_string(),
            tcpdump_bin: "tcpdump".to_string(),
            cicflowmeter_bin: "cicflowmeter".to_string(),
        }
    }

    pub fn pcap_path(&self) -> PathBuf {
        self.runtime_dir.join("live_capture.pcap")
    }

    pub fn flows_csv(&self) -> PathBuf {
        self.runtime_dir.join("live_flows.csv")
    }

    pub fn predictions_csv(&self) -> PathBuf {
        self.runtime_dir.join("live_flows_with_pred.csv")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.web_dir.join("static")
    }

    /// Artifact paths in load order: scaler, selector, label encoder, model
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let file = |suffix: &str| {
            self.output_dir
                .join(format!("{}_{}.json", self.artifact_prefix, suffix))
        };
        ArtifactPaths {
            scaler: file("scaler_20"),
            selector: file("selector_20"),
            label_encoder: file("label_encoder"),
            model: file("gb_20"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub selector: PathBuf,
    pub label_encoder: PathBuf,
    pub model: PathBuf,
}
