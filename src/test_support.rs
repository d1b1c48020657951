//! Shared fixtures for unit tests

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use serde_json::json;

use crate::config::{ArtifactPaths, Config};

/// Write a small artifact bundle under `<dir>/outputs`.
///
/// Selected features are `flow_duration` and `tot_fwd_pkts`, the scaler is
/// the identity, and the model labels a flow `DDoS` when `tot_fwd_pkts > 10`.
pub fn write_bundle(dir: &Path) -> ArtifactPaths {
    let paths = Config::with_base_dir(dir).artifact_paths();
    fs::create_dir_all(dir.join("outputs")).unwrap();

    let write = |path: &Path, value: serde_json::Value| {
        fs::write(path, serde_json::to_vec(&value).unwrap()).unwrap();
    };
    write(&paths.scaler, json!({ "mean": [0.0, 0.0], "scale": [1.0, 1.0] }));
    write(
        &paths.selector,
        json!({
            "feature_names_in": ["src_port", "flow_duration", "tot_fwd_pkts"],
            "support": [false, true, true]
        }),
    );
    write(&paths.label_encoder, json!({ "classes": ["BENIGN", "DDoS"] }));
    write(
        &paths.model,
        json!({
            "n_features": 2,
            "learning_rate": 1.0,
            "init": [0.0],
            "classes": [0, 1],
            "estimators": [[{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [1, -2, -2],
                "threshold": [10.0, -2.0, -2.0],
                "value": [0.0, -1.0, 1.0]
            }]]
        }),
    );
    paths
}

/// Write an executable shell script and return its path
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
