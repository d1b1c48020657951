//! Capture request/response models

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const MAX_TIMESPAN_SECS: u32 = 3600;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CaptureRequest {
    #[validate(length(min = 1, max = 64), custom(function = "validate_interface"))]
    pub interface: String,

    /// Capture duration in seconds
    #[validate(range(min = 1, max = 3600))]
    pub timespan: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub status: String,
    pub elapsed_sec: f64,
    pub flows: usize,
}

/// Interface names reach tcpdump as an argument; refuse anything option-like
fn validate_interface(interface: &str) -> Result<(), ValidationError> {
    if interface.starts_with('-') {
        return Err(ValidationError::new("interface_option"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ':' | '@');
    if !interface.chars().all(allowed) {
        return Err(ValidationError::new("interface_chars"));
    }
    Ok(())
}

/// Seconds rounded to two decimals
pub fn round_elapsed(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(interface: &str, timespan: u32) -> CaptureRequest {
        CaptureRequest {
            interface: interface.to_string(),
            timespan,
        }
    }

    #[test]
    fn test_valid_requests() {
        assert!(request("eth0", 10).validate().is_ok());
        assert!(request("enp0s31f6", 1).validate().is_ok());
        assert!(request("wlan0.100", MAX_TIMESPAN_SECS).validate().is_ok());
    }

    #[test]
    fn test_rejected_requests() {
        assert!(request("", 10).validate().is_err());
        assert!(request("-w/etc/passwd", 10).validate().is_err());
        assert!(request("eth0; reboot", 10).validate().is_err());
        assert!(request("eth0", 0).validate().is_err());
        assert!(request("eth0", MAX_TIMESPAN_SECS + 1).validate().is_err());
    }

    #[test]
    fn test_round_elapsed() {
        assert_eq!(round_elapsed(12.3456), 12.35);
        assert_eq!(round_elapsed(0.001), 0.0);
    }
}
