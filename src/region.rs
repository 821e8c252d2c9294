//! Supported-region allow-list.

use crate::error::{MonitorError, MonitorResult};

/// Regions the monitor is allowed to report on.
pub const SUPPORTED_REGIONS: [&str; 5] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "eu-west-1",
];

/// Check whether a region name is on the allow-list.
pub fn is_supported(region: &str) -> bool {
    SUPPORTED_REGIONS.contains(&region)
}

/// Validate a region, returning it unchanged when supported.
pub fn validate_region(region: &str) -> MonitorResult<&str> {
    if is_supported(region) {
        Ok(region)
    } else {
        Err(MonitorError::UnsupportedRegion {
            region: region.to_string(),
            supported: SUPPORTED_REGIONS.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_region_validates() {
        for region in SUPPORTED_REGIONS {
            assert_eq!(validate_region(region).expect("supported"), region);
        }
    }

    #[test]
    fn test_unknown_regions_rejected() {
        for region in ["ap-south-1", "eu-central-1", "US-EAST-1", "", " us-east-1"] {
            let err = validate_region(region).expect_err("should reject");
            assert!(matches!(err, MonitorError::UnsupportedRegion { .. }));
        }
    }
}
