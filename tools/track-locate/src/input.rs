use anyhow::{Context, Result};
use std::path::Path;
use track_locator::{LocatorConfig, PositionFix};

/// Read a JSON array of fixes, rejecting any with an out-of-range coordinate
pub fn read_fixes(path: &Path) -> Result<Vec<PositionFix>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixes from {}", path.display()))?;
    parse_fixes(&text).with_context(|| format!("Invalid fixes in {}", path.display()))
}

fn parse_fixes(text: &str) -> Result<Vec<PositionFix>> {
    let fixes: Vec<PositionFix> = serde_json::from_str(text)?;

    for (index, fix) in fixes.iter().enumerate() {
        fix.validate().with_context(|| format!("fix #{index}"))?;
    }

    Ok(fixes)
}

/// Newest fix timestamp, used as the clock when replaying a recorded log
pub fn latest_timestamp(fixes: &[PositionFix]) -> Option<i64> {
    fixes.iter().map(|fix| fix.timestamp_ms).max()
}

/// Read a locator config. Fields left out keep their defaults.
pub fn read_config(path: &Path) -> Result<LocatorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Invalid config in {}", path.display()))
}

fn parse_config(text: &str) -> Result<LocatorConfig> {
    Ok(serde_json::from_str(text)?)
}
