use anyhow::{Context, Result};
use std::io::Write;
use track_locator::MotionReport;

/// Write reports as a pretty-printed JSON array
pub fn write_reports<W: Write>(mut writer: W, reports: &[MotionReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, reports).context("Failed to serialize reports")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
