// 📤 Output Sink - renders the summary as JSON
// Map keys are sorted, so identical input renders byte-identical output

use crate::error::Result;
use crate::summary::Summary;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Two-space indented JSON
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

pub fn render(summary: &Summary, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(summary)?,
        OutputFormat::Compact => serde_json::to_string(summary)?,
    };
    Ok(text)
}

/// Write the rendering followed by a newline
pub fn write_summary<W: Write>(summary: &Summary, format: OutputFormat, mut writer: W) -> Result<()> {
    let text = render(summary, format)?;
    writeln!(writer, "{}", text)?;
    writer.flush()?;
    Ok(())
}
