use anyhow::{Context, Result};
use gloo::utils::document;
use jitterplot_common::PlotConfig;
use tracing::warn;

const CONFIG_ELEMENT_ID: &str = "plot-config";

/// Defaults, overridden by a `<script id="plot-config" type="application/json">`
/// block in the host page when one is present and valid.
pub fn load_config() -> PlotConfig {
    match read_override() {
        Ok(Some(config)) => config,
        Ok(None) => PlotConfig::default(),
        Err(err) => {
            warn!("ignoring #{CONFIG_ELEMENT_ID}: {err:#}");
            PlotConfig::default()
        }
    }
}

fn read_override() -> Result<Option<PlotConfig>> {
    match document().get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(element) => parse_override(&element.text_content().unwrap_or_default()),
        None => Ok(None),
    }
}

/// Blank text means no override.
fn parse_override(text: &str) -> Result<Option<PlotConfig>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let config: PlotConfig =
        serde_json::from_str(text).context("plot config is not valid JSON")?;
    config.validate().context("plot config is unusable")?;
    Ok(Some(config))
}
