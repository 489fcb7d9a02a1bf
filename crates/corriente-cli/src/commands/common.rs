//! Helpers shared by the CLI commands.

use corriente_config::PipelineConfig;
use corriente_io::DeviceSelector;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Load the pipeline configuration file, or fall back to defaults when no
/// path was given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => Ok(PipelineConfig::load(path)?),
        None => Ok(PipelineConfig::default()),
    }
}

/// Resolve a device selector, preferring the CLI argument over the config
/// file value.
pub fn selector(arg: Option<&str>, config: Option<&str>) -> DeviceSelector {
    DeviceSelector::from_config(arg.or(config))
}

/// Shared flag cleared by Ctrl-C.
pub fn ctrl_c_flag() -> anyhow::Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let handle = Arc::clone(&running);
    ctrlc::set_handler(move || {
        handle.store(false, Ordering::SeqCst);
    })?;
    Ok(running)
}
