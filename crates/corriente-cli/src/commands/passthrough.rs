//! Live input-to-output routing command.

use super::common;
use clap::Args;
use corriente_core::{Sink, Source};
use corriente_io::{CaptureNode, CpalBackend, PlaybackNode};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[derive(Args)]
pub struct PassthroughArgs {
    /// Input device (index or name; system default if omitted)
    #[arg(long)]
    input: Option<String>,

    /// Output device (index or name; system default if omitted)
    #[arg(long)]
    output: Option<String>,

    /// Playback gain factor
    #[arg(long)]
    amplitude: Option<f32>,

    /// Scheduler tick period in milliseconds
    #[arg(long, default_value = "20")]
    tick_ms: u64,

    /// Pipeline configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn run(args: PassthroughArgs) -> anyhow::Result<()> {
    let config = common::load_config(args.config.as_deref())?;
    let input = common::selector(args.input.as_deref(), config.capture.device.as_deref());
    let output = common::selector(args.output.as_deref(), config.playback.device.as_deref());
    let amplitude = args.amplitude.unwrap_or(config.playback.amplitude);

    let mut capture = CaptureNode::new(Box::new(CpalBackend::new()), input)?;
    let mut playback = PlaybackNode::new(Box::new(CpalBackend::new()), output, amplitude)?;

    if capture.sample_rate() != playback.sample_rate() {
        tracing::warn!(
            input_rate = capture.sample_rate(),
            output_rate = playback.sample_rate(),
            "device rates differ and nothing resamples; playback speed will be off"
        );
    }

    println!(
        "Routing input to output ({} Hz in, {} Hz out, gain {amplitude})",
        capture.sample_rate(),
        playback.sample_rate()
    );
    println!("Press Ctrl+C to stop...");

    let running = common::ctrl_c_flag()?;
    let tick = Duration::from_millis(args.tick_ms);

    while running.load(Ordering::SeqCst) && capture.is_running() {
        if let Some(batch) = capture.poll() {
            playback.poll(&batch);
        }
        std::thread::sleep(tick);
    }

    capture.shutdown();
    playback.shutdown();
    println!("Stopped.");
    Ok(())
}
