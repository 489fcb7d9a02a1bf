//! Generated tone playback command.

use super::common;
use chrono::Utc;
use clap::Args;
use corriente_core::{Sink, Source};
use corriente_io::{CpalBackend, PlaybackNode};
use corriente_signal::Sine;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

#[derive(Args)]
pub struct ToneArgs {
    /// Partial frequency in Hz (repeat for multiple partials)
    #[arg(short, long = "frequency")]
    frequency: Vec<f64>,

    /// Partial amplitude (repeat; pairs with --frequency one-to-one)
    #[arg(short, long = "amplitude")]
    amplitude: Vec<f64>,

    /// Generated points per second (defaults to the device rate)
    #[arg(long)]
    resolution: Option<u32>,

    /// Output device (index or name; system default if omitted)
    #[arg(long)]
    output: Option<String>,

    /// Stop after this many seconds (runs until Ctrl+C if omitted)
    #[arg(long)]
    duration: Option<f64>,

    /// Scheduler tick period in milliseconds
    #[arg(long, default_value = "20")]
    tick_ms: u64,

    /// Pipeline configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn run(args: ToneArgs) -> anyhow::Result<()> {
    let config = common::load_config(args.config.as_deref())?;
    let output = common::selector(args.output.as_deref(), config.playback.device.as_deref());

    let mut playback = PlaybackNode::new(
        Box::new(CpalBackend::new()),
        output,
        config.playback.amplitude,
    )?;

    let frequencies = if args.frequency.is_empty() {
        config.tone.frequency.clone()
    } else {
        args.frequency.clone()
    };
    let amplitudes = if !args.amplitude.is_empty() {
        args.amplitude.clone()
    } else if args.frequency.is_empty() {
        config.tone.amplitude.clone()
    } else {
        vec![1.0; frequencies.len()]
    };
    // Generating below the device rate is legal but plays back slow; when
    // nothing pins the resolution, match the hardware.
    let resolution = args
        .resolution
        .or_else(|| args.config.is_some().then_some(config.tone.resolution))
        .unwrap_or_else(|| playback.sample_rate());

    let mut sine = Sine::new(&frequencies, &amplitudes, resolution, Utc::now())?;

    println!(
        "Playing {} partial(s) at {resolution} pts/s on a {} Hz device",
        frequencies.len(),
        playback.sample_rate()
    );
    println!("Press Ctrl+C to stop...");

    let running = common::ctrl_c_flag()?;
    let tick = Duration::from_millis(args.tick_ms);
    let deadline = args
        .duration
        .map(|secs| Instant::now() + Duration::from_secs_f64(secs));

    while running.load(Ordering::SeqCst) && playback.is_running() {
        if deadline.is_some_and(|at| Instant::now() >= at) {
            break;
        }
        if let Some(batch) = sine.poll() {
            playback.poll(&batch);
        }
        std::thread::sleep(tick);
    }

    // Give the hardware a moment to drain what is already queued.
    let drain_deadline = Instant::now() + Duration::from_secs(2);
    while playback.queued() > 0 && Instant::now() < drain_deadline {
        std::thread::sleep(tick);
    }

    sine.shutdown();
    playback.shutdown();
    println!("Stopped.");
    Ok(())
}
