//! Capture node: device input stream to timestamped batches.

use crate::backend::{
    AudioBackend, DeviceSelector, Direction, ErrorCallback, InputCallback, NodeConfig,
    log_device_listing,
};
use crate::handoff::HandoffBuffer;
use crate::Result;
use corriente_core::{Source, Timebase, TimestampedBatch};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often the worker re-checks the running flag while the stream idles.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Audio input node.
///
/// Construction queries the selected device's default sample rate, then
/// launches a background worker that opens and holds a 1-channel input
/// stream. The hardware callback appends every fresh buffer to a shared
/// [`HandoffBuffer`], recording the instant the append completed;
/// [`Source::poll`] drains whatever accumulated since the previous tick
/// into one batch and reconstructs its timestamp series from that single
/// end instant.
///
/// Zero, one, or many hardware callbacks may land between two polls; an
/// empty drain polls to `None`. Shutdown is a flag store, observed by the
/// worker within one idle period.
pub struct CaptureNode {
    buffer: Arc<HandoffBuffer>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    timebase: Timebase,
    sample_rate: u32,
}

impl CaptureNode {
    /// Open a capture node on the selected input device.
    ///
    /// Fails when the selector does not resolve or the device's rate query
    /// fails; the node is never half-constructed. The device stream itself
    /// is opened by the worker thread.
    pub fn new(backend: Box<dyn AudioBackend>, selector: DeviceSelector) -> Result<Self> {
        log_device_listing(backend.as_ref());
        let sample_rate = backend.default_sample_rate(&selector, Direction::Input)?;

        let buffer = Arc::new(HandoffBuffer::new());
        let running = Arc::new(AtomicBool::new(true));
        let config = NodeConfig::mono(selector, sample_rate);
        let worker = spawn_worker(backend, config, Arc::clone(&buffer), Arc::clone(&running));

        Ok(Self {
            buffer,
            running,
            worker: Some(worker),
            timebase: Timebase::new(f64::from(sample_rate)),
            sample_rate,
        })
    }

    /// Sample rate queried from the device at construction.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Whether the worker is still being asked to run.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

fn spawn_worker(
    backend: Box<dyn AudioBackend>,
    config: NodeConfig,
    buffer: Arc<HandoffBuffer>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let cb_buffer = Arc::clone(&buffer);
        let callback: InputCallback = Box::new(move |data: &[f32]| {
            if !data.is_empty() {
                cb_buffer.append(data);
            }
        });
        let error_callback: ErrorCallback = Box::new(|err: &str| {
            tracing::warn!(error = err, "capture stream fault");
        });

        match backend.build_input_stream(&config, callback, error_callback) {
            Ok(_stream) => {
                // All data movement happens in the hardware callback; the
                // worker only keeps the stream handle alive until asked to
                // stop. Dropping the handle closes the device.
                while running.load(Ordering::SeqCst) {
                    thread::sleep(IDLE_POLL);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to open capture stream");
                running.store(false, Ordering::SeqCst);
            }
        }
    })
}

impl Source for CaptureNode {
    fn poll(&mut self) -> Option<TimestampedBatch> {
        let (samples, end) = self.buffer.drain_all();
        if samples.is_empty() {
            return None;
        }
        let end = end?;
        let timestamps = self.timebase.end_to_series(end, samples.len());
        Some(TimestampedBatch::new(
            samples,
            timestamps,
            f64::from(self.sample_rate),
        ))
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for CaptureNode {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
