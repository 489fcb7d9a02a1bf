//! Playback node: queued batches to a device output stream.

use crate::backend::{
    AudioBackend, DeviceSelector, Direction, ErrorCallback, NodeConfig, OutputCallback,
    log_device_listing,
};
use crate::handoff::HandoffBuffer;
use crate::Result;
use corriente_core::{Sink, TimestampedBatch};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often the worker re-checks the running flag while the stream idles.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Audio output node.
///
/// [`Sink::poll`] scales incoming samples by a fixed amplitude factor and
/// appends them to a shared [`HandoffBuffer`]; the hardware callback
/// dequeues exactly the number of samples each device buffer requests.
/// When the queue cannot satisfy a whole request the callback writes
/// silence for the entire buffer and leaves the queued samples for the
/// next one - underrun is expected steady-state behavior, not an error.
///
/// Playback timing is dictated by the hardware clock; batch timestamps
/// are ignored on this side.
pub struct PlaybackNode {
    buffer: Arc<HandoffBuffer>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    amplitude: f32,
    sample_rate: u32,
}

impl PlaybackNode {
    /// Open a playback node on the selected output device.
    ///
    /// `amplitude` is the gain factor applied to every queued sample.
    /// Fails when the selector does not resolve or the device's rate query
    /// fails.
    pub fn new(
        backend: Box<dyn AudioBackend>,
        selector: DeviceSelector,
        amplitude: f32,
    ) -> Result<Self> {
        log_device_listing(backend.as_ref());
        let sample_rate = backend.default_sample_rate(&selector, Direction::Output)?;

        let buffer = Arc::new(HandoffBuffer::new());
        let running = Arc::new(AtomicBool::new(true));
        let config = NodeConfig::mono(selector, sample_rate);
        let worker = spawn_worker(backend, config, Arc::clone(&buffer), Arc::clone(&running));

        Ok(Self {
            buffer,
            running,
            worker: Some(worker),
            amplitude,
            sample_rate,
        })
    }

    /// Sample rate queried from the device at construction.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Gain factor applied to queued samples.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Number of samples waiting for the hardware.
    pub fn queued(&self) -> usize {
        self.buffer.len()
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
        let callback: OutputCallback = Box::new(move |out: &mut [f32]| {
            match cb_buffer.take(out.len()) {
                Some(samples) => out.copy_from_slice(&samples),
                // Underrun: the whole request becomes silence and the
                // queued samples wait for the next callback.
                None => out.fill(0.0),
            }
        });
        let error_callback: ErrorCallback = Box::new(|err: &str| {
            tracing::warn!(error = err, "playback stream fault");
        });

        match backend.build_output_stream(&config, callback, error_callback) {
            Ok(_stream) => {
                while running.load(Ordering::SeqCst) {
                    thread::sleep(IDLE_POLL);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to open playback stream");
                running.store(false, Ordering::SeqCst);
            }
        }
    })
}

impl Sink for PlaybackNode {
    fn poll(&mut self, batch: &TimestampedBatch) {
        if batch.is_empty() {
            return;
        }
        if self.amplitude == 1.0 {
            self.buffer.append(&batch.samples);
        } else {
            let scaled: Vec<f32> = batch.samples.iter().map(|s| s * self.amplitude).collect();
            self.buffer.append(&scaled);
        }
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for PlaybackNode {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
