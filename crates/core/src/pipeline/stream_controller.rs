use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use thiserror::Error;

use crate::capture::domain::frame_source::{CaptureError, FrameSource, ReadOutcome};
use crate::classification::domain::emotion_classifier::EmotionClassifier;
use crate::pipeline::frame_scheduler::{FrameScheduler, TickKind};
use crate::pipeline::stream_config::StreamConfig;
use crate::pipeline::stream_logger::{NullStreamLogger, StreamLogger};
use crate::pipeline::tick_pacer::TickPacer;
use crate::shared::constants::READ_RETRY_DELAY_MS;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::stabilization::domain::emotion_stabilizer::EmotionStabilizer;

/// How often blocked update delivery re-checks the cancel flag.
const DELIVER_POLL: Duration = Duration::from_millis(50);

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("invalid stream configuration: {0}")]
    Config(&'static str),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// A previous run's worker missed the stop timeout and still owns
    /// the classifier; the stream cannot start again until it exits.
    #[error("classifier is still owned by a worker that has not exited")]
    ClassifierBusy,
}

/// One stabilized tick, pushed over the bounded update channel.
///
/// Carries immutable-at-handoff data only; the consumer drains at its
/// own cadence and never shares mutable state with the worker.
#[derive(Clone, Debug)]
pub struct StreamUpdate {
    pub frame: Frame,
    /// Stable emotion after windowing and hysteresis.
    pub emotion: String,
    pub score: f64,
    /// Accepted face regions, clamped to this frame.
    pub regions: Vec<Region>,
    pub kind: TickKind,
}

/// Collaborators the worker thread hands back when it exits cleanly.
type WorkerParts = (Box<dyn EmotionClassifier>, Box<dyn StreamLogger>);

struct Worker {
    handle: JoinHandle<WorkerParts>,
    cancelled: Arc<AtomicBool>,
    done_rx: Receiver<()>,
}

/// Top-level orchestrator: wires source, scheduler, classifier and
/// stabilizer into a loop on a dedicated thread, and exposes the
/// start/stop lifecycle to the consumer.
///
/// Exactly one worker thread runs the loop per controller while
/// Running; two controllers are fully independent. The consumer side
/// only ever calls `start()`/`stop()` and drains the update receiver.
pub struct StreamController {
    config: StreamConfig,
    source: Arc<Mutex<Box<dyn FrameSource>>>,
    classifier: Option<Box<dyn EmotionClassifier>>,
    logger: Option<Box<dyn StreamLogger>>,
    updates_tx: Sender<StreamUpdate>,
    worker: Option<Worker>,
}

impl StreamController {
    /// Builds a controller and the receiving end of its bounded update
    /// channel. The classifier is injected here, never global state.
    pub fn new(
        source: Box<dyn FrameSource>,
        classifier: Box<dyn EmotionClassifier>,
        config: StreamConfig,
    ) -> Result<(Self, Receiver<StreamUpdate>), StreamError> {
        config.validate().map_err(StreamError::Config)?;
        let (updates_tx, updates_rx) = bounded(config.channel_capacity);
        Ok((
            Self {
                config,
                source: Arc::new(Mutex::new(source)),
                classifier: Some(classifier),
                logger: Some(Box::new(NullStreamLogger)),
                updates_tx,
                worker: None,
            },
            updates_rx,
        ))
    }

    pub fn with_logger(mut self, logger: Box<dyn StreamLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Transitions to Running: opens the source on the caller's
    /// context (so open failures surface here, synchronously) and
    /// launches the capture loop. No-op when already Running.
    pub fn start(&mut self) -> Result<(), StreamError> {
        if self.is_running() {
            return Ok(());
        }

        let classifier = self.classifier.take().ok_or(StreamError::ClassifierBusy)?;
        let open_result = self.lock_source().open();
        if let Err(e) = open_result {
            self.classifier = Some(classifier);
            return Err(e.into());
        }

        let scheduler = match FrameScheduler::new(
            classifier,
            self.config.detect_interval,
            self.config.min_face_area,
            self.config.min_confidence,
        ) {
            Ok(scheduler) => scheduler,
            Err(msg) => {
                self.lock_source().close();
                return Err(StreamError::Config(msg));
            }
        };

        let cancelled = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = bounded::<()>(1);

        let loop_ctx = LoopContext {
            source: self.source.clone(),
            scheduler,
            stabilizer: EmotionStabilizer::new(
                self.config.smoothing_window,
                self.config.hysteresis_margin,
            ),
            logger: self.logger.take().unwrap_or(Box::new(NullStreamLogger)),
            pacer: TickPacer::new(self.config.target_fps),
            updates_tx: self.updates_tx.clone(),
            cancelled: cancelled.clone(),
            done_tx,
        };
        let handle = thread::spawn(move || run_loop(loop_ctx));

        self.worker = Some(Worker {
            handle,
            cancelled,
            done_rx,
        });
        Ok(())
    }

    /// Transitions to Stopped: signals the loop, waits up to the
    /// configured timeout for it to exit, then releases the capture
    /// source unconditionally. The source must never stay open because
    /// a worker is wedged in a slow classify call. Safe no-op when
    /// already Stopped.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.cancelled.store(true, Ordering::Relaxed);

        let exited = match worker.done_rx.recv_timeout(self.config.stop_timeout) {
            Ok(()) => true,
            // Worker gone without signalling (e.g. a panic unwound it).
            Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        };

        if exited {
            if let Ok((classifier, logger)) = worker.handle.join() {
                self.classifier = Some(classifier);
                self.logger = Some(logger);
            }
        } else {
            log::warn!(
                "stream worker did not exit within {:?}; releasing capture source anyway",
                self.config.stop_timeout
            );
        }

        self.lock_source().close();
    }

    fn lock_source(&self) -> MutexGuard<'_, Box<dyn FrameSource>> {
        // A poisoned lock means the worker panicked mid-read; the
        // source must still be releasable.
        self.source.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for StreamController {
    fn drop(&mut self) {
        self.stop();
    }
}

struct LoopContext {
    source: Arc<Mutex<Box<dyn FrameSource>>>,
    scheduler: FrameScheduler,
    stabilizer: EmotionStabilizer,
    logger: Box<dyn StreamLogger>,
    pacer: TickPacer,
    updates_tx: Sender<StreamUpdate>,
    cancelled: Arc<AtomicBool>,
    done_tx: Sender<()>,
}

/// The capture loop: read -> schedule -> stabilize -> deliver -> pace.
///
/// Per-tick failures degrade and continue; only cancellation or a
/// dropped consumer ends the loop. The cancel flag is observed at
/// least once per tick, and the source lock is held only for the
/// duration of one read so `stop()` can always release the device.
fn run_loop(mut ctx: LoopContext) -> WorkerParts {
    let read_retry = Duration::from_millis(READ_RETRY_DELAY_MS);

    while !ctx.cancelled.load(Ordering::Relaxed) {
        let tick_start = Instant::now();

        let outcome = {
            let mut source = ctx.source.lock().unwrap_or_else(|e| e.into_inner());
            source.read()
        };
        let frame = match outcome {
            Ok(ReadOutcome::Frame(frame)) => frame,
            Ok(ReadOutcome::NotReady) => {
                thread::sleep(read_retry);
                continue;
            }
            Err(e) => {
                log::debug!("transient frame read failure: {e}");
                thread::sleep(read_retry);
                continue;
            }
        };
        ctx.logger
            .timing("read", tick_start.elapsed().as_secs_f64() * 1000.0);

        let process_start = Instant::now();
        let tick = ctx.scheduler.process(&frame);
        ctx.logger
            .timing("process", process_start.elapsed().as_secs_f64() * 1000.0);

        // The stabilizer history moves on detect ticks only.
        let (emotion, score) = match tick.kind {
            TickKind::Detect => ctx
                .stabilizer
                .observe(&tick.classification.emotion, tick.classification.score),
            TickKind::Skip => {
                let (emotion, score) = ctx.stabilizer.current();
                (emotion.to_string(), score)
            }
        };

        let sequence = frame.sequence();
        let update = StreamUpdate {
            frame,
            emotion,
            score,
            regions: tick.classification.regions(),
            kind: tick.kind,
        };
        ctx.logger.metric("queue_depth", ctx.updates_tx.len() as f64);
        if !deliver(&ctx.updates_tx, update, &ctx.cancelled) {
            break;
        }
        ctx.logger.frame(sequence);

        ctx.pacer.pace(tick_start);
    }

    // Release from inside the loop thread as well; close() is
    // idempotent and stop() also closes unconditionally.
    {
        let mut source = ctx.source.lock().unwrap_or_else(|e| e.into_inner());
        source.close();
    }
    ctx.logger.summary();
    let _ = ctx.done_tx.send(());

    (ctx.scheduler.into_classifier(), ctx.logger)
}

/// Pushes one update, re-checking the cancel flag while the channel is
/// full. Returns false when the stream should end (cancelled, or the
/// consumer dropped its receiver).
fn deliver(tx: &Sender<StreamUpdate>, update: StreamUpdate, cancelled: &AtomicBool) -> bool {
    let mut pending = update;
    loop {
        if cancelled.load(Ordering::Relaxed) {
            return false;
        }
        match tx.send_timeout(pending, DELIVER_POLL) {
            Ok(()) => return true,
            Err(SendTimeoutError::Timeout(returned)) => pending = returned,
            Err(SendTimeoutError::Disconnected(_)) => {
                log::debug!("update receiver dropped; ending stream loop");
                return false;
            }
        }
    }
}
