//! Level-filtered dispatcher
//!
//! A [`Logger`] owns one provider (possibly a [`MixProvider`]), a mutable
//! level threshold, and a running/stopped lifecycle. Dispatch is either
//! synchronous (the calling thread performs the provider write) or
//! asynchronous (records go through a bounded queue consumed by one
//! background worker).
//!
//! [`MixProvider`]: super::mix::MixProvider

use super::{
    context::Fields,
    error::{DispatchError, Result},
    level::Level,
    metrics::DispatchMetrics,
    overflow::OverflowPolicy,
    provider::Provider,
    record::{Record, SourceLocation},
};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default bound on a bounded-wait shutdown.
///
/// Used by [`Logger::quit`] and by `Drop` when the logger is released
/// without an explicit quit.
pub const DEFAULT_QUIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default async queue capacity used by the composition entry points.
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

const STATE_CREATED: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_STOPPED: u8 = 2;

type ProviderSlot = Arc<RwLock<Box<dyn Provider>>>;

pub struct Logger {
    threshold: Arc<RwLock<Level>>,
    provider: ProviderSlot,
    state: Arc<AtomicU8>,
    /// Set when a quit timeout expires; tells the worker to discard
    /// instead of deliver.
    shutdown: Arc<AtomicBool>,
    sender: Option<Sender<Record>>,
    /// Held until `run()` hands it to the worker thread.
    receiver: Option<Receiver<Record>>,
    worker: Option<thread::JoinHandle<()>>,
    metrics: Arc<DispatchMetrics>,
    overflow_policy: OverflowPolicy,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &*self.threshold.read())
            .field("overflow_policy", &self.overflow_policy)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a synchronous logger: every accepted record is written to
    /// the provider on the calling thread before the call returns.
    #[must_use]
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            threshold: Arc::new(RwLock::new(Level::Info)),
            provider: Arc::new(RwLock::new(provider)),
            state: Arc::new(AtomicU8::new(STATE_CREATED)),
            shutdown: Arc::new(AtomicBool::new(false)),
            sender: None,
            receiver: None,
            worker: None,
            metrics: Arc::new(DispatchMetrics::new()),
            overflow_policy: OverflowPolicy::default(),
        }
    }

    /// Create an asynchronous logger with a bounded queue and the default
    /// (blocking) overflow policy. [`Logger::run`] must be called before
    /// the first write is delivered.
    #[must_use]
    pub fn with_async(provider: Box<dyn Provider>, queue_capacity: usize) -> Self {
        Self::with_async_config(provider, queue_capacity, OverflowPolicy::default())
    }

    /// Create an asynchronous logger with an explicit overflow policy.
    #[must_use]
    pub fn with_async_config(
        provider: Box<dyn Provider>,
        queue_capacity: usize,
        overflow_policy: OverflowPolicy,
    ) -> Self {
        let (sender, receiver) = bounded(queue_capacity);
        Self {
            threshold: Arc::new(RwLock::new(Level::Info)),
            provider: Arc::new(RwLock::new(provider)),
            state: Arc::new(AtomicU8::new(STATE_CREATED)),
            shutdown: Arc::new(AtomicBool::new(false)),
            sender: Some(sender),
            receiver: Some(receiver),
            worker: None,
            metrics: Arc::new(DispatchMetrics::new()),
            overflow_policy,
        }
    }

    /// Transition `Created -> Running`; for the async variant this spawns
    /// the single delivery worker.
    ///
    /// Calling `run` a second time is a no-op and never spawns a
    /// duplicate worker.
    pub fn run(&mut self) {
        if self
            .state
            .compare_exchange(
                STATE_CREATED,
                STATE_RUNNING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return;
        }

        if let Some(receiver) = self.receiver.take() {
            let provider = Arc::clone(&self.provider);
            let metrics = Arc::clone(&self.metrics);
            let shutdown = Arc::clone(&self.shutdown);
            self.worker = Some(thread::spawn(move || {
                Self::worker_loop(&receiver, &provider, &metrics, &shutdown);
            }));
        }
    }

    /// Single delivery worker: drains the queue in FIFO order and flushes
    /// between bursts. Exits once the channel disconnects (quit/drop).
    /// After an expired quit timeout the shutdown flag is set and leftover
    /// records are discarded and counted instead of delivered.
    fn worker_loop(
        receiver: &Receiver<Record>,
        provider: &ProviderSlot,
        metrics: &Arc<DispatchMetrics>,
        shutdown: &AtomicBool,
    ) {
        while let Ok(record) = receiver.recv() {
            if shutdown.load(Ordering::Acquire) {
                drop(record);
                metrics.record_dropped();
                continue;
            }
            Self::deliver(provider, &record, metrics);
            // Drain whatever queued up behind the first record before
            // paying for a flush.
            while let Ok(record) = receiver.try_recv() {
                if shutdown.load(Ordering::Acquire) {
                    drop(record);
                    metrics.record_dropped();
                    continue;
                }
                Self::deliver(provider, &record, metrics);
            }
            if let Err(e) = provider.write().flush() {
                eprintln!("[log_dispatch] flush failed: {}", e);
            }
        }
    }

    /// Hand one record to the provider, isolating panics so a bad sink
    /// cannot take the dispatcher down.
    fn deliver(provider: &ProviderSlot, record: &Record, metrics: &Arc<DispatchMetrics>) {
        let mut guard = provider.write();
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| guard.write(record)));
        match outcome {
            Ok(Ok(())) => {
                metrics.record_delivered();
            }
            // A partial mix failure still reached some sinks; the mix
            // already reported the failing children to stderr.
            Ok(Err(DispatchError::MixWriteFailures { failed, total })) if failed < total => {
                metrics.record_delivered();
            }
            Ok(Err(e)) => {
                eprintln!(
                    "[log_dispatch] provider '{}' write failed: {}",
                    guard.type_name(),
                    e
                );
                metrics.record_dropped();
            }
            Err(_) => {
                eprintln!(
                    "[log_dispatch] provider '{}' panicked during write",
                    guard.type_name()
                );
                metrics.record_dropped();
            }
        }
    }

    /// Current level threshold.
    pub fn level(&self) -> Level {
        *self.threshold.read()
    }

    /// Swap the level threshold; takes effect for all records accepted
    /// strictly after the call returns. Safe to call concurrently with
    /// any number of in-flight log calls.
    pub fn set_level(&self, level: Level) {
        *self.threshold.write() = level;
    }

    /// Atomically replace the owned provider.
    ///
    /// Providers are never re-configured in place; reconfiguration means
    /// constructing a new provider and swapping it in here.
    pub fn set_provider(&self, provider: Box<dyn Provider>) {
        *self.provider.write() = provider;
    }

    /// Type name of the currently owned provider (`"mix"` for a
    /// composite).
    pub fn provider_type(&self) -> &'static str {
        self.provider.read().type_name()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Flush the owned provider.
    pub fn flush(&self) -> Result<()> {
        self.provider.write().flush()
    }

    /// Core dispatch entry: filter, stamp, hand off.
    ///
    /// The threshold comparison happens before the message is
    /// materialized, so filtered-out calls never pay formatting cost.
    /// Calls after [`Logger::quit`] are silent no-ops. A `Fatal` record
    /// terminates the process after durable hand-off.
    pub fn log(&self, level: Level, location: SourceLocation, args: fmt::Arguments<'_>) {
        self.log_inner(level, location, args, None);
    }

    /// Like [`Logger::log`] with structured fields attached to the record.
    pub fn log_with_fields(
        &self,
        level: Level,
        location: SourceLocation,
        args: fmt::Arguments<'_>,
        fields: Fields,
    ) {
        self.log_inner(level, location, args, Some(fields));
    }

    fn log_inner(
        &self,
        level: Level,
        location: SourceLocation,
        args: fmt::Arguments<'_>,
        fields: Option<Fields>,
    ) {
        if self.state.load(Ordering::Acquire) == STATE_STOPPED {
            return;
        }
        if level < *self.threshold.read() {
            return;
        }

        let mut record = Record::new(level, location, args.to_string());
        if let Some(fields) = fields {
            record = record.with_fields(fields);
        }
        self.dispatch(record);

        if level == Level::Fatal {
            self.terminate();
        }
    }

    fn dispatch(&self, record: Record) {
        if let Some(ref sender) = self.sender {
            match sender.try_send(record) {
                Ok(()) => {}
                Err(TrySendError::Full(record)) => self.handle_overflow(record),
                Err(TrySendError::Disconnected(_)) => {
                    // Racing a shutdown; tolerate silently.
                }
            }
        } else {
            Self::deliver(&self.provider, &record, &self.metrics);
        }
    }

    fn handle_overflow(&self, record: Record) {
        self.metrics.record_queue_full();

        match self.overflow_policy {
            OverflowPolicy::Block => {
                self.metrics.record_block();
                if let Some(ref sender) = self.sender {
                    let _ = sender.send(record);
                }
            }
            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                if let Some(ref sender) = self.sender {
                    match sender.send_timeout(record, timeout) {
                        Ok(()) => {}
                        Err(SendTimeoutError::Timeout(_)) => self.drop_and_alert(),
                        Err(SendTimeoutError::Disconnected(_)) => {}
                    }
                }
            }
            OverflowPolicy::DropNewest => self.drop_and_alert(),
        }
    }

    /// Count a dropped record; alert on the first drop and every 1000th
    /// thereafter.
    fn drop_and_alert(&self) {
        let dropped = self.metrics.record_dropped();
        if dropped == 0 || (dropped + 1) % 1000 == 0 {
            eprintln!(
                "[log_dispatch] queue full, {} records dropped; consider a larger queue or a blocking overflow policy",
                dropped + 1
            );
        }
    }

    /// Durable hand-off for a fatal record, then process termination.
    ///
    /// For the async variant this bound-waits for the queue to drain, so
    /// the fatal record reaches the provider before the process exits.
    fn terminate(&self) -> ! {
        if let Some(ref sender) = self.sender {
            let deadline = Instant::now() + DEFAULT_QUIT_TIMEOUT;
            while !sender.is_empty() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(1));
            }
        }
        if let Err(e) = self.provider.write().flush() {
            eprintln!("[log_dispatch] flush failed during fatal exit: {}", e);
        }
        std::process::exit(1);
    }

    #[inline]
    pub fn trace(&self, location: SourceLocation, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, location, args);
    }

    #[inline]
    pub fn debug(&self, location: SourceLocation, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, location, args);
    }

    #[inline]
    pub fn info(&self, location: SourceLocation, args: fmt::Arguments<'_>) {
        self.log(Level::Info, location, args);
    }

    #[inline]
    pub fn warn(&self, location: SourceLocation, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, location, args);
    }

    #[inline]
    pub fn error(&self, location: SourceLocation, args: fmt::Arguments<'_>) {
        self.log(Level::Error, location, args);
    }

    /// Logs at `Fatal` and terminates the process after durable hand-off.
    #[inline]
    pub fn fatal(&self, location: SourceLocation, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, location, args);
    }

    /// Terminal shutdown with the default timeout. See
    /// [`Logger::quit_with_timeout`].
    pub fn quit(&mut self) {
        self.quit_with_timeout(DEFAULT_QUIT_TIMEOUT);
    }

    /// Terminal shutdown: stop accepting records, let the async worker
    /// drain the queue in FIFO order (bounded by `timeout`), and flush
    /// the provider.
    ///
    /// Idempotent; log calls racing or following `quit` are no-ops.
    /// Returns `false` if the worker failed to drain within the timeout
    /// or the final flush failed. On an expired timeout the records still
    /// queued are discarded and counted as dropped, never delivered after
    /// this call returns.
    pub fn quit_with_timeout(&mut self, timeout: Duration) -> bool {
        let previous = self.state.swap(STATE_STOPPED, Ordering::AcqRel);
        if previous == STATE_STOPPED {
            return true;
        }

        // Disconnect the channel so the worker exits once drained. A
        // never-run async logger simply discards its queue.
        drop(self.sender.take());
        drop(self.receiver.take());

        let mut clean = true;
        if let Some(handle) = self.worker.take() {
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if handle.join().is_err() {
                        eprintln!("[log_dispatch] delivery worker panicked during shutdown");
                        clean = false;
                    }
                    break;
                }
                if start.elapsed() >= timeout {
                    // Tell the worker to discard whatever is still queued;
                    // nothing may reach the provider after quit returns.
                    self.shutdown.store(true, Ordering::Release);
                    eprintln!(
                        "[log_dispatch] delivery worker did not drain within {:?}; discarding leftover records",
                        timeout
                    );
                    return false;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }

        if let Err(e) = self.provider.write().flush() {
            eprintln!("[log_dispatch] flush failed during shutdown: {}", e);
            clean = false;
        }

        let dropped = self.metrics.dropped();
        if dropped > 0 {
            eprintln!(
                "[log_dispatch] shutting down with {} dropped records (drop rate {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }

        clean
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.quit_with_timeout(DEFAULT_QUIT_TIMEOUT);
    }
}
