//! Integration tests for the dispatch core
//!
//! These tests verify:
//! - Level threshold filtering
//! - Provider composition (dedup, single-type unwrapping)
//! - Registry-driven initialization failure modes
//! - Async FIFO delivery and shutdown draining
//! - Degraded-but-usable convenience handle

use log_dispatch::core::{Record, Result};
use log_dispatch::{
    init, DispatchError, Fields, Level, LogHandle, Logger, MixProvider, OverflowPolicy, Provider,
    ProviderRegistry, SourceLocation,
};
use parking_lot::Mutex;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct RecordingProvider {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingProvider {
    fn messages(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl Provider for RecordingProvider {
    fn write(&mut self, record: &Record) -> Result<()> {
        self.lines
            .lock()
            .push((record.level, record.message.clone()));
        Ok(())
    }
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
    fn type_name(&self) -> &'static str {
        "recording"
    }
}

struct FailingProvider;

impl Provider for FailingProvider {
    fn write(&mut self, _record: &Record) -> Result<()> {
        Err(DispatchError::writer("sink unavailable"))
    }
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
    fn type_name(&self) -> &'static str {
        "failing"
    }
}

fn here() -> SourceLocation {
    SourceLocation::new("integration_tests.rs", 0)
}

/// Registry with a "recording" provider whose construction count and
/// output are observable from the test.
fn recording_registry() -> (ProviderRegistry, RecordingProvider, Arc<AtomicUsize>) {
    let sink = RecordingProvider::default();
    let constructed = Arc::new(AtomicUsize::new(0));
    let mut registry = ProviderRegistry::new();
    {
        let sink = sink.clone();
        let constructed = Arc::clone(&constructed);
        registry.register("recording", move |_opts| {
            constructed.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(sink.clone()))
        });
    }
    (registry, sink, constructed)
}

#[test]
fn test_threshold_filters_below_and_delivers_at_or_above() {
    let sink = RecordingProvider::default();
    let mut logger = Logger::new(Box::new(sink.clone()));
    logger.run();
    logger.set_level(Level::Warn);

    logger.trace(here(), format_args!("t"));
    logger.debug(here(), format_args!("d"));
    logger.info(here(), format_args!("i"));
    logger.warn(here(), format_args!("w"));
    logger.error(here(), format_args!("e"));

    assert_eq!(sink.messages(), vec!["w", "e"]);
}

#[test]
fn test_single_type_is_not_wrapped_in_mix() {
    let (registry, _sink, _constructed) = recording_registry();
    let mut logger = init(&registry, "recording", "").unwrap();
    assert_eq!(logger.provider_type(), "recording");
    logger.quit();
}

#[test]
fn test_repeated_type_equivalent_to_single() {
    let (registry, sink, constructed) = recording_registry();
    let mut logger = init(&registry, "recording/recording/recording", "").unwrap();

    // Deduplicated before construction: one provider, no mix wrapper.
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    assert_eq!(logger.provider_type(), "recording");

    log_dispatch::info!(logger, "once");
    logger.quit();
    assert_eq!(sink.messages(), vec!["once"]);
}

#[test]
fn test_two_distinct_types_build_a_mix() {
    let (mut registry, sink, _constructed) = recording_registry();
    let second = RecordingProvider::default();
    {
        let second = second.clone();
        registry.register("second", move |_opts| {
            // Distinct type name so the mix keeps both children.
            struct Renamed(RecordingProvider);
            impl Provider for Renamed {
                fn write(&mut self, record: &Record) -> Result<()> {
                    self.0.write(record)
                }
                fn flush(&mut self) -> Result<()> {
                    self.0.flush()
                }
                fn type_name(&self) -> &'static str {
                    "second"
                }
            }
            Ok(Box::new(Renamed(second.clone())))
        });
    }

    let mut logger = init(&registry, "recording/second", "").unwrap();
    assert_eq!(logger.provider_type(), "mix");

    log_dispatch::info!(logger, "fan out");
    logger.quit();

    assert_eq!(sink.messages(), vec!["fan out"]);
    assert_eq!(second.messages(), vec!["fan out"]);
}

#[test]
fn test_unknown_type_fails_before_any_construction() {
    let (registry, _sink, constructed) = recording_registry();
    let err = init(&registry, "recording/syslog", "").unwrap_err();
    assert_eq!(err.to_string(), "unregistered provider type: syslog");
    assert_eq!(constructed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_empty_provider_list_fails() {
    let registry = ProviderRegistry::with_builtins();
    assert!(matches!(
        init(&registry, "", "").unwrap_err(),
        DispatchError::EmptyProviders
    ));
}

#[test]
fn test_async_single_thread_fifo() {
    let sink = RecordingProvider::default();
    let mut logger = Logger::with_async(Box::new(sink.clone()), 32);
    logger.run();

    for i in 0..200 {
        logger.info(here(), format_args!("{}", i));
    }
    assert!(logger.quit_with_timeout(Duration::from_secs(5)));

    let messages = sink.messages();
    assert_eq!(messages.len(), 200);
    for (i, message) in messages.iter().enumerate() {
        assert_eq!(message, &i.to_string());
    }
}

#[test]
fn test_quit_bounds_writes() {
    let sink = RecordingProvider::default();
    let mut logger = Logger::with_async(Box::new(sink.clone()), 64);
    logger.run();

    for i in 0..50 {
        logger.info(here(), format_args!("{}", i));
    }
    logger.quit();

    // At most the 50 enqueued records, and nothing after quit returns.
    let count = sink.messages().len();
    assert!(count <= 50);
    logger.info(here(), format_args!("late"));
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(sink.messages().len(), count);
}

#[test]
fn test_failing_sibling_does_not_block_delivery() {
    let sink = RecordingProvider::default();
    let mix = MixProvider::new(Box::new(FailingProvider), vec![Box::new(sink.clone())]);
    let mut logger = Logger::new(Box::new(mix));
    logger.run();

    logger.error(here(), format_args!("delivered anyway"));
    assert_eq!(sink.messages(), vec!["delivered anyway"]);
}

#[test]
fn test_overflow_block_policy_loses_nothing() {
    let sink = RecordingProvider::default();
    let mut logger = Logger::with_async_config(
        Box::new(sink.clone()),
        4,
        OverflowPolicy::Block,
    );
    logger.run();

    for i in 0..100 {
        logger.info(here(), format_args!("{}", i));
    }
    assert!(logger.quit_with_timeout(Duration::from_secs(5)));

    assert_eq!(sink.messages().len(), 100);
    assert_eq!(logger.metrics().dropped(), 0);
}

#[test]
fn test_file_logger_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs").join("app.log");

    let mut logger = log_dispatch::init_file(&path).unwrap();
    log_dispatch::info!(logger, "hello {}", "file");
    log_dispatch::debug!(logger, "filtered at info threshold");
    logger.quit();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("hello file"));
    assert!(content.contains("[INFO "));
    assert!(!content.contains("filtered at info threshold"));
}

#[test]
fn test_multi_file_logger_splits_levels() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("by-level");

    let mut logger = log_dispatch::init_multi_file(&root, "svc").unwrap();
    logger.set_level(Level::Trace);
    log_dispatch::info!(logger, "to info file");
    log_dispatch::error!(logger, "to error file");
    logger.quit();

    let info = fs::read_to_string(root.join("svc.info.log")).unwrap();
    let error = fs::read_to_string(root.join("svc.error.log")).unwrap();
    assert!(info.contains("to info file"));
    assert!(error.contains("to error file"));
}

#[test]
fn test_handle_from_file_degrades_but_stays_usable() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"plain file").unwrap();

    // dir creation fails below a regular file
    let handle = LogHandle::from_file(blocker.join("sub").join("app.log"));
    handle.info("still works");
    handle.warn("no panic, no null object");
    handle.quit();
}

#[test]
fn test_fields_rendered_into_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fields.log");

    let mut logger = log_dispatch::init_file(&path).unwrap();
    logger.log_with_fields(
        Level::Info,
        here(),
        format_args!("user login"),
        Fields::new().field("user", "alice").field("attempt", 2),
    );
    logger.quit();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("user login"));
    assert!(content.contains("user=alice"));
    assert!(content.contains("attempt=2"));
}

#[test]
fn test_injected_newlines_stay_on_one_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("injection.log");

    let mut logger = log_dispatch::init_file(&path).unwrap();
    log_dispatch::info!(logger, "user login\nERROR forged entry");
    logger.quit();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("\\n"));
}
