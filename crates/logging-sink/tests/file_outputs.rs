//! Integration tests writing records to files on disk.

use std::fs::{self, File};
use std::io::BufWriter;

use logging::{
    BufferedLogger, FilterMode, FilterRule, Level, LineMode, Logger, LoggerConfig, Record, args,
};
use logging_sink::{FilterGuard, WriterBackend, WriterSink};
use test_support::{CaptureOutput, LogDir};

fn plain() -> Logger {
    Logger::with_config(LoggerConfig::new().with_colors(false))
}

// ============================================================================
// Multi-sink logger
// ============================================================================

/// A file sink receives the same bytes as an in-memory sink.
#[test]
fn file_sink_matches_memory_sink() {
    let dir = LogDir::new().unwrap();
    let path = dir.file("app.log");
    let capture = CaptureOutput::new();
    let mut logger = plain();
    logger.register(WriterSink::new(File::create(&path).unwrap())).unwrap();
    logger.register(capture.clone()).unwrap();

    logger.log(&Record::new(Level::Warn, "fs", "%s: %d", &args!["inodes", 12]));
    logger.log(&Record::new(Level::Debug, "fs", "sync", &[]));

    assert_eq!(fs::read_to_string(&path).unwrap(), capture.text());
    assert_eq!(capture.text(), "W (none)-fs: inodes: 12\nD (none)-fs: sync\n");
}

/// A file sink can be filtered independently of the console.
#[test]
fn file_sink_keeps_only_errors() {
    let dir = LogDir::new().unwrap();
    let path = dir.file("errors.log");
    let console = CaptureOutput::new();
    let mut logger = plain();
    let file = logger.register(WriterSink::new(File::create(&path).unwrap())).unwrap();
    logger.register(console.clone()).unwrap();
    logger.set_filter_enabled(file, true).unwrap();
    logger.set_filter_level(file, Level::Error).unwrap();
    logger.set_info_level(file, Level::None).unwrap();

    logger.log(&Record::new(Level::Info, "db", "connected", &[]));
    logger.log(&Record::new(Level::Error, "db", "lost", &[]));

    assert_eq!(fs::read_to_string(&path).unwrap(), "E (none)-db: lost\n");
    assert_eq!(console.text().lines().count(), 2);
}

/// A scoped whitelist applies to the file only while the guard lives.
#[test]
fn guard_scopes_file_filter() {
    let dir = LogDir::new().unwrap();
    let path = dir.file("scoped.log");
    let mut logger = plain();
    let file = logger.register(WriterSink::new(File::create(&path).unwrap())).unwrap();
    let only_net = FilterRule {
        enabled: true,
        mode: FilterMode::Whitelist,
        tag: Some("net"),
        ..FilterRule::new()
    };

    {
        let mut guard = FilterGuard::new(&mut logger, file, only_net).unwrap();
        guard.log(&Record::new(Level::Info, "ui", "a", &[]));
        guard.log(&Record::new(Level::Info, "net", "b", &[]));
    }
    logger.log(&Record::new(Level::Info, "ui", "c", &[]));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "I (none)-net: b\nI (none)-ui: c\n"
    );
}

// ============================================================================
// Buffered logger
// ============================================================================

/// The writer backend flushes each record at its boundary.
#[test]
fn buffered_writer_backend_flushes_per_record() {
    let dir = LogDir::new().unwrap();
    let path = dir.file("buffered.log");
    let writer = BufWriter::new(File::create(&path).unwrap());
    let mut logger = BufferedLogger::<8>::with_backend(Box::new(WriterBackend::new(writer)));
    logger.set_colors(false);
    logger.set_line_mode(LineMode::WithCrLf);

    logger.log(&Record::new(Level::Info, "boot", "stage %u of %u", &args![1u32, 3u32]));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "I (none)-boot: stage 1 of 3\r\n"
    );

    logger.log(&Record::new(Level::User, "boot", "ready", &[]));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "I (none)-boot: stage 1 of 3\r\nU (none)-boot: ready\r\n"
    );
}
