//! src/showcase.rs
//!
//! Fixed walkthrough run by `xf-log-demo --showcase`.
//!
//! The first part drives a two-sink [`Logger`]. The console sink shows the
//! source location on errors only. The "file" sink shows it on every record,
//! never writes color, and blacklists records logged from this source file.
//! Its bytes follow the console output under a `--- file sink ---` marker.
//!
//! The second part drives a [`BufferedLogger`]: timestamps are switched off
//! and back on, every global level is swept between raw `printf` markers, and
//! one record is redirected into a bounded in-memory backend whose contents
//! are then printed.

use std::sync::{Arc, Mutex, PoisonError};

use logging::{
    Backend, BackendArgs, BufferedLogger, FilterMode, FilterRule, Level, LogResult, Logger,
    LoggerConfig, Record, SourceLocation, args, log_to, source_location, uptime_millis,
};

/// Bytes the redirect backend keeps; the rest of a longer record is dropped.
pub const REDIRECT_CAPACITY: usize = 512;

/// Marker printed before the file sink's bytes.
pub const FILE_SINK_MARKER: &str = "--- file sink ---\n";

const TAG: &str = "main";

/// Files the other records claim to come from.
const OTHER_FILES: [&str; 3] = ["file1.c", "file2.c", "file3.c"];

type Shared = Arc<Mutex<Vec<u8>>>;

fn append(target: &Shared, bytes: &[u8]) {
    target
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .extend_from_slice(bytes);
}

/// Backend that keeps at most `capacity` bytes and reports what it kept.
struct BoundedBuffer {
    bytes: Shared,
    capacity: usize,
}

impl Backend for BoundedBuffer {
    fn write(&mut self, buf: &[u8], _args: &BackendArgs) -> usize {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        let take = buf.len().min(self.capacity.saturating_sub(bytes.len()));
        bytes.extend_from_slice(&buf[..take]);
        take
    }
}

fn console_backend(console: &Shared) -> Box<dyn Backend> {
    let console = Arc::clone(console);
    Box::new(move |buf: &[u8], _: &BackendArgs| {
        append(&console, buf);
        buf.len()
    })
}

/// Runs both parts and returns everything they wrote.
pub fn run(colors: bool) -> LogResult<Vec<u8>> {
    let console: Shared = Arc::default();
    let file: Shared = Arc::default();

    multi_sink(colors, &console, &file)?;
    buffered(colors, &console);

    let mut output = std::mem::take(&mut *console.lock().unwrap_or_else(PoisonError::into_inner));
    output.extend_from_slice(FILE_SINK_MARKER.as_bytes());
    output.extend_from_slice(&file.lock().unwrap_or_else(PoisonError::into_inner));
    Ok(output)
}

fn multi_sink(colors: bool, console: &Shared, file: &Shared) -> LogResult<()> {
    let mut logger: Logger = Logger::with_config(LoggerConfig::new().with_colors(colors));
    logger.set_time_source(Some(uptime_millis));

    let console_bytes = Arc::clone(console);
    let console_id = logger.register(move |bytes: &[u8]| append(&console_bytes, bytes))?;
    logger.set_info_level(console_id, Level::Error)?;

    let file_bytes = Arc::clone(file);
    let file_id = logger.register(move |bytes: &[u8]| append(&file_bytes, bytes))?;
    logger.set_info_level(file_id, Level::Verbose)?;
    logger.set_filter(
        file_id,
        FilterRule {
            enabled: true,
            mode: FilterMode::Blacklist,
            file: Some(file!()),
            colorful: false,
            ..FilterRule::new()
        },
    )?;

    // Even levels are logged from here, odd ones from the other files.
    for (index, level) in Level::ALL[1..].iter().copied().enumerate() {
        let location = if index % 2 == 0 {
            source_location!()
        } else {
            SourceLocation::new(OTHER_FILES[index / 2], line!(), Some("showcase"))
        };
        let args = args!["skldfjaslkdfj", 20_241_014, std::f64::consts::PI];
        let record = Record::new(level, TAG, "Hello, %.5s, date: %d, pi: %f!", &args);
        logger.log(&record.with_location(location));
    }
    Ok(())
}

fn buffered(colors: bool, console: &Shared) {
    let mut logger = BufferedLogger::<64>::with_backend(console_backend(console));
    logger.set_colors(colors);
    logger.set_time_source(Some(uptime_millis));

    log_to!(logger, Level::Info, TAG, "int: %d, str: %s, float: %f", 123, "abc", -123.456);
    log_to!(logger, Level::Info, TAG, "bin: 0b%08b", 0x2a_u32);

    logger.set_time_source(None);
    log_to!(logger, Level::Info, TAG, "hello");
    logger.set_time_source(Some(uptime_millis));

    let saved = logger.global_level();
    logger.printf("level sweep\n", &[]);
    for threshold in Level::ALL {
        logger.set_global_level(threshold);
        logger.printf("--- begin --- lvl: %u ---\n", &args![u32::from(threshold.as_u8())]);
        for level in Level::ALL[1..].iter().copied() {
            logger.log(&Record::new(level, TAG, "hello", &[]).with_location(source_location!()));
        }
        logger.printf("--- end ---\n\n", &[]);
    }
    logger.set_global_level(saved);

    logger.set_time_source(None);
    log_to!(logger, Level::Info, "change_out", "hello: int: %d, str: %s", 123, "abc");
    let redirected: Shared = Arc::default();
    logger.set_backend(Some(Box::new(BoundedBuffer {
        bytes: Arc::clone(&redirected),
        capacity: REDIRECT_CAPACITY,
    })));
    log_to!(logger, Level::Info, "change_out", "hello: int: %d, str: %s", 123, "abc");
    logger.set_backend(Some(console_backend(console)));

    let captured = String::from_utf8_lossy(&redirected.lock().unwrap_or_else(PoisonError::into_inner))
        .into_owned();
    logger.printf("redirected:\n----\n%s----\n", &args![captured.as_str()]);
    log_to!(logger, Level::Info, "change_out", "hello: int: %d, str: %s", 123, "abc");
}
