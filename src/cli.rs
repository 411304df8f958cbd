//! src/cli.rs
//!
//! Command-line front end of the `xf-log-demo` binary.
//!
//! Each MESSAGE operand becomes one record. `--showcase` replaces the
//! messages with a fixed walkthrough of sinks, filters, levels and backends.
//! Output is collected in memory and copied to the caller's stdout once every
//! record is written, so the same entry point can be driven from tests with
//! in-memory handles.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use logging::{
    BackendArgs, BufferedLogger, Control, FilterMode, FilterRule, Level, LineMode, Logger,
    LoggerConfig, Record, args, uptime_millis,
};
use logging_sink::StdStream;

use crate::showcase;

/// Exit status for invalid usage.
const USAGE_EXIT: u8 = 2;

type Shared<T> = Arc<Mutex<Vec<T>>>;

fn parse_level(value: &str) -> Result<Level, String> {
    value
        .parse::<Level>()
        .map_err(|_| format!("unknown level '{value}'"))
}

fn parse_line_mode(value: &str) -> Result<LineMode, String> {
    match value {
        "lf" => Ok(LineMode::WithNewline),
        "crlf" => Ok(LineMode::WithCrLf),
        "none" => Ok(LineMode::WithoutNewline),
        other => Err(format!("unknown line mode '{other}'")),
    }
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("xf-log-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Writes each MESSAGE as a decorated log record.")
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Level of every record (user, error, warn, info, debug, verbose).")
                .default_value("info")
                .value_parser(parse_level),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .short('t')
                .value_name("TAG")
                .help("Tag of every record.")
                .default_value("demo"),
        )
        .arg(
            Arg::new("global")
                .long("global-level")
                .value_name("LEVEL")
                .help("Drop records more verbose than LEVEL.")
                .value_parser(parse_level),
        )
        .arg(
            Arg::new("location")
                .long("location-level")
                .value_name("LEVEL")
                .help("Append file:line(module) to records at or below LEVEL.")
                .value_parser(parse_level),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .help("Color escapes: always, never or auto.")
                .default_value("auto")
                .value_parser(["always", "never", "auto"]),
        )
        .arg(
            Arg::new("line-mode")
                .long("line-mode")
                .value_name("MODE")
                .help("Record terminator: lf, crlf or none.")
                .default_value("lf")
                .value_parser(parse_line_mode),
        )
        .arg(
            Arg::new("timestamp")
                .long("timestamp")
                .help("Stamp records with milliseconds since start-up.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("only-tag")
                .long("only-tag")
                .value_name("TAG")
                .help("Whitelist: keep only records tagged TAG.")
                .conflicts_with("skip-tag"),
        )
        .arg(
            Arg::new("skip-tag")
                .long("skip-tag")
                .value_name("TAG")
                .help("Blacklist: drop records tagged TAG."),
        )
        .arg(
            Arg::new("buffered")
                .long("buffered")
                .value_name("BYTES")
                .help("Write through the buffered logger; print backend calls to stderr.")
                .num_args(0..=1)
                .default_missing_value("64")
                .value_parser(["8", "16", "32", "64"]),
        )
        .arg(
            Arg::new("showcase")
                .long("showcase")
                .help("Run a fixed walkthrough with two sinks, a level sweep and a backend redirect.")
                .action(ArgAction::SetTrue)
                .conflicts_with("buffered"),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .num_args(1..)
                .required_unless_present("showcase")
                .action(ArgAction::Append),
        )
}

/// Settings shared by both logger flavours.
#[derive(Clone, Debug)]
struct Options {
    level: Level,
    tag: String,
    global: Option<Level>,
    location: Option<Level>,
    colors: bool,
    line_mode: LineMode,
    timestamp: bool,
    filter: FilterRule,
    messages: Vec<String>,
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Self {
        let colors = match matches.get_one::<String>("color").map(String::as_str) {
            Some("always") => true,
            Some("never") => false,
            _ => StdStream::Stdout.is_terminal(),
        };

        let filter = if let Some(tag) = matches.get_one::<String>("only-tag") {
            Self::tag_filter(FilterMode::Whitelist, tag)
        } else if let Some(tag) = matches.get_one::<String>("skip-tag") {
            Self::tag_filter(FilterMode::Blacklist, tag)
        } else {
            FilterRule::new()
        };

        Self {
            level: matches.get_one("level").copied().unwrap_or(Level::Info),
            tag: matches
                .get_one::<String>("tag")
                .cloned()
                .unwrap_or_default(),
            global: matches.get_one("global").copied(),
            location: matches.get_one("location").copied(),
            colors,
            line_mode: matches
                .get_one("line-mode")
                .copied()
                .unwrap_or(LineMode::WithNewline),
            timestamp: matches.get_flag("timestamp"),
            filter,
            messages: matches
                .get_many::<String>("message")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// Filter rules hold `'static` tags; the demo leaks the one tag it needs.
    fn tag_filter(mode: FilterMode, tag: &str) -> FilterRule {
        FilterRule {
            enabled: true,
            mode,
            tag: Some(Box::leak(tag.to_owned().into_boxed_str())),
            ..FilterRule::new()
        }
    }

    fn records(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

fn write_direct(options: &Options, collected: &Shared<u8>) -> usize {
    let mut config = LoggerConfig::new()
        .with_colors(options.colors)
        .with_line_mode(options.line_mode)
        .with_default_filter(options.filter);
    if let Some(level) = options.location {
        config = config.with_default_info_level(level);
    }
    if let Some(level) = options.global {
        config = config.with_global_level(level);
    }

    let mut logger: Logger = Logger::with_config(config);
    if options.timestamp {
        logger.set_time_source(Some(uptime_millis));
    }

    let sink = Arc::clone(collected);
    if logger
        .register(move |bytes: &[u8]| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(bytes);
        })
        .is_err()
    {
        return 0;
    }

    options
        .records()
        .map(|message| {
            let args = args![message];
            let record = Record::new(options.level, &options.tag, "%s", &args);
            logger.log(&record.with_location(logging::source_location!()))
        })
        .sum()
}

fn write_buffered<const N: usize>(
    options: &Options,
    collected: &Shared<u8>,
    calls: &Shared<(Control, usize)>,
) -> usize {
    let bytes = Arc::clone(collected);
    let trace = Arc::clone(calls);
    let backend = move |buf: &[u8], args: &BackendArgs| {
        bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((args.control, buf.len()));
        buf.len()
    };

    let mut logger = BufferedLogger::<N>::with_backend(Box::new(backend));
    logger.set_colors(options.colors);
    logger.set_line_mode(options.line_mode);
    if let Some(level) = options.location {
        logger.set_info_level(level);
    }
    if let Some(level) = options.global {
        logger.set_global_level(level);
    }
    if options.timestamp {
        logger.set_time_source(Some(uptime_millis));
    }

    // The buffered logger has no sinks, so a tag filter is applied here.
    options
        .records()
        .filter(|_| options.filter.permits(options.level, &options.tag, None))
        .map(|message| {
            let args = args![message];
            let record = Record::new(options.level, &options.tag, "%s", &args);
            logger.log(&record.with_location(logging::source_location!()))
        })
        .sum()
}

fn control_name(control: Control) -> &'static str {
    match control {
        Control::None => "none",
        Control::Store => "store",
        Control::Out => "out",
    }
}

/// Parses `args` and writes the requested records to `stdout`.
///
/// Usage errors go to `stderr` with exit status 2. `--help` and
/// `--version` print to `stdout` and succeed.
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let matches = match clap_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => {
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(stdout, "{error}");
                    ExitCode::SUCCESS
                }
                _ => {
                    let _ = write!(stderr, "{error}");
                    ExitCode::from(USAGE_EXIT)
                }
            };
        }
    };

    let options = Options::from_matches(&matches);
    if matches.get_flag("showcase") {
        return match showcase::run(options.colors) {
            Ok(output) => match stdout.write_all(&output).and_then(|()| stdout.flush()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            },
            Err(error) => {
                let _ = writeln!(stderr, "xf-log-demo: {error}");
                ExitCode::FAILURE
            }
        };
    }

    let collected: Shared<u8> = Arc::default();
    let calls: Shared<(Control, usize)> = Arc::default();

    match matches.get_one::<String>("buffered").map(String::as_str) {
        Some("8") => write_buffered::<8>(&options, &collected, &calls),
        Some("16") => write_buffered::<16>(&options, &collected, &calls),
        Some("32") => write_buffered::<32>(&options, &collected, &calls),
        Some(_) => write_buffered::<64>(&options, &collected, &calls),
        None => write_direct(&options, &collected),
    };

    let output = collected.lock().unwrap_or_else(PoisonError::into_inner);
    if stdout.write_all(&output).and_then(|()| stdout.flush()).is_err() {
        return ExitCode::FAILURE;
    }

    let calls = calls.lock().unwrap_or_else(PoisonError::into_inner);
    for (control, len) in calls.iter() {
        let _ = writeln!(stderr, "{} {len}", control_name(*control));
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> (ExitCode, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let argv = std::iter::once("xf-log-demo").chain(args.iter().copied());
        let code = run_with(argv, &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn writes_one_record_per_message() {
        let (code, stdout, stderr) = run(&["--color", "never", "-t", "app", "one", "two"]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(stdout, "I (none)-app: one\nI (none)-app: two\n");
        assert!(stderr.is_empty());
    }

    #[test]
    fn messages_are_not_format_strings() {
        let (_, stdout, _) = run(&["--color", "never", "100%d"]);
        assert_eq!(stdout, "I (none)-demo: 100%d\n");
    }

    #[test]
    fn always_color_wraps_record() {
        let (_, stdout, _) = run(&["--color", "always", "-l", "warn", "hot"]);
        assert_eq!(stdout, "\x1b[0;33mW (none)-demo: hot\x1b[0m\n");
    }

    #[test]
    fn global_level_drops_verbose_records() {
        let (code, stdout, _) = run(&["--color", "never", "--global-level", "info", "-l", "debug", "x"]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(stdout.is_empty());
    }

    #[test]
    fn skip_tag_blacklists() {
        let (_, stdout, _) = run(&["--color", "never", "--skip-tag", "demo", "x"]);
        assert!(stdout.is_empty());
    }

    #[test]
    fn location_level_appends_module() {
        let (_, stdout, _) = run(&["--color", "never", "--location-level", "info", "m"]);
        assert!(stdout.starts_with("I (none)-demo["));
        assert!(stdout.ends_with("(xf_log::cli)]: m\n"));
    }

    #[test]
    fn buffered_reports_backend_calls() {
        let (code, stdout, stderr) = run(&[
            "--color", "never", "--line-mode", "crlf", "--buffered", "8", "abcdefgh",
        ]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(stdout, "I (none)-demo: abcdefgh\r\n");
        // 25 bytes: three full chunks, a one-byte tail, then the boundary.
        assert_eq!(stderr, "store 8\nstore 8\nstore 8\nout 1\nout 0\n");
    }

    #[test]
    fn buffered_and_direct_agree() {
        let base = ["--color", "always", "-l", "warn", "same bytes"];
        let (_, direct, _) = run(&base);
        let mut buffered_args = base.to_vec();
        buffered_args.insert(0, "--buffered");
        buffered_args.insert(1, "16");
        let (_, buffered, _) = run(&buffered_args);
        assert_eq!(direct, buffered);
    }

    #[test]
    fn showcase_needs_no_messages() {
        let (code, stdout, stderr) = run(&["--color", "never", "--showcase"]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(stderr.is_empty());
        assert!(stdout.contains("--- begin --- lvl: 6 ---\n"));
        assert!(stdout.contains(showcase::FILE_SINK_MARKER));
        assert!(!stdout.contains('\x1b'));
    }

    #[test]
    fn showcase_rejects_buffered() {
        let (code, stdout, _) = run(&["--showcase", "--buffered", "8"]);
        assert_eq!(code, ExitCode::from(USAGE_EXIT));
        assert!(stdout.is_empty());
    }

    #[test]
    fn unknown_level_is_usage_error() {
        let (code, stdout, stderr) = run(&["-l", "loud", "x"]);
        assert_eq!(code, ExitCode::from(USAGE_EXIT));
        assert!(stdout.is_empty());
        assert!(stderr.contains("unknown level"));
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, stdout, stderr) = run(&["--help"]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(stdout.contains("Usage:"));
        assert!(stderr.is_empty());
    }
}
