//! Tracing setup.
//!
//! Events go both to stderr and to `logs/parser.log` under the base
//! directory, one line each in the form
//! `"<timestamp> - [<LEVEL>] - <message> <fields>"`.
//!
//! Progress bars share stderr with the console log: while one created
//! by [`progress`] is alive, each log line is written with the bar
//! suspended.

use chrono::Local;
use indicatif::ProgressBar;
use once_cell::sync::Lazy;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use crate::constants::DT_FORMAT;
use crate::error::ParserError;

/// Line layout shared by the console and the log file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserFormat;

impl<S, N> FormatEvent<S, N> for ParserFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - [{}] - ",
            Local::now().format(DT_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

static ACTIVE_BAR: Lazy<Mutex<Option<ProgressBar>>> = Lazy::new(|| Mutex::new(None));

fn active_bar() -> Option<ProgressBar> {
    ACTIVE_BAR.lock().ok().and_then(|slot| slot.clone())
}

/// A progress bar the console log knows to step around. Dropping it
/// finishes the bar.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
        if let Ok(mut slot) = ACTIVE_BAR.lock() {
            *slot = None;
        }
    }
}

pub fn progress(len: usize) -> Progress {
    let bar = ProgressBar::new(len as u64);
    if let Ok(mut slot) = ACTIVE_BAR.lock() {
        *slot = Some(bar.clone());
    }
    Progress { bar }
}

/// Stderr writer that hides the active progress bar around each write.
struct ConsoleWriter;

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_bar() {
            Some(bar) if !bar.is_finished() => bar.suspend(|| io::stderr().write_all(buf))?,
            _ => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Install the global subscriber. The filter defaults to `info` and can be
/// overridden with `RUST_LOG`.
pub fn init(log_file: &Path) -> Result<(), ParserError> {
    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = tfmt::layer()
        .with_ansi(false)
        .event_format(ParserFormat)
        .with_writer(|| ConsoleWriter);
    let persistent = tfmt::layer()
        .with_ansi(false)
        .event_format(ParserFormat)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(persistent)
        .init();
    Ok(())
}
