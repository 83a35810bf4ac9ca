//! Small logging helpers shared across the workspace's binaries.
//!
//! The main useful export is [`AlignedTermDecorator`], a `slog_term::Decorator` wrapper that pads
//! the logger's "message" field out to a fixed width so that the subsequent key/value pairs line
//! up in a terminal, regardless of how long any individual log message is.

use lighthouse_metrics::{try_create_int_counter, IntCounter};
use slog_term::{Decorator, RecordDecorator};
use std::io::{Result, Write};

/// The number of characters to pad a log message out to before printing the trailing key/value
/// pairs.
pub const MAX_MESSAGE_WIDTH: usize = 40;

lazy_static::lazy_static! {
    pub static ref CRIT_COUNT: Result<IntCounter, lighthouse_metrics::Error> =
        try_create_int_counter("log_crit_count", "Count of critical log messages");
    pub static ref ERROR_COUNT: Result<IntCounter, lighthouse_metrics::Error> =
        try_create_int_counter("log_error_count", "Count of error log messages");
}

/// Wraps some other `Decorator` and pads the `msg` field out to `width` characters.
pub struct AlignedTermDecorator<D> {
    inner: D,
    width: usize,
}

impl<D: Decorator> AlignedTermDecorator<D> {
    pub fn new(inner: D, width: usize) -> Self {
        Self { inner, width }
    }
}

impl<D: Decorator> Decorator for AlignedTermDecorator<D> {
    fn with_record<F>(
        &self,
        record: &slog::Record,
        values: &slog::OwnedKVList,
        f: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut dyn RecordDecorator) -> Result<()>,
    {
        let width = self.width;
        self.inner.with_record(record, values, |decorator| {
            f(&mut AlignedRecordDecorator {
                inner: decorator,
                width,
                msg_seen: false,
            })
        })
    }
}

struct AlignedRecordDecorator<'a> {
    inner: &'a mut dyn RecordDecorator,
    width: usize,
    msg_seen: bool,
}

impl<'a> Write for AlignedRecordDecorator<'a> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if self.msg_seen {
            return self.inner.write(buf);
        }

        self.msg_seen = true;
        self.inner.write_all(buf)?;

        if buf.len() < self.width {
            let padding = vec![b' '; self.width - buf.len()];
            self.inner.write_all(&padding)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

impl<'a> RecordDecorator for AlignedRecordDecorator<'a> {
    fn reset(&mut self) -> Result<()> {
        self.inner.reset()
    }

    fn start_whitespace(&mut self) -> Result<()> {
        self.inner.start_whitespace()
    }

    fn start_msg(&mut self) -> Result<()> {
        self.inner.start_msg()
    }

    fn start_timestamp(&mut self) -> Result<()> {
        self.inner.start_timestamp()
    }

    fn start_level(&mut self) -> Result<()> {
        self.inner.start_level()
    }

    fn start_comma(&mut self) -> Result<()> {
        self.inner.start_comma()
    }

    fn start_key(&mut self) -> Result<()> {
        self.inner.start_key()
    }

    fn start_value(&mut self) -> Result<()> {
        self.inner.start_value()
    }

    fn start_separator(&mut self) -> Result<()> {
        self.inner.start_separator()
    }
}
