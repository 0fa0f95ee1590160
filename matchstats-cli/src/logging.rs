//! Logger setup: `env_logger` on stderr, optionally mirrored to a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Stderr plus a copy with ANSI escapes removed.
struct TeeWriter {
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Install the global logger.
///
/// `--quiet` keeps warnings and errors, the default shows info, and
/// `--verbose` adds debug messages with timestamps. `RUST_LOG` overrides
/// all three.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    if let Some(path) = logfile {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(TeeWriter {
            file: strip_ansi_escapes::Writer::new(file),
        })));
    }

    builder.init();
    Ok(())
}
