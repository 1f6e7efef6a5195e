/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};
use std::path::Path;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

use log::Level;

mod capture;
pub use capture::CaptureBuffer;

mod file;
use file::FileBackend;
pub use file::FileOutputConfig;

const LOG_TARGET: &str = "metrical";

/// The currently opened output of a text handler.
pub(crate) enum OutputBackend {
    Stdout,
    Stderr,
    Log(Level),
    Capture(CaptureBuffer),
    File(FileBackend),
    #[cfg(test)]
    Broken,
    #[cfg(test)]
    FailNext(CaptureBuffer, Arc<AtomicBool>),
}

impl OutputBackend {
    pub(crate) fn write_text(&mut self, text: &str) -> io::Result<()> {
        match self {
            OutputBackend::Stdout => io::stdout().lock().write_all(text.as_bytes()),
            OutputBackend::Stderr => io::stderr().lock().write_all(text.as_bytes()),
            OutputBackend::Log(level) => {
                for line in text.lines() {
                    log::log!(target: LOG_TARGET, *level, "{line}");
                }
                Ok(())
            }
            OutputBackend::Capture(buf) => {
                buf.append(text);
                Ok(())
            }
            OutputBackend::File(f) => f.write_text(text),
            #[cfg(test)]
            OutputBackend::Broken => Err(io::Error::other("broken output")),
            #[cfg(test)]
            OutputBackend::FailNext(buf, fail) => {
                if fail.swap(false, Ordering::Relaxed) {
                    return Err(io::Error::other("write failed"));
                }
                buf.append(text);
                Ok(())
            }
        }
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputBackend::Stdout => io::stdout().flush(),
            OutputBackend::Stderr => io::stderr().flush(),
            OutputBackend::Log(_) => {
                log::logger().flush();
                Ok(())
            }
            OutputBackend::Capture(_) => Ok(()),
            OutputBackend::File(f) => f.flush(),
            #[cfg(test)]
            OutputBackend::Broken => Err(io::Error::other("broken output")),
            #[cfg(test)]
            OutputBackend::FailNext(..) => Ok(()),
        }
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        match self {
            OutputBackend::File(f) => Some(f.path()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum OutputBackendBuilder {
    Stdout,
    Stderr,
    /// every line goes to the `log` facade at this level
    Log(Level),
    /// in memory buffer
    Capture(CaptureBuffer),
    /// a new file for every session
    File(FileOutputConfig),
    #[cfg(test)]
    Broken,
    #[cfg(test)]
    Unavailable,
    /// capture output whose next write fails while the flag is set
    #[cfg(test)]
    FailNext(CaptureBuffer, Arc<AtomicBool>),
}

impl Default for OutputBackendBuilder {
    fn default() -> Self {
        OutputBackendBuilder::Log(Level::Info)
    }
}

impl OutputBackendBuilder {
    /// Open a new output, `now` is the time in milliseconds of the opening.
    pub(crate) fn build(&self, now: i64) -> io::Result<OutputBackend> {
        match self {
            OutputBackendBuilder::Stdout => Ok(OutputBackend::Stdout),
            OutputBackendBuilder::Stderr => Ok(OutputBackend::Stderr),
            OutputBackendBuilder::Log(level) => Ok(OutputBackend::Log(*level)),
            OutputBackendBuilder::Capture(buf) => {
                buf.add_session();
                Ok(OutputBackend::Capture(buf.clone()))
            }
            OutputBackendBuilder::File(config) => {
                let f = FileBackend::create(config, now)?;
                Ok(OutputBackend::File(f))
            }
            #[cfg(test)]
            OutputBackendBuilder::Broken => Ok(OutputBackend::Broken),
            #[cfg(test)]
            OutputBackendBuilder::Unavailable => Err(io::Error::other("output unavailable")),
            #[cfg(test)]
            OutputBackendBuilder::FailNext(buf, fail) => {
                buf.add_session();
                Ok(OutputBackend::FailNext(buf.clone(), fail.clone()))
            }
        }
    }
}
