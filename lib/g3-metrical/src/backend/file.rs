/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output files are named `<path_stem><yyyy-mm-ddTHH:MM:SS.sssZ><path_suffix>`.
///
/// Existing files are never overwritten. When the name is already taken, as
/// for two sessions opened within the same millisecond, a `-1`, `-2`, ...
/// counter is inserted before the suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOutputConfig {
    path_stem: PathBuf,
    path_suffix: String,
}

impl FileOutputConfig {
    pub fn new(path_stem: impl Into<PathBuf>, path_suffix: impl Into<String>) -> Self {
        FileOutputConfig {
            path_stem: path_stem.into(),
            path_suffix: path_suffix.into(),
        }
    }

    #[inline]
    pub fn path_stem(&self) -> &Path {
        &self.path_stem
    }

    #[inline]
    pub fn path_suffix(&self) -> &str {
        &self.path_suffix
    }

    pub fn file_path(&self, millis: i64) -> io::Result<PathBuf> {
        let timestamp = timestamp(millis)?;
        Ok(self.build_path(&timestamp, 0))
    }

    fn build_path(&self, timestamp: &str, seq: usize) -> PathBuf {
        let mut path = OsString::from(self.path_stem.as_os_str());
        path.push(timestamp);
        if seq > 0 {
            path.push(format!("-{seq}"));
        }
        path.push(&self.path_suffix);
        PathBuf::from(path)
    }
}

fn timestamp(millis: i64) -> io::Result<String> {
    g3_datetime::format_utc_millis(millis).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("timestamp {millis} out of range"),
        )
    })
}

const MAX_NAME_SEQUENCE: usize = 1000;

pub(crate) struct FileBackend {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileBackend {
    pub(super) fn create(config: &FileOutputConfig, now: i64) -> io::Result<Self> {
        let timestamp = timestamp(now)?;
        for seq in 0..=MAX_NAME_SEQUENCE {
            let path = config.build_path(&timestamp, seq);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    return Ok(FileBackend {
                        path,
                        writer: BufWriter::new(file),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free metrics file name for timestamp {timestamp}"),
        ))
    }

    #[inline]
    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    pub(super) fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    pub(super) fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
