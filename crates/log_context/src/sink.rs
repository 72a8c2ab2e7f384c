//! Log file naming and the append-only file sink.

use std::{
    fs::{DirBuilder, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

use crate::LoggerError;

/// Logs directory mode: owner rwx, group and other search only.
#[cfg(unix)]
const LOGS_DIR_MODE: u32 = 0o711;

/// Log file mode, before the process umask applies.
#[cfg(unix)]
const LOG_FILE_MODE: u32 = 0o666;

/// Log file name for `service` on the given calendar day-of-month.
///
/// Files are keyed by day number alone. A file first written on the 5th of
/// one month is appended to again on the 5th of any later month.
pub(crate) fn file_name(service: &str, day: u8) -> String {
    format!("{service}_{day}.log")
}

/// Current day-of-month in local time, or in UTC when the local offset
/// cannot be determined.
pub(crate) fn current_day() -> u8 {
    time::OffsetDateTime::now_local()
        .map(|now| now.day())
        .unwrap_or_else(|_| time::OffsetDateTime::now_utc().day())
}

/// An append-only handle to the day's log file.
///
/// The file is opened once and never explicitly closed; it is released when
/// the owning process exits.
#[derive(Debug)]
pub(crate) struct FileSink {
    file: Mutex<File>,
    path: PathBuf,
}

impl FileSink {
    /// Creates the logs directory and opens the day's log file for `service`.
    ///
    /// Missing directories are created recursively. The file is opened in
    /// read, append, create mode.
    pub(crate) fn open(logs_dir: &Path, service: &str) -> Result<Self, LoggerError> {
        let mut dir_builder = DirBuilder::new();
        dir_builder.recursive(true);
        #[cfg(unix)]
        dir_builder.mode(LOGS_DIR_MODE);
        dir_builder
            .create(logs_dir)
            .map_err(LoggerError::DirectoryCreation)?;

        let path = logs_dir.join(file_name(service, current_day()));
        let mut options = OpenOptions::new();
        options.read(true).append(true).create(true);
        #[cfg(unix)]
        options.mode(LOG_FILE_MODE);
        let file = options.open(&path).map_err(LoggerError::FileOpen)?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// Path of the bound log file.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one serialized record, terminated by a newline.
    ///
    /// The record goes out in a single `write_all` call so that records from
    /// concurrent emitters never fragment. Write failures are swallowed;
    /// emission has no error path.
    pub(crate) fn write_record(&self, mut record: Vec<u8>) {
        record.push(b'\n');
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(&record);
        }
    }
}
