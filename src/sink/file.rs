// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::ErrorKind;
use crate::sink::Sink;

/// A sink that appends to a file, creating it if missing.
///
/// Lines are written as they arrive; there is no buffering and no rotation.
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    file: Mutex<std::fs::File>,
}

impl File {
    /// Open the file at `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                Error::new(ErrorKind::Io, "failed to open log file")
                    .with_context("path", path.display())
                    .with_source(err)
            })?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// The path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for File {
    fn write(&self, bytes: &[u8]) -> Result<(), Error> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(bytes).map_err(|err| {
            Error::from_io_error(err).with_context("path", self.path.display())
        })
    }

    fn flush(&self) -> Result<(), Error> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush().map_err(Error::from_io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let sink = File::new(&path).unwrap();
        sink.write(b"one\n").unwrap();
        sink.write(b"two\n").unwrap();
        sink.flush().unwrap();
        drop(sink);

        let sink = File::new(&path).unwrap();
        sink.write(b"three\n").unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");
        let err = File::new(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
