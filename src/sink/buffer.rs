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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::Error;
use crate::sink::Sink;

/// An in-memory sink that captures every line written to it.
///
/// Clones share the same buffer, so one clone can be handed to a handler while another is kept
/// to inspect the output.
///
/// # Examples
///
/// ```
/// use slogforth::Handler;
/// use slogforth::Record;
/// use slogforth::sink::Buffer;
///
/// let buffer = Buffer::default();
/// let handler = Handler::builder().json().stdout(buffer.clone()).build();
/// handler.handle(&Record::builder().message("hello").build()).unwrap();
/// assert!(buffer.contents_string().contains(r#""message":"hello""#));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Buffer {
    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return a copy of the captured bytes.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Return the captured bytes as a string, replacing invalid UTF-8.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Return true if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discard the captured bytes.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Sink for Buffer {
    fn write(&self, bytes: &[u8]) -> Result<(), Error> {
        self.lock().extend_from_slice(bytes);
        Ok(())
    }
}
