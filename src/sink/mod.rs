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

//! Byte sinks that receive encoded log lines.

use std::fmt;
use std::sync::Arc;

use crate::Error;

mod buffer;
mod file;
mod stdio;
mod writer;

pub use self::buffer::Buffer;
pub use self::file::File;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::writer::Writer;

/// A shared handle to a sink. Derived handlers share the sinks of their parent.
pub type SharedSink = Arc<dyn Sink>;

/// A destination for encoded log lines.
///
/// A sink receives each line as one `write` call. Sinks shared between threads are responsible
/// for their own synchronization; the handler never locks around a write.
pub trait Sink: fmt::Debug + Send + Sync + 'static {
    /// Write one encoded log line.
    fn write(&self, bytes: &[u8]) -> Result<(), Error>;

    /// Flush any buffered bytes.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}
