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

//! Slogforth renders structured log records as text or JSON lines and writes them to pluggable
//! sinks.
//!
//! # Overview
//!
//! A [`Handler`] is built once with [`Handler::builder`] and is immutable afterwards. Scoped
//! handlers are derived with [`Handler::with_attrs`] and [`Handler::with_group`]; derived
//! handlers share their parent's sinks. Records at [`Level::ERROR`] and above go to the error
//! sinks, all others to the normal sinks.
//!
//! A handler's configuration, including its typed attributes, can be saved with
//! [`Handler::to_json`] and restored with [`Handler::from_json`].
//!
//! # Examples
//!
//! Text output to stdout:
//!
//! ```
//! use slogforth::Attr;
//! use slogforth::Handler;
//! use slogforth::Level;
//! use slogforth::Record;
//!
//! let handler = Handler::builder().level(Level::DEBUG).short_levels().build();
//! let db = handler.with_group("db").with_attrs([Attr::new("pool", 4)]);
//!
//! db.handle(&Record::builder().level(Level::DEBUG).message("connected").build())
//!     .unwrap();
//! ```
//!
//! JSON output through the `log` crate:
//!
//! ```
//! use slogforth::Handler;
//!
//! Handler::builder().json().pid().build().apply().unwrap();
//!
//! log::info!(user = "alice"; "logged in");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

pub extern crate jiff;

pub mod color;
pub mod sink;
pub mod term;

mod codec;
mod error;
mod handler;
mod kv;
mod layout;
mod level;
mod record;
mod time;

#[cfg(feature = "bridge-log")]
mod bridge {
    mod log;
}

pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::handler::DEFAULT_GROUP_TEXT_OUTPUT_FORMAT;
pub use self::handler::DEFAULT_TEXT_OUTPUT_FORMAT;
pub use self::handler::Handler;
pub use self::handler::HandlerBuilder;
pub use self::handler::LINE_INFO_KEY;
pub use self::kv::Attr;
pub use self::kv::Kind;
pub use self::kv::Value;
pub use self::level::Level;
pub use self::record::Record;
pub use self::record::RecordBuilder;
pub use self::time::DEFAULT_TIME_FORMAT;
