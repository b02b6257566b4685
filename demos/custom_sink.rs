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

//! Publish log lines to named subjects of a message bus, with a snapshot handed over in between.

use std::sync::Arc;
use std::sync::Mutex;

use slogforth::Attr;
use slogforth::Error;
use slogforth::Handler;
use slogforth::Level;
use slogforth::Record;
use slogforth::sink::SharedSink;
use slogforth::sink::Sink;
use slogforth::sink::Writer;

/// A toy message bus: every published message is kept with its subject.
#[derive(Debug, Default)]
struct Bus {
    messages: Mutex<Vec<(String, String)>>,
}

/// A sink that publishes each line on one subject of the bus.
#[derive(Debug)]
struct Publisher {
    bus: Arc<Bus>,
    subject: String,
}

impl Sink for Publisher {
    fn write(&self, bytes: &[u8]) -> Result<(), Error> {
        let message = String::from_utf8_lossy(bytes).trim_end().to_string();
        let mut messages = self
            .bus
            .messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        messages.push((self.subject.clone(), message));
        Ok(())
    }
}

fn publisher(bus: &Arc<Bus>, subject: &str) -> SharedSink {
    Arc::new(Publisher {
        bus: bus.clone(),
        subject: subject.to_string(),
    })
}

fn main() {
    let bus = Arc::new(Bus::default());

    let handler = Handler::builder()
        .json()
        .stdout_sinks([publisher(&bus, "logs.stdout")])
        .stderr_sinks([
            publisher(&bus, "logs.stderr"),
            Arc::new(Writer::new(std::io::stderr())),
        ])
        .build()
        .with_attrs([Attr::new("service", "billing")]);

    handler
        .handle(&Record::builder().message("invoice created").build())
        .unwrap();

    // another process rebuilds the same handler from its snapshot
    let snapshot = handler.to_json().unwrap();
    println!("snapshot: {}", String::from_utf8_lossy(&snapshot));
    let restored = Handler::from_json(
        &snapshot,
        vec![publisher(&bus, "logs.restored")],
        vec![publisher(&bus, "logs.restored.err")],
    )
    .unwrap();

    restored
        .handle(
            &Record::builder()
                .level(Level::ERROR)
                .message("payment declined")
                .build(),
        )
        .unwrap();

    let messages = bus
        .messages
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    for (subject, message) in messages.iter() {
        println!("{subject}: {message}");
    }
}
