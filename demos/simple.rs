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

use slogforth::Attr;
use slogforth::Handler;
use slogforth::Level;
use slogforth::Record;

fn main() {
    let handler = Handler::builder()
        .level(Level::TRACE)
        .color()
        .short_levels()
        .pid()
        .build();

    for level in [
        Level::FATAL,
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ] {
        let record = Record::builder()
            .level(level)
            .message(format!("Hello {level}!"))
            .build();
        handler.handle(&record).unwrap();
    }

    let scoped = handler
        .with_attrs([Attr::new("request_id", 42u64), Attr::new("user", "alice")])
        .with_group("api");
    scoped
        .handle(&Record::builder().message("Hello group!").caller().build())
        .unwrap();

    let justified = Handler::builder()
        .group_right_justify()
        .line_info(false)
        .build()
        .with_group("worker");
    justified
        .handle(&Record::builder().message("Hello right!").caller().build())
        .unwrap();

    let json = Handler::builder().json().build().with_group("api");
    json.handle(
        &Record::builder()
            .level(Level::WARN)
            .message("Hello json!")
            .attr(("retries", 3))
            .build(),
    )
    .unwrap();
}
