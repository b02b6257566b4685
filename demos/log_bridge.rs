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

use slogforth::Handler;
use slogforth::Level;

fn main() {
    Handler::builder()
        .level(Level::TRACE)
        .short_levels()
        .line_info(false)
        .build()
        .apply()
        .unwrap();

    log::error!("Hello error!");
    log::warn!(disk = "sda1", free_mb = 12; "Hello warn!");
    log::info!("Hello info!");
    log::debug!(elapsed = 0.25; "Hello debug!");
    log::trace!("Hello trace!");
}
