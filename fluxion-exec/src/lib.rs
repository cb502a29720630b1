// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal operators: [`to_list`](ToListExt::to_list) drains a stream into a
//! `Vec`, [`sink`](SinkExt::sink) drives a bounded-parallel callback.

pub mod sink;
pub mod to_list;

pub use sink::SinkExt;
pub use to_list::ToListExt;
