// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fan-out: turn one stream into several independent ones via on-demand
//! pulling with shared buffering.

pub mod split;

pub use split::SplitExt;
