// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timestamp-driven batching: fixed-size [`chunk`](ChunkExt::chunk), tumbling
//! [`window`](WindowExt::window), and overlapping
//! [`sliding_window`](SlidingWindowExt::sliding_window).

pub mod chunk;
pub mod sliding_window;
pub mod window;

pub use chunk::ChunkExt;
pub use sliding_window::SlidingWindowExt;
pub use window::WindowExt;
