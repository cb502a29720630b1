// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Fluxion
//!
//! An async stream combinator library with ordered semantics, built on top of
//! the `futures`/`tokio` ecosystem.
//!
//! ## Design Philosophy
//!
//! Every operator consumes a [`FluxionStream`] and returns a new one; nothing
//! runs until a terminal operator ([`ToListExt::to_list`], [`SinkExt::sink`])
//! drives the pipeline. Production code composes `FluxionStream`s; test code
//! additionally reaches for `TestChannel` (in `fluxion-test-utils`), which adds
//! push capability the production API deliberately omits.
//!
//! ## Quick Start
//!
//! ```rust
//! use fluxion::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = FluxionStream::from_values(futures::stream::iter(vec![1, 2, 3, 4, 5]));
//! let doubled = source.map(|x: i32| x * 2).to_list().await.unwrap();
//! assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
//! # }
//! ```

pub use fluxion_core::{FluxionError, HasTimestamp, Result, StreamItem};

pub use fluxion_stream::{
    AggregatedStream, EnumerateExt, FilterExt, FlattenExt, FluxionStream, GroupByExt, KeyedExt,
    MapExt, SkipExt, TakeExt, TapExt,
};

pub use fluxion_stream_multi::{MergeExt, MergeOrderedExt, ZipExt};

pub use fluxion_stream_fanout::SplitExt;

pub use fluxion_stream_time::{ChunkExt, SlidingWindowExt, WindowExt};

pub use fluxion_exec::{SinkExt, ToListExt};

/// Convenience glob import of every extension trait and the core types needed
/// to build and drain a fluxion pipeline.
pub mod prelude {
    pub use crate::{
        AggregatedStream, ChunkExt, EnumerateExt, FilterExt, FlattenExt, FluxionError,
        FluxionStream, GroupByExt, HasTimestamp, KeyedExt, MapExt, MergeExt, MergeOrderedExt,
        Result, SinkExt, SkipExt, SlidingWindowExt, SplitExt, StreamItem, TakeExt, TapExt,
        ToListExt, WindowExt, ZipExt,
    };
}
