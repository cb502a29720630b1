// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lazy, pull-driven elementwise stream combinators.
//!
//! Every operator here consumes a [`FluxionStream`] of [`fluxion_core::StreamItem`]
//! and returns a new one; nothing runs until a terminal operator in
//! `fluxion-exec` drives the pipeline.

pub mod aggregated_stream;
pub mod enumerate;
pub mod filter;
pub mod flatten;
pub mod fluxion_stream;
pub mod keyed;
pub mod map;
pub mod skip;
pub mod take;
pub mod tap;

#[cfg(test)]
mod test_support;

pub use aggregated_stream::{AggregatedStream, GroupByExt};
pub use enumerate::EnumerateExt;
pub use filter::FilterExt;
pub use flatten::FlattenExt;
pub use fluxion_stream::FluxionStream;
pub use keyed::KeyedExt;
pub use map::MapExt;
pub use skip::SkipExt;
pub use take::TakeExt;
pub use tap::TapExt;
