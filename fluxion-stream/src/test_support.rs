// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test-only helpers shared by this crate's operator test modules.

#![cfg(test)]

use crate::FluxionStream;
use fluxion_core::StreamItem;
use futures::Stream;

/// Builds a `FluxionStream` that emits every element of `items` as a `Value`, then ends.
pub(crate) fn values<T: 'static>(
    items: Vec<T>,
) -> FluxionStream<impl Stream<Item = StreamItem<T>>> {
    FluxionStream::from_values(futures::stream::iter(items))
}
