// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A lazy, pull-driven wrapper around any stream of [`StreamItem<T>`].
///
/// Nothing runs until a terminal operator (`to_list`, `sink`) drives the wrapped
/// stream to exhaustion. Every operator in this crate (and in
/// `fluxion-stream-multi`, `fluxion-stream-fanout`, `fluxion-stream-time`) consumes a
/// `FluxionStream` and returns a new one; the underlying source is pulled exactly
/// once per emitted item plus whatever lookahead an individual operator documents.
#[pin_project]
pub struct FluxionStream<S> {
    #[pin]
    inner: S,
}

impl<S> FluxionStream<S> {
    /// Wraps a stream of `StreamItem<T>` in a `FluxionStream`.
    pub const fn new(stream: S) -> Self {
        Self { inner: stream }
    }

    /// Alias for [`FluxionStream::new`], kept for discoverability at call sites that
    /// read better as "from_stream" than "new".
    pub fn from_stream(stream: S) -> Self {
        Self::new(stream)
    }

    /// Unwraps back to the underlying stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, T> FluxionStream<S>
where
    S: Stream<Item = T> + 'static,
{
    /// Wraps a plain stream of values, lifting each item into `StreamItem::Value`.
    ///
    /// Use this to build a fluxion pipeline's source from any existing
    /// `futures::Stream` that never fails by construction (e.g. `futures::stream::iter`).
    pub fn from_values(stream: S) -> FluxionStream<impl Stream<Item = StreamItem<T>>> {
        FluxionStream::new(futures::StreamExt::map(stream, StreamItem::Value))
    }
}

impl<S> Stream for FluxionStream<S>
where
    S: Stream,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
