// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::StreamItem;
use futures::future::{self, Either, Future};
use futures::{Stream, StreamExt};

/// Extension trait providing the [`filter`](FilterExt::filter) and
/// [`filter_async`](FilterExt::filter_async) operators.
pub trait FilterExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `x` only when `p(&x)` is true; preserves relative order. An upstream error
    /// always passes through regardless of `p`.
    fn filter(
        self,
        mut p: impl FnMut(&T) -> bool,
    ) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        Self: 'static,
        T: 'static,
    {
        FluxionStream::new(StreamExt::filter(self, move |item| {
            let keep = match item {
                StreamItem::Value(v) => p(v),
                StreamItem::Error(_) => true,
            };
            futures::future::ready(keep)
        }))
    }

    /// Like [`filter`](FilterExt::filter), but `p` returns a future that is awaited
    /// before deciding whether to keep the value.
    ///
    /// Delegates to [`futures::StreamExt::filter`], whose adapter pins the in-flight
    /// item and predicate future side by side, so `p`'s future may safely borrow from
    /// the item across an await point.
    fn filter_async<Fut>(
        self,
        mut p: impl FnMut(&T) -> Fut,
    ) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        Fut: Future<Output = bool>,
        Self: 'static,
        T: 'static,
    {
        FluxionStream::new(StreamExt::filter(self, move |item| match item {
            StreamItem::Value(v) => Either::Left(p(v)),
            StreamItem::Error(_) => Either::Right(future::ready(true)),
        }))
    }
}

impl<S, T> FilterExt<T> for S where S: Stream<Item = StreamItem<T>> {}
