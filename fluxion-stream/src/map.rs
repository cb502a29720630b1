// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::StreamItem;
use futures::future::{self, Either, Future};
use futures::{Stream, StreamExt};

/// Extension trait providing the [`map`](MapExt::map) and
/// [`map_async`](MapExt::map_async) operators.
pub trait MapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `f(x)` for every upstream value; an upstream error is forwarded unchanged.
    ///
    /// Preserves count and order.
    fn map<U>(self, mut f: impl FnMut(T) -> U) -> FluxionStream<impl Stream<Item = StreamItem<U>>>
    where
        Self: 'static,
    {
        FluxionStream::new(StreamExt::map(self, move |item| item.map(&mut f)))
    }

    /// Like [`map`](MapExt::map), but `f` returns a future that is awaited before the
    /// mapped value is emitted. An upstream error short-circuits without calling `f`.
    fn map_async<U, Fut>(
        self,
        mut f: impl FnMut(T) -> Fut,
    ) -> FluxionStream<impl Stream<Item = StreamItem<U>>>
    where
        Fut: Future<Output = U>,
        Self: 'static,
    {
        FluxionStream::new(self.then(move |item| match item {
            StreamItem::Value(v) => Either::Left(future::map(f(v), StreamItem::Value)),
            StreamItem::Error(e) => Either::Right(future::ready(StreamItem::Error(e))),
        }))
    }
}

impl<S, T> MapExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::values;

    #[tokio::test]
    async fn map_transforms_values_and_preserves_order() {
        let stream = values(vec![1, 2, 3]).map(|x| x * 10);
        let out: Vec<_> = stream.collect::<Vec<_>>().await;
        assert_eq!(
            out.into_iter().map(|i| i.ok().unwrap()).collect::<Vec<_>>(),
            vec![10, 20, 30]
        );
    }

    #[tokio::test]
    async fn map_forwards_upstream_error() {
        let source = futures::stream::iter(vec![
            StreamItem::Value(1),
            StreamItem::Error(fluxion_core::FluxionError::validation("boom")),
        ]);
        let out: Vec<_> = source.map(|x: i32| x + 1).collect().await;
        assert!(out[0].clone().ok().is_some());
        assert!(out[1].is_error());
    }

    #[tokio::test]
    async fn map_async_awaits_before_emitting() {
        let stream = values(vec![1, 2]).map_async(|x| async move { x * 2 });
        let out: Vec<_> = stream.collect::<Vec<_>>().await;
        assert_eq!(
            out.into_iter().map(|i| i.ok().unwrap()).collect::<Vec<_>>(),
            vec![2, 4]
        );
    }
}
