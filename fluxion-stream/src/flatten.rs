// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::StreamItem;
use futures::{Stream, StreamExt};

/// Extension trait providing the [`flatten`](FlattenExt::flatten) operator.
pub trait FlattenExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: IntoIterator,
{
    /// Emits every element of each inner iterable in order. Empty inner
    /// iterables contribute nothing. An upstream error is forwarded as-is.
    fn flatten(self) -> FluxionStream<impl Stream<Item = StreamItem<T::Item>>>
    where
        Self: 'static,
        T: 'static,
    {
        FluxionStream::new(StreamExt::flat_map(self, |item| match item {
            StreamItem::Value(v) => {
                futures::stream::iter(v.into_iter().map(StreamItem::Value).collect::<Vec<_>>())
            }
            StreamItem::Error(e) => futures::stream::iter(vec![StreamItem::Error(e)]),
        }))
    }
}

impl<S, T> FlattenExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: IntoIterator,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::values;

    #[tokio::test]
    async fn flatten_emits_inner_elements_in_order() {
        let out: Vec<_> = values(vec![vec![1, 2], vec![], vec![3]])
            .flatten()
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn flatten_forwards_upstream_error() {
        let source = futures::stream::iter(vec![
            StreamItem::Value(vec![1]),
            StreamItem::Error(fluxion_core::FluxionError::validation("boom")),
        ]);
        let out: Vec<_> = source.flatten().collect().await;
        assert!(out[0].clone().ok().is_some());
        assert!(out[1].is_error());
    }
}
