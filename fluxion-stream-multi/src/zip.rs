// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use fluxion_stream::FluxionStream;
use futures::{Stream, StreamExt};
use std::pin::Pin;

type BoxedSource<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>;

/// Extension trait providing the [`zip`](ZipExt::zip) and
/// [`zip_longest`](ZipExt::zip_longest) operators.
pub trait ZipExt<T>: Stream<Item = StreamItem<T>> + Send + 'static
where
    T: Send + 'static,
{
    /// Advances `self` and every one of `others` once per round, in source
    /// order, and emits the round as a `Vec<T>`. Terminates as soon as any
    /// source is exhausted; values already pulled from other sources that
    /// round are discarded.
    fn zip<S2>(self, others: Vec<S2>) -> FluxionStream<impl Stream<Item = StreamItem<Vec<T>>>>
    where
        S2: Stream<Item = StreamItem<T>> + Send + 'static,
        Self: Sized,
    {
        let mut sources: Vec<BoxedSource<T>> = vec![Box::pin(self)];
        for source in others {
            sources.push(Box::pin(source));
        }

        FluxionStream::new(async_stream::stream! {
            let mut sources = sources;
            loop {
                let mut round = Vec::with_capacity(sources.len());
                let mut exhausted = false;
                for source in sources.iter_mut() {
                    match source.next().await {
                        Some(StreamItem::Value(v)) => round.push(v),
                        Some(StreamItem::Error(e)) => {
                            yield StreamItem::Error(e);
                            return;
                        }
                        None => {
                            exhausted = true;
                            break;
                        }
                    }
                }
                if exhausted {
                    return;
                }
                yield StreamItem::Value(round);
            }
        })
    }

    /// Like [`zip`](ZipExt::zip), but advances only sources not yet
    /// exhausted each round, filling exhausted positions with `fill`, and
    /// terminates only once every source is exhausted.
    fn zip_longest<S2>(
        self,
        others: Vec<S2>,
        fill: T,
    ) -> FluxionStream<impl Stream<Item = StreamItem<Vec<T>>>>
    where
        S2: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Clone,
        Self: Sized,
    {
        let mut sources: Vec<BoxedSource<T>> = vec![Box::pin(self)];
        for source in others {
            sources.push(Box::pin(source));
        }

        FluxionStream::new(async_stream::stream! {
            let mut sources = sources;
            let mut exhausted = vec![false; sources.len()];
            loop {
                if exhausted.iter().all(|&e| e) {
                    return;
                }
                let mut round = Vec::with_capacity(sources.len());
                for (i, source) in sources.iter_mut().enumerate() {
                    if exhausted[i] {
                        round.push(fill.clone());
                        continue;
                    }
                    match source.next().await {
                        Some(StreamItem::Value(v)) => round.push(v),
                        Some(StreamItem::Error(e)) => {
                            yield StreamItem::Error(e);
                            return;
                        }
                        None => {
                            exhausted[i] = true;
                            round.push(fill.clone());
                        }
                    }
                }
                yield StreamItem::Value(round);
            }
        })
    }
}

impl<S, T> ZipExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: Vec<i32>) -> impl Stream<Item = StreamItem<i32>> + Send + 'static {
        futures::stream::iter(items.into_iter().map(StreamItem::Value))
    }

    #[tokio::test]
    async fn zip_terminates_on_the_shortest_source() {
        let out: Vec<_> = values(vec![1, 2, 3])
            .zip(vec![values(vec![10, 20])])
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![vec![1, 10], vec![2, 20]]);
    }

    #[tokio::test]
    async fn zip_longest_fills_exhausted_positions() {
        let out: Vec<_> = values(vec![1, 2, 3])
            .zip_longest(vec![values(vec![10, 20])], -1)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![vec![1, 10], vec![2, 20], vec![3, -1]]);
    }
}
