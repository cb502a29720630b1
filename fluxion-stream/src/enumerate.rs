// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::StreamItem;
use futures::{Stream, StreamExt};

/// Extension trait providing the [`enumerate`](EnumerateExt::enumerate) operator.
pub trait EnumerateExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `(index, x)` for every upstream value, with `index` starting at
    /// `start` and incremented by one per emission. Errors pass through and do
    /// not consume an index.
    fn enumerate(
        self,
        start: u64,
    ) -> FluxionStream<impl Stream<Item = StreamItem<(u64, T)>>>
    where
        Self: 'static,
        T: 'static,
    {
        let next = start;
        FluxionStream::new(StreamExt::scan(self, next, |idx, item| {
            let mapped = match item {
                StreamItem::Value(v) => {
                    let this_idx = *idx;
                    *idx += 1;
                    StreamItem::Value((this_idx, v))
                }
                StreamItem::Error(e) => StreamItem::Error(e),
            };
            futures::future::ready(Some(mapped))
        }))
    }
}

impl<S, T> EnumerateExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::values;

    #[tokio::test]
    async fn enumerate_starts_at_given_value_and_increments() {
        let out: Vec<_> = values(vec!["a", "b", "c"])
            .enumerate(5)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![(5, "a"), (6, "b"), (7, "c")]);
    }

    #[tokio::test]
    async fn enumerate_does_not_consume_an_index_for_errors() {
        let source = futures::stream::iter(vec![
            StreamItem::Error(fluxion_core::FluxionError::validation("boom")),
            StreamItem::Value("a"),
        ]);
        let out: Vec<_> = source.enumerate(0).collect().await;
        assert!(out[0].is_error());
        assert_eq!(out[1].clone().ok().unwrap(), (0, "a"));
    }
}
