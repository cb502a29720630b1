// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{HasTimestamp, StreamItem};
use fluxion_stream::FluxionStream;
use futures::future::ready;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use std::mem::take;
use std::pin::Pin;
use std::sync::Arc;

type BoxedBatchStream<T> = Pin<Box<dyn Stream<Item = StreamItem<Vec<T>>>>>;

struct WindowState<T, Ts> {
    buffer: Vec<T>,
    window_start: Option<Ts>,
}

fn window_by_impl<S, T, Ts>(
    stream: S,
    interval: Ts,
    include_partial: bool,
    mut timestamp: impl FnMut(&T) -> Ts + 'static,
) -> FluxionStream<BoxedBatchStream<T>>
where
    S: Stream<Item = StreamItem<T>> + 'static,
    T: 'static,
    Ts: Ord + Copy + std::ops::Add<Output = Ts> + 'static,
{
    let state = Arc::new(Mutex::new(WindowState::<T, Ts> {
        buffer: Vec::new(),
        window_start: None,
    }));
    let main_state = state.clone();

    let main_stream = stream.filter_map(move |item| {
        let emitted = match item {
            StreamItem::Value(v) => {
                let ts = timestamp(&v);
                let mut guard = main_state.lock();
                match guard.window_start {
                    None => {
                        guard.window_start = Some(ts);
                        guard.buffer.push(v);
                        None
                    }
                    Some(start) if ts <= start + interval => {
                        guard.buffer.push(v);
                        None
                    }
                    Some(_) => {
                        let flushed = take(&mut guard.buffer);
                        guard.window_start = Some(ts);
                        guard.buffer.push(v);
                        if flushed.is_empty() {
                            None
                        } else {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(count = flushed.len(), "flushing closed window");
                            Some(StreamItem::Value(flushed))
                        }
                    }
                }
            }
            StreamItem::Error(e) => Some(StreamItem::Error(e)),
        };
        ready(emitted)
    });

    let flush_stream = futures::stream::once(async move {
        let mut guard = state.lock();
        if include_partial && !guard.buffer.is_empty() {
            let remainder = take(&mut guard.buffer);
            #[cfg(feature = "tracing")]
            tracing::debug!(count = remainder.len(), "flushing partial window on exhaustion");
            Some(StreamItem::Value(remainder))
        } else {
            None
        }
    })
    .filter_map(ready);

    FluxionStream::new(Box::pin(main_stream.chain(flush_stream)) as BoxedBatchStream<T>)
}

/// Extension trait providing the [`window`](WindowExt::window) and
/// [`window_by`](WindowExt::window_by) tumbling-window operators.
pub trait WindowExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Tumbling window keyed by [`HasTimestamp::timestamp`]. Opens a window
    /// at the first element's timestamp `t0`; elements with timestamp
    /// `<= t0 + interval` join the current batch; the first element past
    /// that bound flushes the batch and opens a new window at its own
    /// timestamp. On exhaustion, an open non-empty batch is emitted only if
    /// `include_partial`.
    fn window(
        self,
        interval: T::Timestamp,
        include_partial: bool,
    ) -> FluxionStream<BoxedBatchStream<T>>
    where
        Self: 'static,
        T: HasTimestamp + 'static,
        T::Timestamp: std::ops::Add<Output = T::Timestamp>,
    {
        window_by_impl(self, interval, include_partial, |v: &T| v.timestamp())
    }

    /// Like [`window`](WindowExt::window), with an explicit timestamp
    /// extractor in place of [`HasTimestamp`].
    fn window_by<Ts>(
        self,
        interval: Ts,
        include_partial: bool,
        timestamp: impl FnMut(&T) -> Ts + 'static,
    ) -> FluxionStream<BoxedBatchStream<T>>
    where
        Self: 'static,
        T: 'static,
        Ts: Ord + Copy + std::ops::Add<Output = Ts> + 'static,
    {
        window_by_impl(self, interval, include_partial, timestamp)
    }
}

impl<S, T> WindowExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn window_by_groups_elements_within_the_interval() {
        let source = futures::stream::iter(
            vec![0, 1, 2, 10, 11, 25]
                .into_iter()
                .map(StreamItem::Value),
        );
        let out: Vec<_> = source
            .window_by(5, true, |x: &i32| *x)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![vec![0, 1, 2], vec![10, 11], vec![25]]);
    }

    #[tokio::test]
    async fn window_by_discards_a_trailing_partial_window_when_not_included() {
        let source = futures::stream::iter(vec![0, 1, 10].into_iter().map(StreamItem::Value));
        let out: Vec<_> = source
            .window_by(5, false, |x: &i32| *x)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![vec![0, 1]]);
    }

    #[tokio::test]
    async fn window_by_forwards_upstream_errors() {
        let source = futures::stream::iter(vec![
            StreamItem::Value(0),
            StreamItem::Error(fluxion_core::FluxionError::validation("boom")),
        ]);
        let out: Vec<_> = source.window_by(5, true, |x: &i32| *x).collect().await;
        assert!(out.iter().any(|i| i.is_error()));
    }
}
