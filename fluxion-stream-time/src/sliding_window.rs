// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{FluxionError, HasTimestamp, StreamItem};
use fluxion_stream::FluxionStream;
use parking_lot::Mutex;
use std::ops::{Add, Sub};
use std::pin::Pin;
use std::sync::Arc;

use futures::future::ready;
use futures::{Stream, StreamExt};

type BoxedBatchStream<T> = Pin<Box<dyn Stream<Item = StreamItem<Vec<T>>>>>;

/// Open windows in insertion order, which is also age order (oldest first):
/// windows are only ever appended at the tail, never inserted out of order.
///
/// `last_start` is tracked independently of `windows` because `windows` can go
/// empty (every open window can close on the same element, whenever
/// `size <= advance`) without resetting the advance-aligned boundary: the next
/// window must still open at `last_start + advance`, not at the next
/// timestamp that happens to arrive.
struct SlidingState<T, Ts> {
    windows: Vec<(Ts, Vec<T>)>,
    last_start: Option<Ts>,
}

fn advance_and_append<T, Ts>(state: &mut SlidingState<T, Ts>, t: Ts, v: T, size: Ts, advance: Ts) -> Vec<Vec<T>>
where
    T: Clone,
    Ts: Ord + Copy + Add<Output = Ts> + Sub<Output = Ts>,
{
    match state.last_start {
        None => {
            state.last_start = Some(t);
            state.windows.push((t, Vec::new()));
        }
        Some(mut last_start) => {
            while t >= last_start + advance {
                last_start = last_start + advance;
                state.windows.push((last_start, Vec::new()));
            }
            state.last_start = Some(last_start);
        }
    }

    let mut emitted = Vec::new();
    let mut i = 0;
    while i < state.windows.len() {
        let ts_w = state.windows[i].0;
        if t - ts_w >= size {
            let (_, batch) = state.windows.remove(i);
            if !batch.is_empty() {
                #[cfg(feature = "tracing")]
                tracing::debug!(count = batch.len(), "flushing closed sliding window");
                emitted.push(batch);
            }
        } else {
            state.windows[i].1.push(v.clone());
            i += 1;
        }
    }
    emitted
}

fn sliding_window_by_impl<S, T, Ts>(
    stream: S,
    size: Ts,
    advance: Ts,
    include_partial: bool,
    mut timestamp: impl FnMut(&T) -> Option<Ts> + 'static,
) -> FluxionStream<BoxedBatchStream<T>>
where
    S: Stream<Item = StreamItem<T>> + 'static,
    T: Clone + 'static,
    Ts: Ord + Copy + Add<Output = Ts> + Sub<Output = Ts> + 'static,
{
    let state = Arc::new(Mutex::new(SlidingState::<T, Ts> {
        windows: Vec::new(),
        last_start: None,
    }));
    let main_state = state.clone();

    let main_stream = stream.flat_map(move |item| {
        let out: Vec<StreamItem<Vec<T>>> = match item {
            StreamItem::Value(v) => match timestamp(&v) {
                None => Vec::new(),
                Some(t) => {
                    let mut guard = main_state.lock();
                    advance_and_append(&mut guard, t, v, size, advance)
                        .into_iter()
                        .map(StreamItem::Value)
                        .collect()
                }
            },
            StreamItem::Error(e) => vec![StreamItem::Error(e)],
        };
        futures::stream::iter(out)
    });

    let flush_stream = futures::stream::once(async move {
        let mut guard = state.lock();
        if include_partial {
            let remaining: Vec<_> = std::mem::take(&mut guard.windows)
                .into_iter()
                .filter(|(_, batch)| !batch.is_empty())
                .map(|(_, batch)| batch)
                .collect();
            #[cfg(feature = "tracing")]
            if !remaining.is_empty() {
                tracing::debug!(
                    count = remaining.len(),
                    "flushing open sliding windows on exhaustion"
                );
            }
            remaining.into_iter().map(StreamItem::Value).collect()
        } else {
            Vec::new()
        }
    })
    .flat_map(futures::stream::iter);

    FluxionStream::new(Box::pin(main_stream.chain(flush_stream)) as BoxedBatchStream<T>)
}

/// Extension trait providing the [`sliding_window`](SlidingWindowExt::sliding_window) and
/// [`sliding_window_by`](SlidingWindowExt::sliding_window_by) operators.
pub trait SlidingWindowExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Overlapping windows of length `size`, stepped every `advance`, keyed
    /// by [`HasTimestamp::timestamp`]. `size` and `advance` must both be
    /// positive. An element with no timestamp is skipped and neither opens
    /// nor advances a window — not applicable here since `HasTimestamp`
    /// always yields a timestamp; see [`sliding_window_by`] for the
    /// null-skipping form.
    ///
    /// [`sliding_window_by`]: SlidingWindowExt::sliding_window_by
    fn sliding_window(
        self,
        size: T::Timestamp,
        advance: T::Timestamp,
        include_partial: bool,
    ) -> FluxionStream<BoxedBatchStream<T>>
    where
        Self: 'static,
        T: HasTimestamp + Clone + 'static,
        T::Timestamp: Add<Output = T::Timestamp> + Sub<Output = T::Timestamp> + Default,
    {
        if !positive(size) || !positive(advance) {
            return invalid(size, advance);
        }
        sliding_window_by_impl(self, size, advance, include_partial, |v: &T| {
            Some(v.timestamp())
        })
    }

    /// Like [`sliding_window`](SlidingWindowExt::sliding_window), with an
    /// explicit timestamp extractor. An extractor returning `None` skips the
    /// element: it neither opens nor advances a window.
    fn sliding_window_by<Ts>(
        self,
        size: Ts,
        advance: Ts,
        include_partial: bool,
        timestamp: impl FnMut(&T) -> Option<Ts> + 'static,
    ) -> FluxionStream<BoxedBatchStream<T>>
    where
        Self: 'static,
        T: Clone + 'static,
        Ts: Ord + Copy + Add<Output = Ts> + Sub<Output = Ts> + Default + std::fmt::Debug + 'static,
    {
        if !positive(size) || !positive(advance) {
            return invalid(size, advance);
        }
        sliding_window_by_impl(self, size, advance, include_partial, timestamp)
    }
}

fn positive<Ts: Ord + Default>(value: Ts) -> bool {
    value > Ts::default()
}

fn invalid<T: 'static>(size: impl std::fmt::Debug, advance: impl std::fmt::Debug) -> FluxionStream<BoxedBatchStream<T>> {
    let error = FluxionError::validation(format!(
        "sliding_window requires size > 0 and advance > 0, got size={size:?} advance={advance:?}"
    ));
    FluxionStream::new(Box::pin(futures::stream::once(async move {
        StreamItem::Error(error)
    })) as BoxedBatchStream<T>)
}

impl<S, T> SlidingWindowExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sliding_window_emits_overlapping_windows() {
        let source = futures::stream::iter(vec![0, 5, 10].into_iter().map(StreamItem::Value));
        let out: Vec<_> = source
            .sliding_window_by(10, 5, true, |x: &i32| Some(*x))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        // window@0 covers [0,5]; window@5 covers [5,10]; window@10 open at end.
        assert_eq!(out, vec![vec![0, 5], vec![5, 10], vec![10]]);
    }

    #[tokio::test]
    async fn sliding_window_skips_elements_with_no_timestamp() {
        let source = futures::stream::iter(vec![Some(0), None, Some(1)].into_iter().map(|opt| {
            StreamItem::Value(opt.unwrap_or(-1))
        }));
        let out: Vec<_> = source
            .sliding_window_by(10, 5, true, |x: &i32| if *x < 0 { None } else { Some(*x) })
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![vec![0, 1]]);
    }

    #[tokio::test]
    async fn sliding_window_steps_from_the_last_boundary_after_all_windows_close_at_once() {
        // size <= advance lets a single element close every open window, so
        // `windows` goes empty; the next window must still open at the
        // correctly advance-aligned boundary (10), not at the next raw
        // timestamp (12).
        let source = futures::stream::iter(vec![0, 1, 2, 3, 12, 14].into_iter().map(StreamItem::Value));
        let out: Vec<_> = source
            .sliding_window_by(3, 5, true, |x: &i32| Some(*x))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![vec![0, 1, 2], vec![12]]);
    }

    #[tokio::test]
    async fn sliding_window_rejects_non_positive_parameters() {
        let source = futures::stream::iter(vec![StreamItem::Value(0)]);
        let out: Vec<_> = source
            .sliding_window_by(0, 5, true, |x: &i32| Some(*x))
            .collect()
            .await;
        assert!(out[0].is_error());
    }
}
