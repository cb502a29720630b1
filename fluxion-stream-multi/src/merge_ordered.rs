// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use fluxion_stream::FluxionStream;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// K-way merge of streams that are each individually ordered by `key`.
///
/// Grounded on the teacher's buffered-slot-per-source poll loop: each source
/// keeps at most one pending item buffered; every poll re-fills empty slots,
/// then emits the globally smallest buffered key. Because a slot can only
/// hold one pending item at a time, re-filling it only after the previous
/// item is emitted already gives FIFO order for equal keys from the same
/// source, so the three-way tie-break (key, then source index, then
/// insertion order) falls out of a single ascending scan over slot indices.
///
/// A minimum is only ever selected once every non-exhausted source has
/// reported in for the current poll (filled its slot or been marked
/// exhausted): a source still `Poll::Pending` this round might produce a key
/// smaller than anything currently buffered, so picking a "minimum" while one
/// is outstanding could emit out of order.
struct MergeOrdered<T, K> {
    sources: Vec<Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>>,
    buffered: Vec<Option<(K, T)>>,
    exhausted: Vec<bool>,
    key: Box<dyn FnMut(&T) -> K + Send>,
    errored: bool,
}

impl<T, K> Stream for MergeOrdered<T, K>
where
    K: Ord,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.errored {
            return Poll::Ready(None);
        }

        let mut any_pending = false;
        for i in 0..this.sources.len() {
            if this.exhausted[i] || this.buffered[i].is_some() {
                continue;
            }
            match this.sources[i].as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    this.errored = true;
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(Some(StreamItem::Value(v))) => {
                    let k = (this.key)(&v);
                    this.buffered[i] = Some((k, v));
                }
                Poll::Ready(None) => {
                    this.exhausted[i] = true;
                }
                Poll::Pending => any_pending = true,
            }
        }

        // A source that is still pending might yet produce a smaller key
        // than anything buffered so far, so no minimum can be chosen until
        // every non-exhausted source has reported in this poll.
        if any_pending {
            return Poll::Pending;
        }

        let mut min_idx = None;
        for (i, slot) in this.buffered.iter().enumerate() {
            if let Some((k, _)) = slot {
                let better = match min_idx {
                    None => true,
                    Some(m) => {
                        let (mk, _) = this.buffered[m].as_ref().unwrap();
                        k < mk
                    }
                };
                if better {
                    min_idx = Some(i);
                }
            }
        }

        if let Some(idx) = min_idx {
            let (_, v) = this.buffered[idx].take().unwrap();
            Poll::Ready(Some(StreamItem::Value(v)))
        } else {
            Poll::Ready(None)
        }
    }
}

/// Extension trait providing [`merge_ordered`](MergeOrderedExt::merge_ordered) and
/// [`merge_ordered_by`](MergeOrderedExt::merge_ordered_by).
pub trait MergeOrderedExt<T>: Stream<Item = StreamItem<T>> + Send + 'static
where
    T: Send + 'static,
{
    /// Merges `self` (source index 0) and `others` (in argument order) by
    /// `T`'s own ordering.
    fn merge_ordered<S2>(
        self,
        others: Vec<S2>,
    ) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        S2: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Ord + Clone,
        Self: Sized,
    {
        self.merge_ordered_by(others, |x: &T| x.clone())
    }

    /// Like [`merge_ordered`](MergeOrderedExt::merge_ordered), with an
    /// explicit key extractor in place of `T`'s own ordering.
    fn merge_ordered_by<S2, K>(
        self,
        others: Vec<S2>,
        key: impl FnMut(&T) -> K + Send + 'static,
    ) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        S2: Stream<Item = StreamItem<T>> + Send + 'static,
        K: Ord,
        Self: Sized,
    {
        let mut sources: Vec<Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>> =
            vec![Box::pin(self)];
        for source in others {
            sources.push(Box::pin(source));
        }
        let count = sources.len();
        FluxionStream::new(MergeOrdered {
            sources,
            buffered: (0..count).map(|_| None).collect(),
            exhausted: (0..count).map(|_| false).collect(),
            key: Box::new(key),
            errored: false,
        })
    }
}

impl<S, T> MergeOrderedExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn values(items: Vec<i32>) -> impl Stream<Item = StreamItem<i32>> + Send + 'static {
        futures::stream::iter(items.into_iter().map(StreamItem::Value))
    }

    #[tokio::test]
    async fn merge_ordered_interleaves_by_key() {
        let out: Vec<_> = values(vec![1, 3, 5])
            .merge_ordered(vec![values(vec![2, 4, 6])])
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn merge_ordered_by_breaks_ties_by_source_index() {
        let out: Vec<_> = values(vec![(1, "a"), (2, "c")])
            .merge_ordered_by(vec![values(vec![(1, "b")])], |(k, _): &(i32, &str)| *k)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![(1, "a"), (1, "b"), (2, "c")]);
    }

    #[tokio::test]
    async fn merge_ordered_waits_for_pending_sources_before_choosing_a_minimum() {
        use std::cell::Cell;

        // Pending on the first poll (re-scheduling itself), then ready with a
        // key smaller than anything the other, already-ready source holds.
        let polled = Cell::new(0);
        let delayed = futures::stream::poll_fn(move |cx| {
            let n = polled.get();
            polled.set(n + 1);
            match n {
                0 => {
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
                1 => Poll::Ready(Some(StreamItem::Value(5))),
                _ => Poll::Ready(None),
            }
        });

        let out: Vec<_> = values(vec![10, 20])
            .merge_ordered(vec![delayed])
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![5, 10, 20]);
    }

    #[tokio::test]
    async fn merge_ordered_propagates_errors() {
        let failing = futures::stream::iter(vec![StreamItem::<i32>::Error(
            fluxion_core::FluxionError::validation("boom"),
        )]);
        let out: Vec<_> = values(vec![1, 2])
            .merge_ordered(vec![failing])
            .collect::<Vec<_>>()
            .await;
        assert!(out.iter().any(|i| i.is_error()));
    }
}
