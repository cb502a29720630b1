// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use futures::{Stream, StreamExt};
use indexmap::IndexMap;
use pin_project::pin_project;
use std::hash::Hash;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A stream of batches (`Vec<T>`), produced by `chunk`, `window`, or
/// `sliding_window`. Carries the one operator, [`group_by`](AggregatedStream::group_by),
/// that is only meaningful once values have already been grouped into batches.
#[pin_project]
pub struct AggregatedStream<S> {
    #[pin]
    inner: S,
}

impl<S> AggregatedStream<S> {
    pub const fn new(stream: S) -> Self {
        Self { inner: stream }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Stream for AggregatedStream<S>
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

/// Extension trait providing [`group_by`](GroupByExt::group_by), implemented for
/// any stream of batches — in practice the output of `chunk`, `window`, or
/// `sliding_window`.
pub trait GroupByExt<T>: Stream<Item = StreamItem<Vec<T>>> + Sized {
    /// For each incoming batch, builds a mapping from `key(&element)` to the
    /// ordered list of elements sharing that key, preserving first-seen key
    /// order and in-batch element order, and emits the mapping as one element.
    fn group_by<K>(
        self,
        mut key: impl FnMut(&T) -> K,
    ) -> AggregatedStream<impl Stream<Item = StreamItem<IndexMap<K, Vec<T>>>>>
    where
        Self: 'static,
        T: 'static,
        K: Eq + Hash + 'static,
    {
        AggregatedStream::new(StreamExt::map(self, move |item| match item {
            StreamItem::Value(batch) => {
                let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
                for element in batch {
                    let k = key(&element);
                    groups.entry(k).or_default().push(element);
                }
                StreamItem::Value(groups)
            }
            StreamItem::Error(e) => StreamItem::Error(e),
        }))
    }

    /// Alias for [`group_by`](GroupByExt::group_by), kept under its camelCase
    /// spelling for cross-ecosystem compatibility.
    #[allow(non_snake_case)]
    fn groupBy<K>(
        self,
        key: impl FnMut(&T) -> K,
    ) -> AggregatedStream<impl Stream<Item = StreamItem<IndexMap<K, Vec<T>>>>>
    where
        Self: 'static,
        T: 'static,
        K: Eq + Hash + 'static,
    {
        self.group_by(key)
    }
}

impl<S, T> GroupByExt<T> for S where S: Stream<Item = StreamItem<Vec<T>>> {}
