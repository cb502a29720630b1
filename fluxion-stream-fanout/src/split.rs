// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{FluxionError, StreamItem};
use fluxion_stream::FluxionStream;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

type BoxedSource<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>;

struct SplitState<T> {
    source: BoxedSource<T>,
    buffers: Vec<VecDeque<T>>,
    terminated: bool,
    error: Option<FluxionError>,
    delivered_error: Vec<bool>,
}

/// Shared state behind a fan-out `split`/`split_into`: one upstream source,
/// one FIFO per branch, and an advance lock that both gates re-polling the
/// source and makes the check-then-maybe-advance sequence atomic (holding a
/// `tokio::sync::Mutex`, not a sync one, across the source's own `.await`).
///
/// Memory use is O(the gap between the fastest and slowest branch): a
/// branch that never polls keeps its queued elements alive forever. This is
/// an intentional, documented tradeoff of on-demand-pull fan-out, not a bug.
struct SplitShared<T> {
    state: Mutex<SplitState<T>>,
}

impl<T: Clone + Send + 'static> SplitShared<T> {
    fn new<S>(source: S, branches: usize) -> Arc<Self>
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Arc::new(Self {
            state: Mutex::new(SplitState {
                source: Box::pin(source),
                buffers: (0..branches).map(|_| VecDeque::new()).collect(),
                terminated: false,
                error: None,
                delivered_error: vec![false; branches],
            }),
        })
    }

    async fn next(self: &Arc<Self>, branch: usize) -> Option<StreamItem<T>> {
        let mut guard = self.state.lock().await;
        loop {
            if let Some(v) = guard.buffers[branch].pop_front() {
                return Some(StreamItem::Value(v));
            }
            if guard.terminated {
                if let Some(e) = guard.error.clone() {
                    if !guard.delivered_error[branch] {
                        guard.delivered_error[branch] = true;
                        return Some(StreamItem::Error(e));
                    }
                }
                return None;
            }
            match guard.source.as_mut().next().await {
                Some(StreamItem::Value(v)) => {
                    for buffer in guard.buffers.iter_mut() {
                        buffer.push_back(v.clone());
                    }
                    #[cfg(feature = "tracing")]
                    {
                        let max_len = guard.buffers.iter().map(VecDeque::len).max().unwrap_or(0);
                        tracing::debug!(max_len, "split buffer grew after pulling from upstream");
                    }
                }
                Some(StreamItem::Error(e)) => {
                    guard.error = Some(e);
                    guard.terminated = true;
                }
                None => {
                    guard.terminated = true;
                }
            }
        }
    }
}

fn branch_stream<T>(
    shared: Arc<SplitShared<T>>,
    branch: usize,
) -> impl Stream<Item = StreamItem<T>>
where
    T: Clone + Send + 'static,
{
    futures::stream::unfold(shared, move |shared| async move {
        let item = shared.next(branch).await;
        item.map(|item| (item, shared))
    })
}

/// Extension trait providing the [`split`](SplitExt::split) and
/// [`split_into`](SplitExt::split_into) operators.
pub trait SplitExt<T>: Stream<Item = StreamItem<T>> + Send + Sized + 'static
where
    T: Clone + Send + 'static,
{
    /// The single-branch convenience form: forwards `self` unchanged. Rust
    /// cannot clone an arbitrary stream's internal cursor, so (unlike a
    /// fast-path `copy` of the source iterator) this is always a plain
    /// forward — single-consumer semantics are unchanged either way.
    fn split(self) -> FluxionStream<impl Stream<Item = StreamItem<T>>> {
        FluxionStream::new(self)
    }

    /// Produces `branches` independent streams, each observing the full
    /// upstream sequence via on-demand pulling with shared buffering.
    /// `branches` must be at least 2.
    fn split_into(
        self,
        branches: usize,
    ) -> Vec<FluxionStream<Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>>> {
        if branches < 2 {
            let error = FluxionError::validation(format!(
                "split_into requires at least 2 branches, got {branches}"
            ));
            return vec![FluxionStream::new(Box::pin(futures::stream::once(
                async move { StreamItem::Error(error) },
            ))
                as Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>)];
        }

        let shared = SplitShared::new(self, branches);
        (0..branches)
            .map(|branch| {
                FluxionStream::new(
                    Box::pin(branch_stream(shared.clone(), branch))
                        as Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>,
                )
            })
            .collect()
    }
}

impl<S, T> SplitExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
}
