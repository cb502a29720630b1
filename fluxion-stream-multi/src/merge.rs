// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use fluxion_stream::FluxionStream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

enum Event<T> {
    Item(StreamItem<T>),
    Done,
}

fn spawn_pump<S, T>(mut source: S, tx: mpsc::UnboundedSender<Event<T>>) -> JoinHandle<()>
where
    S: Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match source.next().await {
                Some(item @ StreamItem::Value(_)) => {
                    if tx.send(Event::Item(item)).is_err() {
                        return;
                    }
                }
                Some(item @ StreamItem::Error(_)) => {
                    let _ = tx.send(Event::Item(item));
                    let _ = tx.send(Event::Done);
                    return;
                }
                None => {
                    let _ = tx.send(Event::Done);
                    return;
                }
            }
        }
    })
}

/// Extension trait providing the [`merge`](MergeExt::merge) operator.
pub trait MergeExt<T>: Stream<Item = StreamItem<T>> + Send + Unpin + 'static
where
    T: Send + 'static,
{
    /// Consumes this stream and `others` concurrently, emitting elements in
    /// arrival order. Relative order within a single source is preserved;
    /// cross-source order reflects cooperative scheduling.
    ///
    /// On any source's failure, every pumping task is aborted and awaited to
    /// completion before the error is re-raised to the consumer. With no
    /// extra sources, this degenerates to forwarding `self` unchanged.
    fn merge<S2>(self, others: Vec<S2>) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        S2: Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
        Self: Sized,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event<T>>();
        let mut handles = vec![spawn_pump(self, tx.clone())];
        for source in others {
            handles.push(spawn_pump(source, tx.clone()));
        }
        drop(tx);

        let total = handles.len();
        FluxionStream::new(Box::pin(async_stream::stream! {
            let mut handles = handles;
            let mut done_count = 0usize;
            while done_count < total {
                match rx.recv().await {
                    Some(Event::Item(StreamItem::Error(e))) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(pending = handles.len(), "aborting sibling merge tasks after a source failure");
                        for h in &handles {
                            h.abort();
                        }
                        for h in handles.drain(..) {
                            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
                            if let Err(join_err) = h.await {
                                #[cfg(feature = "tracing")]
                                if !join_err.is_cancelled() {
                                    tracing::warn!(%join_err, "sibling merge task failed to cancel cleanly");
                                }
                            }
                        }
                        yield StreamItem::Error(e);
                        return;
                    }
                    Some(Event::Item(item)) => yield item,
                    Some(Event::Done) => done_count += 1,
                    None => break,
                }
            }
            for h in handles.drain(..) {
                let _ = h.await;
            }
        }) as Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>)
    }
}

impl<S, T> MergeExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
    T: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxion_core::FluxionError;

    fn values(items: Vec<i32>) -> impl Stream<Item = StreamItem<i32>> + Send + Unpin + 'static {
        futures::stream::iter(items.into_iter().map(StreamItem::Value))
    }

    #[tokio::test]
    async fn merge_with_no_extra_sources_forwards_self() {
        let out: Vec<_> = values(vec![1, 2, 3])
            .merge(Vec::<futures::stream::Iter<std::vec::IntoIter<StreamItem<i32>>>>::new())
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn merge_emits_every_element_from_every_source() {
        let out: Vec<_> = values(vec![1, 2])
            .merge(vec![values(vec![3, 4]), values(vec![5])])
            .collect::<Vec<_>>()
            .await;
        let mut values: Vec<_> = out.into_iter().map(|i| i.ok().unwrap()).collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn merge_propagates_a_source_failure() {
        let failing = futures::stream::iter(vec![StreamItem::<i32>::Error(
            FluxionError::validation("boom"),
        )]);
        let out: Vec<_> = values(vec![1])
            .merge(vec![failing])
            .collect::<Vec<_>>()
            .await;
        assert!(out.iter().any(|i| i.is_error()));
    }
}
