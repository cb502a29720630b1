// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use fluxion_core::{FluxionError, Result, StreamItem};
use futures::future::join_all;
use futures::stream::{Stream, StreamExt};
use std::future::Future;

/// Extension trait providing the [`sink`](SinkExt::sink) terminal operator.
#[async_trait]
pub trait SinkExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Pulls upstream into a staging buffer and invokes `f` on each element.
    /// When the buffer reaches `parallel` entries, every pending invocation
    /// is awaited together, then the buffer is cleared; on exhaustion any
    /// remainder is awaited the same way. Invocation order within a batch is
    /// unspecified. An upstream error, or a callback failure, stops pulling
    /// further elements. `parallel` must be at least 1.
    async fn sink<F, Fut, E>(self, parallel: usize, f: F) -> Result<()>
    where
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = std::result::Result<(), E>> + Send,
        E: std::error::Error + Send + Sync + 'static,
        T: Send;
}

#[async_trait]
impl<S, T> SinkExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
    T: Send + 'static,
{
    async fn sink<F, Fut, E>(mut self, parallel: usize, mut f: F) -> Result<()>
    where
        F: FnMut(T) -> Fut + Send,
        Fut: Future<Output = std::result::Result<(), E>> + Send,
        E: std::error::Error + Send + Sync + 'static,
        T: Send,
    {
        if parallel < 1 {
            return Err(FluxionError::validation(format!(
                "sink parallel must be >= 1, got {parallel}"
            )));
        }

        let mut batch = Vec::with_capacity(parallel);
        while let Some(item) = self.next().await {
            match item {
                StreamItem::Error(e) => return Err(e),
                StreamItem::Value(v) => {
                    batch.push(f(v));
                    if batch.len() == parallel {
                        gather(&mut batch).await?;
                    }
                }
            }
        }
        if !batch.is_empty() {
            gather(&mut batch).await?;
        }
        Ok(())
    }
}

async fn gather<Fut, E>(batch: &mut Vec<Fut>) -> Result<()>
where
    Fut: Future<Output = std::result::Result<(), E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(count = batch.len(), "Gathering");

    let results = join_all(batch.drain(..)).await;
    let mut errors: Vec<FluxionError> = results
        .into_iter()
        .filter_map(|r| r.err())
        .map(FluxionError::callback_failure)
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(FluxionError::multiple(errors)),
    }
}
