// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use fluxion_core::{Result, StreamItem};
use futures::stream::{Stream, StreamExt};

/// Extension trait providing the [`to_list`](ToListExt::to_list) terminal operator.
#[async_trait]
pub trait ToListExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Drains the stream into an ordered `Vec`, stopping at and returning the
    /// first error encountered.
    async fn to_list(self) -> Result<Vec<T>>
    where
        T: Send;
}

#[async_trait]
impl<S, T> ToListExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
    T: Send + 'static,
{
    async fn to_list(mut self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        while let Some(item) = self.next().await {
            match item {
                StreamItem::Value(v) => out.push(v),
                StreamItem::Error(e) => return Err(e),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxion_core::FluxionError;

    #[tokio::test]
    async fn to_list_drains_every_value_in_order() {
        let source = futures::stream::iter(vec![1, 2, 3].into_iter().map(StreamItem::Value));
        let out = source.to_list().await.unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn to_list_returns_the_first_error_and_drops_later_values() {
        let source = futures::stream::iter(vec![
            StreamItem::Value(1),
            StreamItem::Error(FluxionError::validation("boom")),
            StreamItem::Value(2),
        ]);
        let err = source.to_list().await.unwrap_err();
        assert!(matches!(err, FluxionError::ValidationFailure { .. }));
    }
}
