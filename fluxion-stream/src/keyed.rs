// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::{FluxionError, StreamItem};
use futures::{Stream, StreamExt};

/// Extension trait providing the [`keyed`](KeyedExt::keyed) operator.
pub trait KeyedExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `(extract(&x), x)` for every upstream value.
    ///
    /// Rust has no dynamic field lookup by string, so `extract` stands in for
    /// the original's `element[field_name]` indexing; `field_name` is kept
    /// only to name the field in the error raised when `extract` returns
    /// `None`.
    fn keyed<K>(
        self,
        field_name: &'static str,
        mut extract: impl FnMut(&T) -> Option<K>,
    ) -> FluxionStream<impl Stream<Item = StreamItem<(K, T)>>>
    where
        Self: 'static,
        T: 'static,
    {
        FluxionStream::new(StreamExt::map(self, move |item| match item {
            StreamItem::Value(v) => match extract(&v) {
                Some(key) => StreamItem::Value((key, v)),
                None => StreamItem::Error(FluxionError::validation(format!(
                    "keyed: field `{field_name}` is absent"
                ))),
            },
            StreamItem::Error(e) => StreamItem::Error(e),
        }))
    }
}

impl<S, T> KeyedExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::values;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: Option<u32>,
        name: &'static str,
    }

    #[tokio::test]
    async fn keyed_pairs_extracted_key_with_the_original_element() {
        let records = vec![
            Record { id: Some(1), name: "a" },
            Record { id: Some(2), name: "b" },
        ];
        let out: Vec<_> = values(records)
            .keyed("id", |r| r.id)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out[0].0, 1);
        assert_eq!(out[1].1.name, "b");
    }

    #[tokio::test]
    async fn keyed_fails_when_the_key_is_absent() {
        let records = vec![Record { id: None, name: "a" }];
        let out: Vec<_> = values(records).keyed("id", |r| r.id).collect().await;
        assert!(out[0].is_error());
    }
}
