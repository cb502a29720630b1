// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::StreamItem;
use futures::{Stream, StreamExt};

/// Extension trait providing the [`skip`](SkipExt::skip) operator.
pub trait SkipExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Discards the first `n` items, then forwards the rest unchanged.
    ///
    /// Errors count toward the skip total, matching [`TakeExt::take`].
    fn skip(self, n: i64) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        Self: 'static,
    {
        FluxionStream::new(StreamExt::skip(self, n.max(0) as usize))
    }
}

impl<S, T> SkipExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::values;
    use crate::take::TakeExt;
    use crate::tap::TapExt;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn skip_discards_the_first_n() {
        let out: Vec<_> = values(vec![1, 2, 3, 4, 5])
            .skip(2)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn skip_then_take_pulls_exactly_what_it_needs() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let out: Vec<_> = values(vec![1, 2, 3, 4, 5])
            .tap(move |x| seen_clone.lock().unwrap().push(*x))
            .skip(1)
            .take(3)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![2, 3, 4]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
    }
}
