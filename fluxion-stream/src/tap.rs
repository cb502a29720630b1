// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::{FluxionError, StreamItem};
use futures::future::{self, Either, Future};
use futures::{Stream, StreamExt};

/// Extension trait providing the [`tap`](TapExt::tap) and [`tap_async`](TapExt::tap_async)
/// operators.
///
/// `tap` is the one elementwise operator the spec calls out as error-propagating: a
/// failing callback terminates the stream rather than being swallowed.
pub trait TapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Invokes `cb(&x)` for its side effect, then emits `x` unchanged.
    fn tap(self, mut cb: impl FnMut(&T)) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        Self: 'static,
        T: 'static,
    {
        FluxionStream::new(StreamExt::map(self, move |item| {
            if let StreamItem::Value(v) = &item {
                cb(v);
            }
            item
        }))
    }

    /// Like [`tap`](TapExt::tap), but `cb` returns a future resolving to `Result<(), E>`.
    /// A returned `Err` becomes a [`FluxionError::CallbackFailure`] that terminates the
    /// stream, matching the spec's "errors from cb propagate" contract.
    fn tap_async<E, Fut>(
        self,
        mut cb: impl FnMut(&T) -> Fut,
    ) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        E: std::error::Error + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>>,
        Self: 'static,
        T: 'static,
    {
        // `v` has to outlive the awaited call to `cb(&v)` so it can be re-emitted once
        // the callback resolves; a single `async move` block owning both keeps the
        // borrow and the value in the same pinned state instead of splitting them
        // across a synchronous `cb(&v)` call and a later `.map()` closure, which the
        // borrow checker would reject as moving `v` while still borrowed.
        FluxionStream::new(self.then(move |item| {
            let cb = &mut cb;
            async move {
                match item {
                    StreamItem::Value(v) => match cb(&v).await {
                        Ok(()) => StreamItem::Value(v),
                        Err(e) => StreamItem::Error(FluxionError::callback_failure(e)),
                    },
                    StreamItem::Error(e) => StreamItem::Error(e),
                }
            }
        }))
    }
}

impl<S, T> TapExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::values;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, thiserror::Error)]
    #[error("tap failed")]
    struct TapError;

    #[tokio::test]
    async fn tap_observes_every_value_then_emits_unchanged() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let out: Vec<_> = values(vec![1, 2, 3])
            .tap(move |x| seen_clone.lock().unwrap().push(*x))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|i| i.ok().unwrap())
            .collect();
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn tap_async_failure_terminates_with_callback_failure() {
        let out: Vec<_> = values(vec![1, 2])
            .tap_async(|x| {
                let fail = *x == 2;
                async move {
                    if fail {
                        Err(TapError)
                    } else {
                        Ok(())
                    }
                }
            })
            .collect::<Vec<_>>()
            .await;
        assert!(out[0].is_value());
        assert!(out[1].is_error());
    }
}
