// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionStream;
use fluxion_core::StreamItem;
use futures::{Stream, StreamExt};

/// Extension trait providing the [`take`](TakeExt::take) operator.
pub trait TakeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits only the first `n` items, then completes without pulling further
    /// upstream elements. `n <= 0` emits nothing.
    ///
    /// Errors count as items for the purpose of the limit: taking 3 from
    /// `[Value, Error, Value, Value, Value]` yields `[Value, Error, Value]`.
    fn take(self, n: i64) -> FluxionStream<impl Stream<Item = StreamItem<T>>>
    where
        Self: 'static,
    {
        FluxionStream::new(StreamExt::take(self, n.max(0) as usize))
    }
}

impl<S, T> TakeExt<T> for S where S: Stream<Item = StreamItem<T>> {}
