// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{FluxionError, StreamItem};
use fluxion_stream::FluxionStream;
use futures::future::ready;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use std::mem::take;
use std::pin::Pin;
use std::sync::Arc;

type BoxedBatchStream<T> = Pin<Box<dyn Stream<Item = StreamItem<Vec<T>>>>>;

/// Extension trait providing the [`chunk`](ChunkExt::chunk) operator.
pub trait ChunkExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Accumulates up to `size` elements into a batch. When a new element
    /// arrives and the current batch already holds `size` elements, the
    /// current batch is emitted (as an independent snapshot) and a fresh
    /// batch is started containing the new element. A remaining non-empty
    /// batch is emitted on upstream exhaustion. `size` must be at least 1.
    fn chunk(self, size: usize) -> FluxionStream<BoxedBatchStream<T>>
    where
        Self: 'static,
        T: 'static,
    {
        if size < 1 {
            let error = FluxionError::validation(format!("chunk size must be >= 1, got {size}"));
            return FluxionStream::new(Box::pin(futures::stream::once(async move {
                StreamItem::Error(error)
            })) as BoxedBatchStream<T>);
        }

        let buffer = Arc::new(Mutex::new(Vec::<T>::with_capacity(size)));
        let main_buffer = buffer.clone();

        let main_stream = self.filter_map(move |item| {
            let emitted = match item {
                StreamItem::Value(v) => {
                    let mut guard = main_buffer.lock();
                    if guard.len() >= size {
                        let full = take(&mut *guard);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(count = full.len(), "flushing full chunk");
                        guard.push(v);
                        Some(StreamItem::Value(full))
                    } else {
                        guard.push(v);
                        None
                    }
                }
                StreamItem::Error(e) => Some(StreamItem::Error(e)),
            };
            ready(emitted)
        });

        let flush_stream = futures::stream::once(async move {
            let mut guard = buffer.lock();
            if guard.is_empty() {
                None
            } else {
                let remainder = take(&mut *guard);
                #[cfg(feature = "tracing")]
                tracing::debug!(count = remainder.len(), "flushing remainder chunk on exhaustion");
                Some(StreamItem::Value(remainder))
            }
        })
        .filter_map(ready);

        FluxionStream::new(Box::pin(main_stream.chain(flush_stream)) as BoxedBatchStream<T>)
    }
}

impl<S, T> ChunkExt<T> for S where S: Stream<Item = StreamItem<T>> {}
