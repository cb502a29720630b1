// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{FluxionError, StreamItem};
use fluxion_stream::FluxionStream;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// A push-capable test source: send values or errors from test code, consume
/// the other end as an ordinary fluxion stream.
pub struct TestChannel<T> {
    sender: UnboundedSender<StreamItem<T>>,
}

impl<T> TestChannel<T> {
    /// Creates a new channel, returning the pushable handle and the stream
    /// side wrapped ready for use with any fluxion operator.
    pub fn new() -> (Self, FluxionStream<UnboundedReceiverStream<StreamItem<T>>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self { sender },
            FluxionStream::new(UnboundedReceiverStream::new(receiver)),
        )
    }

    /// Pushes a value onto the stream.
    ///
    /// # Panics
    ///
    /// Panics if the stream side has been dropped.
    pub fn push(&self, value: T) {
        self.sender
            .send(StreamItem::Value(value))
            .expect("test channel receiver dropped");
    }

    /// Pushes a terminal error onto the stream.
    ///
    /// # Panics
    ///
    /// Panics if the stream side has been dropped.
    pub fn push_error(&self, error: FluxionError) {
        self.sender
            .send(StreamItem::Error(error))
            .expect("test channel receiver dropped");
    }

    /// Closes the channel, causing the stream side to yield `None` once
    /// already-pushed items are drained.
    pub fn close(self) {
        drop(self.sender);
    }
}
