// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionError;

/// A stream element that is either a successfully produced value or a terminal error.
///
/// Every fluxion stream has `Item = StreamItem<T>`. This is how upstream failures,
/// validation failures, and callback failures propagate through a lazily-built
/// operator pipeline without Rust panics: an operator that sees `Error` forwards it
/// unchanged, and a terminal operator turns the first `Error` it observes into a
/// `Result::Err`.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    /// A successfully produced value.
    Value(T),
    /// A terminal error. No further `Value` is expected after this on the same stream.
    Error(FluxionError),
}

impl<T> StreamItem<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, StreamItem::Value(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, StreamItem::Error(_))
    }

    /// Converts to `Option<T>`, discarding any error.
    pub fn ok(self) -> Option<T> {
        match self {
            StreamItem::Value(v) => Some(v),
            StreamItem::Error(_) => None,
        }
    }

    /// Maps the contained value, leaving an error untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StreamItem<U> {
        match self {
            StreamItem::Value(v) => StreamItem::Value(f(v)),
            StreamItem::Error(e) => StreamItem::Error(e),
        }
    }

    /// Chains a fallible transformation, leaving an existing error untouched.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> StreamItem<U>) -> StreamItem<U> {
        match self {
            StreamItem::Value(v) => f(v),
            StreamItem::Error(e) => StreamItem::Error(e),
        }
    }
}

impl<T> From<Result<T, FluxionError>> for StreamItem<T> {
    fn from(result: Result<T, FluxionError>) -> Self {
        match result {
            Ok(v) => StreamItem::Value(v),
            Err(e) => StreamItem::Error(e),
        }
    }
}

impl<T> From<StreamItem<T>> for Result<T, FluxionError> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(v) => Ok(v),
            StreamItem::Error(e) => Err(e),
        }
    }
}
