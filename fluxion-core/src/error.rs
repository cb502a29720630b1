// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the fluxion stream combinator library.
//!
//! Every fluxion stream carries [`crate::StreamItem`] as its element type, and a
//! [`FluxionError`] is how an upstream failure, a caller-violated precondition, or a
//! failing user callback is represented once it enters that element stream.

/// Root error type for all fluxion stream operations.
///
/// Wraps upstream/callback failures in `Arc` rather than `Box` so the same
/// `FluxionError` can be cloned to every branch of a [fan-out split][split]
/// without re-running or re-wrapping the original failure.
///
/// [split]: https://docs.rs/fluxion-stream-fanout
#[derive(Debug, Clone, thiserror::Error)]
pub enum FluxionError {
    /// A caller-violated precondition: split with fewer than two branches, a
    /// non-positive chunk/window size, an unknown keyed field, and similar.
    ///
    /// Validation failures are surfaced before the upstream source is touched.
    #[error("validation failure: {context}")]
    ValidationFailure {
        /// What precondition was violated.
        context: String,
    },

    /// The upstream source produced an error while advancing.
    #[error("source failure: {0}")]
    SourceFailure(#[source] std::sync::Arc<dyn std::error::Error + Send + Sync>),

    /// A user-supplied predicate, mapper, tap, or sink callback failed.
    #[error("callback failure: {0}")]
    CallbackFailure(#[source] std::sync::Arc<dyn std::error::Error + Send + Sync>),

    /// Multiple callback failures occurred within a single parallel batch.
    #[error("{count} errors occurred in a single batch")]
    MultipleErrors {
        /// Number of errors that occurred.
        count: usize,
        /// The individual errors.
        errors: Vec<FluxionError>,
    },
}

impl FluxionError {
    /// Builds a [`FluxionError::ValidationFailure`] with the given context.
    pub fn validation(context: impl Into<String>) -> Self {
        Self::ValidationFailure {
            context: context.into(),
        }
    }

    /// Wraps an upstream source error.
    pub fn source_failure(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::SourceFailure(std::sync::Arc::new(error))
    }

    /// Wraps a failing user callback.
    pub fn callback_failure(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::CallbackFailure(std::sync::Arc::new(error))
    }

    /// Aggregates more than one error from a single parallel batch.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty — callers should not construct a
    /// `MultipleErrors` out of zero failures.
    pub fn multiple(errors: Vec<FluxionError>) -> Self {
        assert!(
            !errors.is_empty(),
            "FluxionError::multiple requires at least one error"
        );
        Self::MultipleErrors {
            count: errors.len(),
            errors,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FluxionError>;
