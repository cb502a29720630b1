// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core traits and error/item types shared by every fluxion crate.

mod error;
mod has_timestamp;
mod stream_item;

pub use error::{FluxionError, Result};
pub use has_timestamp::HasTimestamp;
pub use stream_item::StreamItem;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_item_map_preserves_error() {
        let err: StreamItem<i32> = StreamItem::Error(FluxionError::validation("bad"));
        let mapped = err.map(|v| v * 2);
        assert!(mapped.is_error());
    }

    #[test]
    fn stream_item_map_transforms_value() {
        let item = StreamItem::Value(21);
        let mapped = item.map(|v| v * 2);
        assert_eq!(mapped.ok(), Some(42));
    }

    #[test]
    fn result_roundtrip() {
        let ok: Result<i32> = Ok(7);
        let item: StreamItem<i32> = ok.into();
        let back: Result<i32> = item.into();
        assert_eq!(back.unwrap(), 7);
    }

    #[test]
    #[should_panic(expected = "at least one error")]
    fn multiple_requires_nonempty() {
        let _ = FluxionError::multiple(vec![]);
    }
}
