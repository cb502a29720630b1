// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// A minimal trait for types that have an intrinsic timestamp for window ordering.
///
/// `window` and `sliding_window` use this as the default timestamp source; pass an
/// explicit extractor closure via the `_by` variant of either operator to order on
/// something other than a type's own `HasTimestamp` impl.
pub trait HasTimestamp {
    /// The timestamp representation. Must support the arithmetic window/sliding_window
    /// need (`<`, `<=`, subtraction), which in practice means a signed integer type.
    type Timestamp: Ord + Copy + std::fmt::Debug;

    /// Returns this item's timestamp.
    fn timestamp(&self) -> Self::Timestamp;
}
