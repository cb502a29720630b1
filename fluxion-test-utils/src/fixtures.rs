// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::HasTimestamp;

/// A sensor reading, timestamped in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub at: i64,
}

impl Reading {
    #[must_use]
    pub const fn new(value: f64, at: i64) -> Self {
        Self { value, at }
    }
}

impl HasTimestamp for Reading {
    type Timestamp = i64;

    fn timestamp(&self) -> i64 {
        self.at
    }
}

/// A trade tick, timestamped in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    pub price: f64,
    pub quantity: u32,
    pub at: i64,
}

impl Trade {
    #[must_use]
    pub const fn new(price: f64, quantity: u32, at: i64) -> Self {
        Self { price, quantity, at }
    }
}

impl HasTimestamp for Trade {
    type Timestamp = i64;

    fn timestamp(&self) -> i64 {
        self.at
    }
}
