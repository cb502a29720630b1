// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test infrastructure shared across the fluxion workspace: a push-capable
//! [`TestChannel`] and a pair of timestamped fixture records.

pub mod fixtures;
pub mod test_channel;

pub use fixtures::{Reading, Trade};
pub use test_channel::TestChannel;
