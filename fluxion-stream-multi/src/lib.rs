// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multi-source combinators: concurrent [`merge`](MergeExt::merge), k-way
//! [`merge_ordered`](MergeOrderedExt::merge_ordered), and
//! [`zip`](ZipExt::zip)/[`zip_longest`](ZipExt::zip_longest).

pub mod merge;
pub mod merge_ordered;
pub mod zip;

pub use merge::MergeExt;
pub use merge_ordered::MergeOrderedExt;
pub use zip::ZipExt;
