// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Model-level failures

use crate::Name;
use thiserror::Error;

/// Failures surfaced by the corpus environment. Per-theorem occurrences are
/// recoverable: the driver logs the theorem's name and skips it.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A name did not resolve in the corpus
    #[error("unresolved constant `{0}`")]
    Resolution(Name),

    /// A type could not be classified
    #[error("type inference failed: {0}")]
    TypeInference(String),
}
