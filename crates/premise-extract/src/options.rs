// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! User-facing extraction options

/// Which feature classes are rendered into the features stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFormat {
    /// Emit name-occurrence tokens
    pub names: bool,
    /// Emit bigram tokens
    pub bigrams: bool,
    /// Emit subexpression tokens
    pub subexpressions: bool,
}

impl Default for FeatureFormat {
    fn default() -> Self {
        Self {
            names: true,
            bigrams: false,
            subexpressions: true,
        }
    }
}

/// Options controlling which theorems are retained and how records render.
#[derive(Debug, Clone)]
pub struct UserOptions {
    /// Inclusive lower bound on the proof-size heuristic
    pub min_depth: usize,
    /// Exclusive upper bound on the proof-size heuristic
    pub max_depth: usize,
    /// Restrict premises to those visible in the theorem's source
    pub user_filter: bool,
    pub format: FeatureFormat,
}

impl Default for UserOptions {
    fn default() -> Self {
        Self {
            min_depth: 0,
            max_depth: usize::MAX,
            user_filter: false,
            format: FeatureFormat::default(),
        }
    }
}
