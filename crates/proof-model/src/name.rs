// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Qualified names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dot-separated qualified name of a declaration or module,
/// e.g. `Nat.le_refl` or `Mathlib.Order.Basic`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Root component, i.e. the library namespace (`Nat` for `Nat.le_refl`).
    pub fn root(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Final component (`le_refl` for `Nat.le_refl`).
    pub fn last(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Self(name)
    }
}
