// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Premise-selection dataset extraction
//!
//! The core pipeline: a proof-term walk discovering the premises a proof
//! depends on (`collector`), a per-theorem processor applying depth
//! heuristics (`processor`), a corpus driver keeping the two output
//! streams line-aligned (`driver`), and the sink/formatter rendering
//! records into the labels and features files (`sink`). Source-based
//! premise filtering lives in `source_filter`.

pub mod collector;
pub mod driver;
pub mod options;
pub mod processor;
pub mod sink;
pub mod source_filter;

#[cfg(test)]
pub(crate) mod testutil;

pub use collector::{collect_premises, PremiseSet};
pub use driver::{extract_corpus, is_excluded_name, ExtractionSummary, ModuleStats};
pub use options::{FeatureFormat, UserOptions};
pub use processor::{process_declaration, TheoremPremises};
pub use sink::{features_line, DatasetSink};
pub use source_filter::{
    ActiveFilter, FileSourceLocator, FilterVerdict, ProofStyle, Provenance, SourceLocator,
};
