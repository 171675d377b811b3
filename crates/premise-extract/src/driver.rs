// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Corpus-wide extraction driver
//!
//! Iterates modules and declarations sequentially; output-line alignment
//! and the found/total counters are order-dependent, so processing is
//! deterministic and strictly single-threaded.

use crate::options::UserOptions;
use crate::processor::process_declaration;
use crate::sink::DatasetSink;
use crate::source_filter::{ActiveFilter, SourceLocator};
use anyhow::Context;
use log::{info, warn};
use proof_model::{CorpusEnv, Module, Name};
use std::io::Write;

/// Per-module found/total counters for the user filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleStats {
    pub found: usize,
    pub total: usize,
}

/// Totals for a whole extraction run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionSummary {
    pub modules: usize,
    pub inserted: usize,
    pub found: usize,
    pub total: usize,
}

/// Compiler-synthesized auxiliary lemmas are not user theorems and are
/// skipped without processing.
pub fn is_excluded_name(name: &Name) -> bool {
    let text = name.as_str();
    text.contains('!')
        || text.contains('«')
        || text.contains('»')
        || text.contains("_eqn_")
        || text.contains("_proof_")
        || text.contains("_match_")
}

/// Run extraction over the corpus, inserting every retained theorem into
/// the sink. Recursive mode processes the corpus's direct imports
/// belonging to the target library, in import order; otherwise only the
/// current module is processed.
pub fn extract_corpus<W: Write>(
    env: &CorpusEnv,
    options: &UserOptions,
    locator: Option<&dyn SourceLocator>,
    sink: &mut DatasetSink<W>,
    recursive: bool,
) -> anyhow::Result<ExtractionSummary> {
    let selected: Vec<&Name> = if recursive {
        env.imports()
            .iter()
            .filter(|id| id.root() == env.target_library())
            .collect()
    } else {
        vec![env.current()]
    };

    let mut summary = ExtractionSummary::default();
    for (position, &id) in selected.iter().enumerate() {
        info!("[{}/{}] module {}", position + 1, selected.len(), id);
        let module = env
            .module(id)
            .with_context(|| format!("module {id} is not part of the corpus export"))?;
        let (inserted, stats) = process_module(env, module, options, locator, sink)?;
        summary.modules += 1;
        summary.inserted += inserted;
        summary.found += stats.found;
        summary.total += stats.total;
    }
    info!(
        "inserted {} theorems from {} modules",
        summary.inserted, summary.modules
    );
    Ok(summary)
}

/// Process one module's declarations in order; returns the number of
/// records inserted and the filter counters.
fn process_module<W: Write>(
    env: &CorpusEnv,
    module: &Module,
    options: &UserOptions,
    locator: Option<&dyn SourceLocator>,
    sink: &mut DatasetSink<W>,
) -> anyhow::Result<(usize, ModuleStats)> {
    let filter = ActiveFilter::for_module(options.user_filter, locator, &module.id);
    let mut stats = ModuleStats::default();
    let mut inserted = 0;

    for decl in &module.declarations {
        if is_excluded_name(&decl.name) {
            continue;
        }
        let mut record = match process_declaration(env, decl, options) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(err) => {
                // recoverable per-theorem failure: skip this theorem only
                warn!("skipping {}: {err}", decl.name);
                continue;
            }
        };

        let verdict = filter.apply(&record);
        stats.total += 1;
        if verdict.found {
            stats.found += 1;
        }
        if verdict.premises.is_empty() {
            continue;
        }
        record.premises = verdict.premises;
        sink.insert(&record)
            .with_context(|| format!("cannot append record for {}", record.name))?;
        inserted += 1;
    }

    if options.user_filter {
        info!(
            "module {}: located {}/{} theorems in source",
            module.id, stats.found, stats.total
        );
    }
    Ok((inserted, stats))
}
