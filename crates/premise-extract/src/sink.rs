// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Aligned output streams and feature-line rendering

use crate::options::FeatureFormat;
use crate::processor::TheoremPremises;
use itertools::Itertools;
use proof_model::StatementFeatures;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Paired labels/features destinations. Both are opened (and truncated)
/// once for a whole run; `insert` appends exactly one line to each, so
/// line `i` of both destinations always describes the same theorem.
pub struct DatasetSink<W: Write> {
    labels: W,
    features: W,
    format: FeatureFormat,
}

impl DatasetSink<BufWriter<File>> {
    /// Open both destinations, truncating whatever was there.
    pub fn create(
        labels_path: &Path,
        features_path: &Path,
        format: FeatureFormat,
    ) -> io::Result<Self> {
        let labels = BufWriter::new(File::create(labels_path)?);
        let features = BufWriter::new(File::create(features_path)?);
        Ok(Self::new(labels, features, format))
    }
}

impl<W: Write> DatasetSink<W> {
    pub fn new(labels: W, features: W, format: FeatureFormat) -> Self {
        Self {
            labels,
            features,
            format,
        }
    }

    /// Append one labels line and one features line for a record.
    pub fn insert(&mut self, theorem: &TheoremPremises) -> io::Result<()> {
        writeln!(self.labels, "{}", theorem.premises.iter().join(" "))?;
        writeln!(
            self.features,
            "{}",
            features_line(&theorem.features, &theorem.hypothesis_features, self.format)
        )?;
        Ok(())
    }

    /// Flush both destinations and release them.
    pub fn finish(mut self) -> io::Result<()> {
        self.labels.flush()?;
        self.features.flush()
    }

    /// Flush and return the underlying destinations.
    pub fn into_inner(mut self) -> io::Result<(W, W)> {
        self.labels.flush()?;
        self.features.flush()?;
        Ok((self.labels, self.features))
    }
}

/// Render the features line of a record: `T:`-tagged conclusion tokens and
/// `H:`-tagged hypothesis tokens, in fixed class order (names, then
/// bigrams, then subexpressions, for whichever classes the format
/// enables), conclusion before all hypotheses within each class and
/// hypotheses in declaration order. A count greater than one still emits a
/// single token for its key.
pub fn features_line(
    conclusion: &StatementFeatures,
    hypotheses: &[StatementFeatures],
    format: FeatureFormat,
) -> String {
    let mut tokens: Vec<String> = Vec::new();
    if format.names {
        push_names(&mut tokens, "T", conclusion);
        for hyp in hypotheses {
            push_names(&mut tokens, "H", hyp);
        }
    }
    if format.bigrams {
        push_bigrams(&mut tokens, "T", conclusion);
        for hyp in hypotheses {
            push_bigrams(&mut tokens, "H", hyp);
        }
    }
    if format.subexpressions {
        push_subexpressions(&mut tokens, "T", conclusion);
        for hyp in hypotheses {
            push_subexpressions(&mut tokens, "H", hyp);
        }
    }
    tokens.join(" ")
}

fn push_names(tokens: &mut Vec<String>, tag: &str, features: &StatementFeatures) {
    tokens.extend(
        features
            .name_counts
            .keys()
            .map(|name| format!("{tag}:{name}")),
    );
}

fn push_bigrams(tokens: &mut Vec<String>, tag: &str, features: &StatementFeatures) {
    tokens.extend(
        features
            .bigram_counts
            .keys()
            .map(|(left, right)| format!("{tag}:{left}/{right}")),
    );
}

fn push_subexpressions(tokens: &mut Vec<String>, tag: &str, features: &StatementFeatures) {
    tokens.extend(
        features
            .subexpressions
            .iter()
            .map(|subexpr| format!("{tag}:{}", subexpr.trim())),
    );
}
