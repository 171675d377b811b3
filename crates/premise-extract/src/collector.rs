// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Premise collection over proof terms

use proof_model::{CorpusEnv, ModelError, Name, TermNode};
use std::collections::BTreeMap;

/// Insertion-ordered multiset of premise names. Order is discovery order
/// and duplicates are preserved; a count-by-key view is derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PremiseSet {
    entries: Vec<Name>,
}

impl PremiseSet {
    pub fn push(&mut self, name: Name) {
        self.entries.push(name);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Name> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.entries.contains(name)
    }

    /// Count-by-key view of the multiset.
    pub fn counts(&self) -> BTreeMap<&Name, usize> {
        let mut counts = BTreeMap::new();
        for name in &self.entries {
            *counts.entry(name).or_default() += 1;
        }
        counts
    }

    /// Keep only entries satisfying the predicate, preserving order and
    /// multiplicity.
    pub fn retain(&mut self, f: impl FnMut(&Name) -> bool) {
        self.entries.retain(f);
    }
}

impl FromIterator<Name> for PremiseSet {
    fn from_iter<I: IntoIterator<Item = Name>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Walk every node of a proof term and collect each reference to a
/// constant whose declared type is a proposition. One entry per
/// occurrence; traversal order determines enumeration order only.
pub fn collect_premises<T: TermNode>(env: &CorpusEnv, proof: &T) -> Result<PremiseSet, ModelError> {
    let mut premises = PremiseSet::default();
    visit(env, proof, &mut premises)?;
    Ok(premises)
}

fn visit<T: TermNode>(
    env: &CorpusEnv,
    node: &T,
    premises: &mut PremiseSet,
) -> Result<(), ModelError> {
    if let Some(name) = node.constant_ref() {
        if env.is_prop_const(name)? {
            premises.push(name.clone());
        }
    }
    for child in node.children() {
        visit(env, child, premises)?;
    }
    Ok(())
}
