// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Source-based premise filtering
//!
//! When user filtering is on, a theorem's premises are narrowed to what is
//! textually visible in its own source span and, when the proof can be
//! located and classified, further restricted to the identifiers of the
//! proof body.

use crate::collector::PremiseSet;
use crate::processor::TheoremPremises;
use proof_model::Name;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Authoring style of a located proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofStyle {
    /// Written as a term after `:=`
    Term,
    /// Written as a tactic script after `:= by`
    Tactic,
}

/// Source-derived classification of a proof: how it was authored and which
/// identifiers its body mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub style: ProofStyle,
    pub body_tokens: BTreeSet<String>,
}

/// Locates theorems in on-disk sources and narrows premise sets by what
/// the source text actually mentions.
pub trait SourceLocator {
    /// Source file for a module, if one exists.
    fn module_source(&self, module: &Name) -> Option<PathBuf>;

    /// Provenance of a theorem within a source file; `None` when the
    /// declaration cannot be located or has no proof body.
    fn provenance(&self, theorem: &Name, path: &Path) -> Option<Provenance>;

    /// Narrow premises to those textually present in the theorem's own
    /// source span. Theorems that cannot be located keep their premises.
    fn narrow_to_span(&self, theorem: &Name, premises: &PremiseSet, path: &Path) -> PremiseSet;

    /// Restrict narrowed premises to those mentioned by the proof body.
    fn restrict(&self, premises: PremiseSet, provenance: &Provenance) -> PremiseSet;
}

const HEADER_KEYWORDS: &[&str] = &[
    "theorem", "lemma", "def", "abbrev", "axiom", "instance", "example",
];

fn is_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    HEADER_KEYWORDS.iter().any(|keyword| {
        trimmed.starts_with(keyword)
            && trimmed[keyword.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace())
    })
}

fn is_header_for(line: &str, theorem: &Name) -> bool {
    if !is_header(line) {
        return false;
    }
    // declared either fully qualified or by final component inside a namespace
    let declared = line.trim_start().split_whitespace().nth(1).unwrap_or("");
    declared == theorem.as_str() || declared == theorem.last()
}

/// Identifier tokens of a text chunk: runs of alphanumerics, `_`, `'`
/// and `.`.
fn identifier_tokens(text: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' || c == '\'' || c == '.' {
            current.push(c);
        } else if !current.is_empty() {
            tokens.insert(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.insert(current);
    }
    tokens
}

fn mentions(tokens: &BTreeSet<String>, name: &Name) -> bool {
    tokens.contains(name.as_str()) || tokens.contains(name.last())
}

/// Locator over a source tree rooted at a directory, mapping module ids to
/// `<root>/<components…>.<extension>` files. File contents are cached per
/// path for the lifetime of the locator.
#[derive(Debug)]
pub struct FileSourceLocator {
    root: PathBuf,
    extension: String,
    cache: RefCell<HashMap<PathBuf, Option<String>>>,
}

impl FileSourceLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "lean".to_string(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    fn contents(&self, path: &Path) -> Option<String> {
        self.cache
            .borrow_mut()
            .entry(path.to_path_buf())
            .or_insert_with(|| fs::read_to_string(path).ok())
            .clone()
    }

    /// Text of the declaration's span: from its header line to the next
    /// header line (or end of file).
    fn declaration_span(&self, theorem: &Name, path: &Path) -> Option<String> {
        let text = self.contents(path)?;
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.iter().position(|line| is_header_for(line, theorem))?;
        let end = lines[start + 1..]
            .iter()
            .position(|line| is_header(line))
            .map(|offset| start + 1 + offset)
            .unwrap_or(lines.len());
        Some(lines[start..end].join("\n"))
    }
}

impl SourceLocator for FileSourceLocator {
    fn module_source(&self, module: &Name) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for component in module.as_str().split('.') {
            path.push(component);
        }
        path.set_extension(&self.extension);
        path.exists().then_some(path)
    }

    fn provenance(&self, theorem: &Name, path: &Path) -> Option<Provenance> {
        let span = self.declaration_span(theorem, path)?;
        let (_, body) = span.split_once(":=")?;
        let trimmed = body.trim_start();
        let style = if trimmed == "by" || trimmed.starts_with("by ") || trimmed.starts_with("by\n")
        {
            ProofStyle::Tactic
        } else {
            ProofStyle::Term
        };
        Some(Provenance {
            style,
            body_tokens: identifier_tokens(body),
        })
    }

    fn narrow_to_span(&self, theorem: &Name, premises: &PremiseSet, path: &Path) -> PremiseSet {
        match self.declaration_span(theorem, path) {
            Some(span) => {
                let tokens = identifier_tokens(&span);
                let mut narrowed = premises.clone();
                narrowed.retain(|name| mentions(&tokens, name));
                narrowed
            }
            // nothing to narrow against
            None => premises.clone(),
        }
    }

    fn restrict(&self, mut premises: PremiseSet, provenance: &Provenance) -> PremiseSet {
        premises.retain(|name| mentions(&provenance.body_tokens, name));
        premises
    }
}

/// The premise filter active for one module.
pub enum ActiveFilter<'a> {
    /// No user filtering: premises pass through, theorems count as found.
    Identity,
    /// User filtering with a resolved source file.
    Source {
        locator: &'a dyn SourceLocator,
        path: PathBuf,
    },
    /// User filtering requested but the module's source did not resolve.
    Unresolved,
}

/// Outcome of applying the active filter to one theorem.
pub struct FilterVerdict {
    pub premises: PremiseSet,
    /// Whether the theorem counts toward the per-module "found" ratio
    pub found: bool,
}

impl<'a> ActiveFilter<'a> {
    /// Build the filter for a module under the given options.
    pub fn for_module(
        user_filter: bool,
        locator: Option<&'a dyn SourceLocator>,
        module: &Name,
    ) -> ActiveFilter<'a> {
        if !user_filter {
            return ActiveFilter::Identity;
        }
        match locator.and_then(|l| l.module_source(module).map(|path| (l, path))) {
            Some((locator, path)) => ActiveFilter::Source { locator, path },
            None => ActiveFilter::Unresolved,
        }
    }

    pub fn apply(&self, theorem: &TheoremPremises) -> FilterVerdict {
        match self {
            ActiveFilter::Identity => FilterVerdict {
                premises: theorem.premises.clone(),
                found: true,
            },
            ActiveFilter::Unresolved => FilterVerdict {
                premises: theorem.premises.clone(),
                found: false,
            },
            ActiveFilter::Source { locator, path } => {
                let narrowed = locator.narrow_to_span(&theorem.name, &theorem.premises, path);
                match locator.provenance(&theorem.name, path) {
                    Some(provenance) => FilterVerdict {
                        premises: locator.restrict(narrowed, &provenance),
                        found: true,
                    },
                    None => FilterVerdict {
                        premises: narrowed,
                        found: false,
                    },
                }
            }
        }
    }
}
