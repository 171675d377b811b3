// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Declarations, modules, and the corpus environment

use crate::{Expr, ModelError, Name};
use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Kind of a declaration. Only theorem-like declarations carry proof terms
/// and feed the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Theorem,
    Definition,
    Axiom,
    Inductive,
}

impl DeclKind {
    pub fn is_theorem_like(self) -> bool {
        matches!(self, DeclKind::Theorem)
    }
}

/// A single declaration of the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub name: Name,
    pub kind: DeclKind,
    /// Statement (the declared type)
    pub statement: Expr,
    /// Proof term, present for theorem-like kinds
    #[serde(default)]
    pub proof: Option<Expr>,
}

/// A module with its declarations in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: Name,
    pub declarations: Vec<Declaration>,
}

/// Serialized corpus export, as produced by the frontend dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusData {
    /// Module the corpus was exported from
    pub current: Name,
    /// Root namespace of the library targeted for extraction
    pub target_library: String,
    /// Direct imports of the current module, in import order
    pub imports: Vec<Name>,
    /// All modules of the corpus, in dependency order
    pub modules: Vec<Module>,
}

/// Read-only, indexed view of a corpus. All queries from the extraction
/// core go through the narrow accessors below; the environment is never
/// mutated after construction.
#[derive(Debug)]
pub struct CorpusEnv {
    data: CorpusData,
    index: HashMap<Name, (usize, usize)>,
}

impl CorpusEnv {
    pub fn new(data: CorpusData) -> Self {
        let mut index = HashMap::new();
        for (m, module) in data.modules.iter().enumerate() {
            for (d, decl) in module.declarations.iter().enumerate() {
                index.insert(decl.name.clone(), (m, d));
            }
        }
        Self { data, index }
    }

    /// Load a corpus export from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open corpus export {}", path.display()))?;
        let data: CorpusData = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed corpus export {}", path.display()))?;
        debug!(
            "loaded corpus export {}: {} modules",
            path.display(),
            data.modules.len()
        );
        Ok(Self::new(data))
    }

    pub fn current(&self) -> &Name {
        &self.data.current
    }

    pub fn target_library(&self) -> &str {
        &self.data.target_library
    }

    /// Direct imports of the current module, in import order.
    pub fn imports(&self) -> &[Name] {
        &self.data.imports
    }

    /// All modules, in corpus order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.data.modules.iter()
    }

    pub fn module(&self, id: &Name) -> Option<&Module> {
        self.data.modules.iter().find(|module| &module.id == id)
    }

    /// Resolve a name to its declaration.
    pub fn declaration(&self, name: &Name) -> Result<&Declaration, ModelError> {
        let (m, d) = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| ModelError::Resolution(name.clone()))?;
        Ok(&self.data.modules[m].declarations[d])
    }

    /// Declared type of a constant.
    pub fn type_of(&self, name: &Name) -> Result<&Expr, ModelError> {
        Ok(&self.declaration(name)?.statement)
    }

    /// Whether a type is classified as a proposition: its result sort is
    /// `Sort(0)`. Quantifiers classify by their codomain; applied constants
    /// by the result sort of the head's declared type.
    pub fn is_proposition(&self, ty: &Expr) -> Result<bool, ModelError> {
        match ty {
            Expr::Sort(_) | Expr::Var(_) => Ok(false),
            Expr::Pi { body, .. } => self.is_proposition(body),
            Expr::Const(_) | Expr::App(..) => match ty.head_const() {
                Some(head) => {
                    let declared = self.type_of(head)?;
                    let (_, result) = declared.telescope();
                    Ok(matches!(result, Expr::Sort(0)))
                }
                // headed by a bound variable: data, not a proposition
                None => Ok(false),
            },
            Expr::Lam { .. } => Err(ModelError::TypeInference(
                "lambda in type position".to_string(),
            )),
        }
    }

    /// Whether a constant's declared type is a proposition.
    pub fn is_prop_const(&self, name: &Name) -> Result<bool, ModelError> {
        let ty = self.type_of(name)?;
        self.is_proposition(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nat() -> Expr {
        Expr::constant("Nat")
    }

    fn le_zero_zero() -> Expr {
        Expr::app(
            Expr::app(Expr::constant("Nat.le"), Expr::constant("Nat.zero")),
            Expr::constant("Nat.zero"),
        )
    }

    fn env() -> CorpusEnv {
        let declarations = vec![
            Declaration {
                name: Name::from("Nat"),
                kind: DeclKind::Inductive,
                statement: Expr::Sort(1),
                proof: None,
            },
            Declaration {
                name: Name::from("Nat.zero"),
                kind: DeclKind::Definition,
                statement: nat(),
                proof: None,
            },
            Declaration {
                name: Name::from("Nat.le"),
                kind: DeclKind::Definition,
                statement: Expr::pi("n", nat(), Expr::pi("m", nat(), Expr::Sort(0))),
                proof: None,
            },
            Declaration {
                name: Name::from("Nat.le_refl"),
                kind: DeclKind::Axiom,
                statement: Expr::pi(
                    "n",
                    nat(),
                    Expr::app(
                        Expr::app(Expr::constant("Nat.le"), Expr::Var(0)),
                        Expr::Var(0),
                    ),
                ),
                proof: None,
            },
        ];
        CorpusEnv::new(CorpusData {
            current: Name::from("TestLib.Main"),
            target_library: "TestLib".to_string(),
            imports: vec![Name::from("TestLib.Basic")],
            modules: vec![Module {
                id: Name::from("TestLib.Basic"),
                declarations,
            }],
        })
    }

    #[test]
    fn unknown_names_fail_resolution() {
        let env = env();
        let err = env.declaration(&Name::from("Ghost.lemma")).unwrap_err();
        assert!(matches!(err, ModelError::Resolution(_)));
    }

    #[test]
    fn propositions_classify_by_result_sort() {
        let env = env();
        // an applied relation is a proposition
        assert!(env.is_proposition(&le_zero_zero()).unwrap());
        // quantifiers classify by their codomain
        assert!(env
            .is_proposition(&Expr::pi("n", nat(), le_zero_zero()))
            .unwrap());
        // data types and universes are not propositions
        assert!(!env.is_proposition(&nat()).unwrap());
        assert!(!env.is_proposition(&Expr::Sort(0)).unwrap());
        assert!(!env.is_proposition(&Expr::Var(0)).unwrap());
    }

    #[test]
    fn prop_typed_constants_qualify_as_premises() {
        let env = env();
        assert!(env.is_prop_const(&Name::from("Nat.le_refl")).unwrap());
        // the relation itself is Prop-valued, not a proposition
        assert!(!env.is_prop_const(&Name::from("Nat.le")).unwrap());
        assert!(!env.is_prop_const(&Name::from("Nat.zero")).unwrap());
    }

    #[test]
    fn lambda_in_type_position_is_a_type_error() {
        let env = env();
        let bad = Expr::lam("x", nat(), Expr::Var(0));
        assert!(matches!(
            env.is_proposition(&bad),
            Err(ModelError::TypeInference(_))
        ));
    }
}
