// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Shared corpus fixtures for unit tests.

use proof_model::{CorpusData, CorpusEnv, DeclKind, Declaration, Expr, Module, Name};

pub fn theorem(name: &str, statement: Expr, proof: Expr) -> Declaration {
    Declaration {
        name: Name::from(name),
        kind: DeclKind::Theorem,
        statement,
        proof: Some(proof),
    }
}

pub fn axiom(name: &str, statement: Expr) -> Declaration {
    Declaration {
        name: Name::from(name),
        kind: DeclKind::Axiom,
        statement,
        proof: None,
    }
}

pub fn definition(name: &str, statement: Expr) -> Declaration {
    Declaration {
        name: Name::from(name),
        kind: DeclKind::Definition,
        statement,
        proof: None,
    }
}

pub fn inductive(name: &str, statement: Expr) -> Declaration {
    Declaration {
        name: Name::from(name),
        kind: DeclKind::Inductive,
        statement,
        proof: None,
    }
}

/// `Nat.le a b`
pub fn le(a: Expr, b: Expr) -> Expr {
    Expr::app(Expr::app(Expr::constant("Nat.le"), a), b)
}

fn nat() -> Expr {
    Expr::constant("Nat")
}

fn zero() -> Expr {
    Expr::constant("Nat.zero")
}

/// Declarations of the `TestLib.Basic` fixture module: a tiny ordering
/// theory plus three theorems, one of them compiler-synthesized.
pub fn basic_declarations() -> Vec<Declaration> {
    let le_zero_zero = le(zero(), zero());
    let le_zero_one = le(zero(), Expr::app(Expr::constant("Nat.succ"), zero()));
    vec![
        inductive("Nat", Expr::Sort(1)),
        definition("Nat.zero", nat()),
        definition("Nat.succ", Expr::pi("n", nat(), nat())),
        definition(
            "Nat.le",
            Expr::pi("n", nat(), Expr::pi("m", nat(), Expr::Sort(0))),
        ),
        axiom(
            "Nat.le_refl",
            Expr::pi("n", nat(), le(Expr::Var(0), Expr::Var(0))),
        ),
        axiom(
            "Nat.le_step",
            Expr::pi(
                "n",
                nat(),
                Expr::pi(
                    "m",
                    nat(),
                    Expr::pi(
                        "h",
                        le(Expr::Var(1), Expr::Var(0)),
                        le(
                            Expr::Var(2),
                            Expr::app(Expr::constant("Nat.succ"), Expr::Var(1)),
                        ),
                    ),
                ),
            ),
        ),
        theorem(
            "Nat.le_zero",
            le_zero_zero.clone(),
            Expr::app(Expr::constant("Nat.le_refl"), zero()),
        ),
        theorem(
            "Nat.le_zero._eqn_1",
            le_zero_zero.clone(),
            Expr::constant("Nat.le_refl"),
        ),
        theorem(
            "Nat.le_zero_step",
            Expr::pi("h", le_zero_zero.clone(), le_zero_one),
            Expr::lam(
                "h",
                le_zero_zero,
                Expr::app(
                    Expr::app(
                        Expr::app(Expr::constant("Nat.le_step"), zero()),
                        zero(),
                    ),
                    Expr::Var(0),
                ),
            ),
        ),
    ]
}

fn core_declarations() -> Vec<Declaration> {
    vec![
        inductive("True", Expr::Sort(0)),
        axiom("True.intro", Expr::constant("True")),
        theorem(
            "Init.triv",
            Expr::constant("True"),
            Expr::constant("True.intro"),
        ),
    ]
}

fn main_declarations() -> Vec<Declaration> {
    vec![theorem(
        "Main.demo",
        le(zero(), zero()),
        Expr::app(Expr::constant("Nat.le_refl"), zero()),
    )]
}

/// A corpus with a target-library import, a foreign import, and a current
/// module. `Init.Core` lies outside the target library and must never be
/// processed in recursive mode.
pub fn basic_env() -> CorpusEnv {
    CorpusEnv::new(CorpusData {
        current: Name::from("TestLib.Main"),
        target_library: "TestLib".to_string(),
        imports: vec![Name::from("TestLib.Basic"), Name::from("Init.Core")],
        modules: vec![
            Module {
                id: Name::from("TestLib.Basic"),
                declarations: basic_declarations(),
            },
            Module {
                id: Name::from("Init.Core"),
                declarations: core_declarations(),
            },
            Module {
                id: Name::from("TestLib.Main"),
                declarations: main_declarations(),
            },
        ],
    })
}
