// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Statement feature extraction
//!
//! Turns a statement into the token material for the features stream:
//! constant-occurrence counts, adjacent (head, argument-head) bigram
//! counts, and printed composite subexpressions. One deterministic walk;
//! count maps are ordered so downstream rendering never depends on hash
//! iteration.

use crate::{Expr, Name};
use std::collections::BTreeMap;

/// Features of a single statement (conclusion or hypothesis).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementFeatures {
    /// Occurrences per referenced constant
    pub name_counts: BTreeMap<Name, usize>,
    /// Occurrences per (function head, argument head) pair
    pub bigram_counts: BTreeMap<(Name, Name), usize>,
    /// Printed composite subexpressions, first-seen order, deduplicated
    pub subexpressions: Vec<String>,
}

/// Extract the features of a statement.
pub fn statement_features(statement: &Expr) -> StatementFeatures {
    let mut features = StatementFeatures::default();
    visit(statement, &mut features);
    features
}

fn visit(expr: &Expr, features: &mut StatementFeatures) {
    match expr {
        Expr::Const(name) => {
            *features.name_counts.entry(name.clone()).or_default() += 1;
        }
        Expr::App(f, a) => {
            if let (Some(left), Some(right)) = (f.head_const(), a.head_const()) {
                *features
                    .bigram_counts
                    .entry((left.clone(), right.clone()))
                    .or_default() += 1;
            }
            let printed = print_expr(expr);
            if !features.subexpressions.contains(&printed) {
                features.subexpressions.push(printed);
            }
        }
        _ => {}
    }
    for child in expr.children() {
        visit(child, features);
    }
}

/// Compact rendering used for subexpression tokens. Space-free, so tokens
/// survive the space-joined output lines.
fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Const(name) => name.to_string(),
        Expr::Var(i) => format!("#{i}"),
        Expr::Sort(0) => "Prop".to_string(),
        Expr::Sort(level) => format!("Type{}", level - 1),
        Expr::App(..) => {
            let (head, args) = expr.spine();
            let args = args.into_iter().map(print_expr).collect::<Vec<_>>();
            format!("{}({})", print_expr(head), args.join(","))
        }
        Expr::Lam { ty, body, .. } => {
            format!("(fun:{}=>{})", print_expr(ty), print_expr(body))
        }
        Expr::Pi { ty, body, .. } => {
            format!("(all:{}->{})", print_expr(ty), print_expr(body))
        }
    }
}
