// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Expression trees for statements and proof terms

use crate::Name;
use serde::{Deserialize, Serialize};

/// A closed expression. Binders use de Bruijn indices; `Sort(0)` is the
/// proposition sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Reference to a global declaration
    Const(Name),

    /// Bound variable (de Bruijn index)
    Var(usize),

    /// Universe; level 0 is the proposition sort
    Sort(u32),

    /// Application
    App(Box<Expr>, Box<Expr>),

    /// Lambda abstraction
    Lam {
        binder: String,
        ty: Box<Expr>,
        body: Box<Expr>,
    },

    /// Dependent function type (universal quantifier)
    Pi {
        binder: String,
        ty: Box<Expr>,
        body: Box<Expr>,
    },
}

impl Expr {
    pub fn constant(name: impl Into<Name>) -> Self {
        Expr::Const(name.into())
    }

    pub fn app(f: Expr, a: Expr) -> Self {
        Expr::App(Box::new(f), Box::new(a))
    }

    pub fn lam(binder: &str, ty: Expr, body: Expr) -> Self {
        Expr::Lam {
            binder: binder.to_string(),
            ty: Box::new(ty),
            body: Box::new(body),
        }
    }

    pub fn pi(binder: &str, ty: Expr, body: Expr) -> Self {
        Expr::Pi {
            binder: binder.to_string(),
            ty: Box::new(ty),
            body: Box::new(body),
        }
    }

    /// Direct children, in structural order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Const(_) | Expr::Var(_) | Expr::Sort(_) => vec![],
            Expr::App(f, a) => vec![f, a],
            Expr::Lam { ty, body, .. } | Expr::Pi { ty, body, .. } => vec![ty, body],
        }
    }

    /// Head constant after stripping applications.
    pub fn head_const(&self) -> Option<&Name> {
        match self {
            Expr::Const(name) => Some(name),
            Expr::App(f, _) => f.head_const(),
            _ => None,
        }
    }

    /// Application head and arguments, left to right.
    pub fn spine(&self) -> (&Expr, Vec<&Expr>) {
        match self {
            Expr::App(f, a) => {
                let (head, mut args) = f.spine();
                args.push(a);
                (head, args)
            }
            _ => (self, Vec::new()),
        }
    }

    /// Approximate structural size: 1 + the deepest child. Used as the
    /// proof-size heuristic gating premise collection.
    pub fn approx_depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::approx_depth)
            .max()
            .unwrap_or(0)
    }

    /// Strip the leading quantifiers of a statement, returning the ordered
    /// (binder, type) telescope and the conclusion.
    pub fn telescope(&self) -> (Vec<(&str, &Expr)>, &Expr) {
        let mut binders = Vec::new();
        let mut current = self;
        while let Expr::Pi { binder, ty, body } = current {
            binders.push((binder.as_str(), ty.as_ref()));
            current = body;
        }
        (binders, current)
    }
}

/// Minimal tree interface for walking proof terms: a node either is a
/// reference to a named constant or it is not, and it has children. Keeps
/// the premise walk independent of the concrete term representation.
pub trait TermNode {
    fn constant_ref(&self) -> Option<&Name>;
    fn children(&self) -> Vec<&Self>;
}

impl TermNode for Expr {
    fn constant_ref(&self) -> Option<&Name> {
        match self {
            Expr::Const(name) => Some(name),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&Self> {
        Expr::children(self)
    }
}
