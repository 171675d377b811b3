// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Per-theorem processing

use crate::collector::{collect_premises, PremiseSet};
use crate::options::UserOptions;
use proof_model::{statement_features, CorpusEnv, Declaration, ModelError, Name, StatementFeatures};

/// Extraction record for a single theorem. Built, filtered, formatted,
/// then discarded; never retained beyond one declaration's processing.
#[derive(Debug, Clone)]
pub struct TheoremPremises {
    pub name: Name,
    /// Features of the conclusion
    pub features: StatementFeatures,
    /// Features of each propositional hypothesis, in binder order
    pub hypothesis_features: Vec<StatementFeatures>,
    /// Premises referenced by the proof, discovery order, duplicates kept
    pub premises: PremiseSet,
}

/// Process one declaration. Returns `None` for non-theorem-like
/// declarations and for proofs outside the depth window; collaborator
/// errors propagate to the caller.
pub fn process_declaration(
    env: &CorpusEnv,
    decl: &Declaration,
    options: &UserOptions,
) -> Result<Option<TheoremPremises>, ModelError> {
    if !decl.kind.is_theorem_like() {
        return Ok(None);
    }
    let Some(proof) = &decl.proof else {
        return Ok(None);
    };

    let (binders, conclusion) = decl.statement.telescope();
    let features = statement_features(conclusion);

    let mut hypothesis_features = Vec::new();
    for (_, ty) in binders {
        if !env.is_proposition(ty)? {
            continue;
        }
        let hyp = statement_features(ty);
        // a hypothesis without a single bigram carries no usable signal
        if !hyp.bigram_counts.is_empty() {
            hypothesis_features.push(hyp);
        }
    }

    // Bound the expensive traversal before it runs: trivial proofs carry
    // no signal and pathologically large ones dominate extraction time.
    let depth = proof.approx_depth();
    if depth < options.min_depth || depth >= options.max_depth {
        return Ok(None);
    }

    let premises = collect_premises(env, proof)?;
    Ok(Some(TheoremPremises {
        name: decl.name.clone(),
        features,
        hypothesis_features,
        premises,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use proof_model::{DeclKind, Expr};

    fn depth_options(min_depth: usize, max_depth: usize) -> UserOptions {
        UserOptions {
            min_depth,
            max_depth,
            ..UserOptions::default()
        }
    }

    /// Proof term with the requested approximate depth.
    fn proof_of_depth(depth: usize) -> Expr {
        let mut proof = Expr::constant("Nat.le_refl");
        for _ in 1..depth {
            proof = Expr::app(proof, Expr::constant("Nat.zero"));
        }
        proof
    }

    fn theorem_with_proof(proof: Expr) -> Declaration {
        testutil::theorem(
            "Nat.le_zero",
            testutil::le(Expr::constant("Nat.zero"), Expr::constant("Nat.zero")),
            proof,
        )
    }

    #[test]
    fn depth_window_is_inclusive_exclusive() {
        let env = testutil::basic_env();
        let options = depth_options(2, 10);

        let too_shallow = theorem_with_proof(proof_of_depth(1));
        assert!(process_declaration(&env, &too_shallow, &options)
            .unwrap()
            .is_none());

        let in_window = theorem_with_proof(proof_of_depth(5));
        let record = process_declaration(&env, &in_window, &options)
            .unwrap()
            .expect("depth 5 lies inside [2, 10)");
        assert!(record.premises.contains(&Name::from("Nat.le_refl")));

        let too_deep = theorem_with_proof(proof_of_depth(10));
        assert!(process_declaration(&env, &too_deep, &options)
            .unwrap()
            .is_none());
    }

    #[test]
    fn non_theorems_produce_nothing() {
        let env = testutil::basic_env();
        let decl = Declaration {
            name: Name::from("Nat.double"),
            kind: DeclKind::Definition,
            statement: Expr::pi("n", Expr::constant("Nat"), Expr::constant("Nat")),
            proof: None,
        };
        assert!(process_declaration(&env, &decl, &UserOptions::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn propositional_hypotheses_keep_binder_order() {
        let env = testutil::basic_env();
        let hyp_a = testutil::le(Expr::constant("Nat.zero"), Expr::constant("Nat.zero"));
        let hyp_b = testutil::le(
            Expr::constant("Nat.zero"),
            Expr::app(Expr::constant("Nat.succ"), Expr::constant("Nat.zero")),
        );
        let statement = Expr::pi(
            "n",
            Expr::constant("Nat"),
            Expr::pi("ha", hyp_a.clone(), Expr::pi("hb", hyp_b, hyp_a)),
        );
        let decl = testutil::theorem(
            "Nat.chained",
            statement,
            Expr::constant("Nat.le_refl"),
        );

        let record = process_declaration(&env, &decl, &UserOptions::default())
            .unwrap()
            .expect("theorem inside the default window");
        // the data binder `n` contributes nothing; both hypotheses do
        assert_eq!(record.hypothesis_features.len(), 2);
        assert!(record.hypothesis_features[0]
            .name_counts
            .contains_key(&Name::from("Nat.le")));
    }

    #[test]
    fn degenerate_hypotheses_are_dropped() {
        let env = testutil::basic_env();
        // `True` is a proposition but its features carry no bigram
        let statement = Expr::pi(
            "h",
            Expr::constant("True"),
            testutil::le(Expr::constant("Nat.zero"), Expr::constant("Nat.zero")),
        );
        let decl = testutil::theorem("Nat.from_true", statement, Expr::constant("Nat.le_refl"));

        let record = process_declaration(&env, &decl, &UserOptions::default())
            .unwrap()
            .expect("theorem inside the default window");
        assert!(record.hypothesis_features.is_empty());
    }

    #[test]
    fn collaborator_failures_propagate() {
        let env = testutil::basic_env();
        let decl = theorem_with_proof(Expr::constant("Ghost.lemma"));
        assert!(process_declaration(&env, &decl, &UserOptions::default()).is_err());
    }
}
