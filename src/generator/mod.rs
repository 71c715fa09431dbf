/*
    This module samples derivable words
*/

use rand::prelude::*;
use thiserror::Error;

use crate::grammar::Grammar;
use crate::search::{expand, Derivation, DerivationTree};

#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    // A nonterminal with no rules was left in the expression
    #[error("No rules for nonterminal `{0}`")]
    DeadEnd(char),
    #[error("Still not a word after {0} steps")]
    TooManySteps(usize),
}

pub type SampleResult = Result<Derivation, SampleError>;

/// Derives a random word by applying uniformly chosen productions to the
/// start symbol, with the same replace-all rewriting the search uses. Any
/// word returned is derivable, which makes it a witness the search must find.
pub fn sample(grammar: &Grammar, rng: &mut impl Rng, max_steps: usize) -> SampleResult {
    let mut tree = DerivationTree::new();
    let mut current = tree.root(grammar.start().to_string());

    let mut steps = 0;
    loop {
        let expression = &tree.get(current).expression;
        if !expression.chars().any(|c| grammar.is_nonterminal(c)) {
            return Ok(tree.derivation(current));
        }
        if steps == max_steps {
            return Err(SampleError::TooManySteps(max_steps));
        }

        let choice = expand(grammar, expression).into_iter().choose(rng);
        let Some((rule, child)) = choice else {
            let stuck = expression.chars()
                .find(|&c| grammar.is_nonterminal(c))
                .unwrap_or(grammar.start());
            return Err(SampleError::DeadEnd(stuck));
        };

        current = tree.child(current, rule, child);
        steps += 1;
    }
}
