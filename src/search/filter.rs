/*
    Decides whether a sentential form could still be refined into the word
*/

use regex::{Regex, RegexBuilder};

use crate::grammar::Grammar;

/// A pattern over the target word built from a sentential form. Terminals
/// are matched literally and every nonterminal becomes a `.*` gap. The
/// pattern is anchored at the start when the form begins with a terminal
/// and at the end when it finishes with one.
///
/// This over-approximates what the form can derive: it never rejects a form
/// that derives the word, but it admits many that do not.
#[derive(Debug)]
pub struct FeasibilityPattern {
    source: String,
    regex: Option<Regex>,
}

impl FeasibilityPattern {
    pub fn new(grammar: &Grammar, expression: &str) -> Self {
        let source = pattern_source(grammar, expression);

        // Only an enormous form can exceed the compiled size limit. Such a
        // pattern admits everything rather than risk a false rejection.
        let regex = RegexBuilder::new(&source)
            .dot_matches_new_line(true)
            .build()
            .map_err(|error| log_warn!("Could not compile feasibility pattern ({}), admitting the form", error))
            .ok();

        FeasibilityPattern { source, regex }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn admits(&self, word: &str) -> bool {
        self.regex.as_ref().map_or(true, |regex| regex.is_match(word))
    }
}

fn pattern_source(grammar: &Grammar, expression: &str) -> String {
    let mut source = String::with_capacity(expression.len() * 2 + 2);

    if expression.chars().next().is_some_and(|c| grammar.is_terminal(c)) {
        source.push('^');
    }

    for symbol in expression.chars() {
        if grammar.is_nonterminal(symbol) {
            source.push_str(".*");
        } else {
            let mut buffer = [0; 4];
            source.push_str(&regex::escape(symbol.encode_utf8(&mut buffer)));
        }
    }

    if expression.chars().last().is_some_and(|c| grammar.is_terminal(c)) {
        source.push('$');
    }

    source
}
