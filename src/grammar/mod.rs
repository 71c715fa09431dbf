/*
    This module is for storing and querying grammars
*/

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

// How the empty word is written in grammar files and in printed derivations.
// Inside a `Grammar` the empty production is stored as the empty string.
pub const EMPTY_WORD: char = '@';

// A single rewrite `lhs -> rhs`
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Production {
    pub lhs: char,
    pub rhs: String,
}

impl Production {
    pub fn new(lhs: char, rhs: impl Into<String>) -> Self {
        Production { lhs, rhs: rhs.into() }
    }

    pub fn is_empty_word(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty_word() {
            write!(f, "{} -> {}", self.lhs, EMPTY_WORD)
        } else {
            write!(f, "{} -> {}", self.lhs, self.rhs)
        }
    }
}

// The replacements of each nonterminal, in declaration order
pub type Rules = HashMap<char, Vec<String>>;

#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    terminals: BTreeSet<char>,
    nonterminals: BTreeSet<char>,
    start: char,
    rules: Rules,
    // Left-hand sides in the order their first rule was declared
    order: Vec<char>,
}

impl Grammar {
    /// Builds a grammar from already validated parts. `productions` keeps
    /// declaration order, which is the order the search tries them in.
    pub fn new(
        terminals: impl IntoIterator<Item = char>,
        nonterminals: impl IntoIterator<Item = char>,
        start: char,
        productions: impl IntoIterator<Item = Production>,
    ) -> Self {
        let mut rules = Rules::new();
        let mut order = Vec::new();
        for Production { lhs, rhs } in productions {
            if !rules.contains_key(&lhs) {
                order.push(lhs);
            }
            rules.entry(lhs).or_insert_with(Vec::new).push(rhs);
        }

        Grammar {
            terminals: terminals.into_iter().collect(),
            nonterminals: nonterminals.into_iter().collect(),
            start,
            rules,
            order,
        }
    }

    pub fn start(&self) -> char {
        self.start
    }

    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &BTreeSet<char> {
        &self.nonterminals
    }

    pub fn is_terminal(&self, symbol: char) -> bool {
        self.terminals.contains(&symbol)
    }

    pub fn is_nonterminal(&self, symbol: char) -> bool {
        self.nonterminals.contains(&symbol)
    }

    // Empty for terminals and for nonterminals without any rule
    pub fn rules_for(&self, symbol: char) -> &[String] {
        self.rules.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_rules(&self, symbol: char) -> bool {
        self.rules.contains_key(&symbol)
    }

    pub fn productions(&self) -> impl Iterator<Item = Production> + '_ {
        self.order.iter().flat_map(move |&lhs| {
            self.rules_for(lhs).iter().map(move |rhs| Production::new(lhs, rhs.as_str()))
        })
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    // S -> aSb | @
    pub fn anbn() -> Grammar {
        Grammar::new(
            ['a', 'b'],
            ['S'],
            'S',
            [Production::new('S', "aSb"), Production::new('S', "")],
        )
    }

    // S -> @
    pub fn empty_only() -> Grammar {
        Grammar::new(Vec::<char>::new(), ['S'], 'S', [Production::new('S', "")])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn rules_are_grouped_in_declaration_order() {
        let grammar = Grammar::new(
            ['a', 'b'],
            ['S', 'A'],
            'S',
            [
                Production::new('S', "A"),
                Production::new('A', "a"),
                Production::new('S', "b"),
            ],
        );

        assert_eq!(grammar.rules_for('S'), ["A".to_string(), "b".to_string()]);
        assert_eq!(grammar.rules_for('A'), ["a".to_string()]);
        assert_eq!(
            grammar.productions().collect::<Vec<_>>(),
            vec![
                Production::new('S', "A"),
                Production::new('S', "b"),
                Production::new('A', "a"),
            ]
        );
    }

    #[test]
    fn unknown_symbols_have_no_rules() {
        let grammar = anbn();
        assert!(grammar.rules_for('a').is_empty());
        assert!(grammar.rules_for('X').is_empty());
        assert!(!grammar.has_rules('X'));
    }

    #[test]
    fn symbol_classes() {
        let grammar = anbn();
        assert_eq!(grammar.start(), 'S');
        assert!(grammar.is_nonterminal('S'));
        assert!(!grammar.is_terminal('S'));
        assert!(grammar.is_terminal('a'));
        assert!(!grammar.is_nonterminal('a'));
        assert!(!grammar.is_terminal(EMPTY_WORD));
    }

    #[test]
    fn empty_production_displays_marker() {
        assert_eq!(Production::new('S', "").to_string(), "S -> @");
        assert_eq!(Production::new('S', "aSb").to_string(), "S -> aSb");
        assert!(empty_only().productions().all(|p| p.is_empty_word()));
    }
}
