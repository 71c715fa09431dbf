/*
    This module searches for a derivation of a word
*/

mod expand;
mod filter;
mod tree;

use std::collections::{HashMap, VecDeque};

use crate::grammar::Grammar;

pub use expand::expand;
#[cfg(test)]
pub use expand::apply;
pub use filter::FeasibilityPattern;
pub use tree::{Derivation, DerivationTree, NodeId};

#[derive(Debug, PartialEq, Clone)]
pub enum SearchResult {
    Found(Derivation),
    NotFound,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

// Counters for one search, mostly for diagnostics
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct SearchStats {
    // Nodes taken off the frontier
    pub expanded: usize,
    // Children that made it onto the frontier
    pub admitted: usize,
    // Children rejected because their expression was already seen
    pub duplicates: usize,
    // Children rejected by the feasibility pattern
    pub infeasible: usize,
}

/// Breadth-first search over sentential forms, starting from the grammar's
/// start symbol. Every expression enters the frontier at most once.
///
/// The search is not guaranteed to terminate: a grammar whose forms keep
/// growing without ever contradicting the word's pattern runs forever. Use
/// [`search_bounded`] to stop after a number of expansions.
pub struct Search<'g> {
    grammar: &'g Grammar,
    word: String,
    tree: DerivationTree,
    frontier: VecDeque<NodeId>,
    visited: HashMap<String, NodeId>,
    stats: SearchStats,
}

impl<'g> Search<'g> {
    /// A word with any symbol outside the terminal alphabet starts with an
    /// empty frontier, so the first step reports `NotFound`.
    pub fn new(grammar: &'g Grammar, word: &str) -> Self {
        let mut tree = DerivationTree::new();
        let root = tree.root(grammar.start().to_string());

        let mut frontier = VecDeque::new();
        if let Some(symbol) = word.chars().find(|&c| !grammar.is_terminal(c)) {
            log_debug!("`{}` contains `{}`, which is not a terminal", word, symbol);
        } else {
            frontier.push_back(root);
        }

        Search {
            grammar,
            word: word.to_string(),
            tree,
            frontier,
            visited: HashMap::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[cfg(test)]
    pub fn tree(&self) -> &DerivationTree {
        &self.tree
    }

    // Expressions that were admitted to the frontier, including the root
    #[cfg(test)]
    pub fn visited(&self) -> impl Iterator<Item = &str> + '_ {
        self.visited.keys().map(String::as_str)
    }

    // Checks a new child against both pruning criteria
    fn admits(&mut self, expression: &str) -> bool {
        if self.visited.contains_key(expression) {
            self.stats.duplicates += 1;
            return false;
        }

        let pattern = FeasibilityPattern::new(self.grammar, expression);
        if !pattern.admits(&self.word) {
            log_trace!("Pruned `{}`: `{}` does not match", expression, pattern.as_str());
            self.stats.infeasible += 1;
            return false;
        }

        true
    }

    /// Takes one node off the frontier. Returns `None` while the search is
    /// still running.
    pub fn step(&mut self) -> Option<SearchResult> {
        let Some(id) = self.frontier.pop_front() else {
            return Some(SearchResult::NotFound);
        };
        self.stats.expanded += 1;

        let expression = self.tree.get(id).expression.clone();
        self.visited.entry(expression.clone()).or_insert(id);

        if expression == self.word {
            return Some(SearchResult::Found(self.tree.derivation(id)));
        }

        for (rule, child) in expand(self.grammar, &expression) {
            if self.admits(&child) {
                log_trace!("`{}` => `{}` by {}", expression, child, rule);
                let child_id = self.tree.child(id, rule, child.clone());
                self.visited.insert(child, child_id);
                self.frontier.push_back(child_id);
                self.stats.admitted += 1;
            }
        }

        None
    }

    pub fn run(&mut self) -> SearchResult {
        loop {
            if let Some(result) = self.step() {
                self.log_finished(&result);
                return result;
            }
        }
    }

    fn log_finished(&self, result: &SearchResult) {
        log_debug!(
            "Search for `{}` {} after {} expansions ({} admitted, {} duplicates, {} infeasible)",
            self.word,
            if result.is_found() { "succeeded" } else { "failed" },
            self.stats.expanded,
            self.stats.admitted,
            self.stats.duplicates,
            self.stats.infeasible
        );
    }
}

/// Decides whether `word` is derivable from `grammar`, returning the first
/// derivation found. May not terminate, see [`Search`].
pub fn search(grammar: &Grammar, word: &str) -> SearchResult {
    Search::new(grammar, word).run()
}

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct SearchLimits {
    // Stop after taking this many nodes off the frontier
    pub max_expansions: Option<usize>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    Completed(SearchResult),
    LimitReached { expanded: usize },
    Interrupted { expanded: usize },
}

/// Runs a search that can be cut short. `limits` and `interrupted` are
/// checked before every frontier pop; neither changes the order in which
/// forms are explored, so a completed bounded search agrees with [`search`].
pub fn search_bounded(
    grammar: &Grammar,
    word: &str,
    limits: SearchLimits,
    mut interrupted: impl FnMut() -> bool,
) -> Outcome {
    let mut search = Search::new(grammar, word);

    loop {
        let expanded = search.stats().expanded;
        if limits.max_expansions.is_some_and(|max| expanded >= max) {
            log_info!("Gave up on `{}` after {} expansions", word, expanded);
            return Outcome::LimitReached { expanded };
        }
        if interrupted() {
            return Outcome::Interrupted { expanded };
        }

        if let Some(result) = search.step() {
            search.log_finished(&result);
            return Outcome::Completed(result);
        }
    }
}
