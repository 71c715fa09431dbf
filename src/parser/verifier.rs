use itertools::Itertools;

use super::{Grammar, Location, Production, Rule};

// A nonterminal that is used somewhere but can never be rewritten
#[derive(Debug, PartialEq)]
pub struct DeadEnd {
    pub symbol: char,
    pub location: Location
}

fn get_production_dead_ends(production: &Production, location: &Location, grammar: &Grammar) -> Vec<DeadEnd> {
    // Keep only the nonterminals of the right hand side, then filter out
    // the ones that have at least one rule
    production.rhs.chars()
        .filter(|&symbol| grammar.is_nonterminal(symbol))
        .filter(|&symbol| !grammar.has_rules(symbol))
        .map(|symbol| DeadEnd {
            symbol,
            location: location.to_owned()
        })
        .collect()
}

pub fn get_dead_ends(grammar: &Grammar, rules: &[Rule], file: &Location) -> Vec<DeadEnd> {
    let start = (!grammar.has_rules(grammar.start())).then(|| DeadEnd {
        symbol: grammar.start(),
        location: file.to_owned()
    });

    // Report each symbol once, at its first use
    start.into_iter()
        .chain(rules.iter().flat_map(|rule| get_production_dead_ends(&rule.production, &rule.location, grammar)))
        .unique_by(|dead_end| dead_end.symbol)
        .collect()
}

// Dead ends are legal: the search simply never expands past them
pub fn verify_rules(grammar: &Grammar, rules: &[Rule], file: &Location) {
    for dead_end in get_dead_ends(grammar, rules, file) {
        log_warn!("[{}]  Nonterminal `{}` has no rules and can never be rewritten", dead_end.location, dead_end.symbol);
    }
}
