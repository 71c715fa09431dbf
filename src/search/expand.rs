use itertools::Itertools;

use crate::grammar::{Grammar, Production};

// Rewrites every occurrence of the production's left hand side at once.
// An empty right hand side erases the symbol.
pub fn apply(expression: &str, production: &Production) -> String {
    expression.replace(production.lhs, &production.rhs)
}

/// Every expression reachable from `expression` by one production, paired
/// with the production used. Nonterminals are visited in order of first
/// occurrence and their rules in declaration order. Since a production
/// rewrites all occurrences of its symbol, repeated occurrences would only
/// repeat the same children, so each distinct symbol is expanded once.
/// Nonterminals without rules contribute nothing.
pub fn expand(grammar: &Grammar, expression: &str) -> Vec<(Production, String)> {
    expression.chars()
        .filter(|&symbol| grammar.is_nonterminal(symbol))
        .unique()
        .flat_map(|symbol| grammar.rules_for(symbol).iter().map(move |rhs| Production::new(symbol, rhs.as_str())))
        .map(|production| {
            let child = apply(expression, &production);
            (production, child)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::fixtures::*;

    #[test]
    fn apply_rewrites_every_occurrence() {
        assert_eq!(apply("aSbS", &Production::new('S', "xy")), "axybxy");
        assert_eq!(apply("SS", &Production::new('S', "")), "");
        assert_eq!(apply("ab", &Production::new('S', "x")), "ab");
    }

    #[test]
    fn expand_follows_rule_order() {
        assert_eq!(expand(&anbn(), "S"), vec![
            (Production::new('S', "aSb"), "aSb".to_string()),
            (Production::new('S', ""), String::new()),
        ]);
    }

    #[test]
    fn expand_visits_symbols_by_first_occurrence() {
        let grammar = Grammar::new(
            ['a', 'b'],
            ['A', 'B'],
            'A',
            [Production::new('A', "a"), Production::new('B', "b"), Production::new('B', "")],
        );

        assert_eq!(expand(&grammar, "BAB"), vec![
            (Production::new('B', "b"), "bAb".to_string()),
            (Production::new('B', ""), "A".to_string()),
            (Production::new('A', "a"), "BaB".to_string()),
        ]);
    }

    #[test]
    fn empty_word_can_erase_the_whole_expression() {
        assert_eq!(expand(&empty_only(), "S"), vec![(Production::new('S', ""), String::new())]);
    }

    #[test]
    fn terminals_and_dead_ends_have_no_children() {
        let grammar = Grammar::new(['a'], ['S', 'D'], 'S', [Production::new('S', "aD")]);

        assert!(expand(&grammar, "aa").is_empty());
        assert!(expand(&grammar, "aD").is_empty());
        assert!(expand(&grammar, "").is_empty());
    }
}
