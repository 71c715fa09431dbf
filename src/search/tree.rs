use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::{Production, EMPTY_WORD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

// One sentential form and how it was reached
#[derive(Debug, PartialEq)]
pub struct Node {
    pub expression: String,
    pub parent: Option<NodeId>,
    pub rule: Option<Production>,
}

/// Arena owning every node created during one search. Nodes are never
/// mutated or removed, so a `NodeId` stays valid for the arena's lifetime.
#[derive(Debug, Default)]
pub struct DerivationTree {
    nodes: Vec<Node>,
}

impl DerivationTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&mut self, expression: String) -> NodeId {
        self.push(Node { expression, parent: None, rule: None })
    }

    pub fn child(&mut self, parent: NodeId, rule: Production, expression: String) -> NodeId {
        self.push(Node { expression, parent: Some(parent), rule: Some(rule) })
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // Follows parent links from `id` up to the root
    fn ancestry(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(Some(self.get(id)), move |node| node.parent.map(|parent| self.get(parent)))
    }

    /// Rebuilds the derivation that produced `id`, root first.
    pub fn derivation(&self, id: NodeId) -> Derivation {
        let mut steps = self.ancestry(id)
            .map(|node| Step { expression: node.expression.clone(), rule: node.rule.clone() })
            .collect_vec();
        steps.reverse();

        Derivation { steps }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Step {
    pub expression: String,
    // `None` only for the start symbol
    pub rule: Option<Production>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Derivation {
    steps: Vec<Step>,
}

impl Derivation {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[cfg(test)]
    pub fn expressions(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.expression.as_str()).collect()
    }

    #[cfg(test)]
    pub fn productions(&self) -> Vec<&Production> {
        self.steps.iter().filter_map(|step| step.rule.as_ref()).collect()
    }

    // The derived word, i.e. the last expression
    pub fn word(&self) -> &str {
        self.steps.last().map_or("", |step| step.expression.as_str())
    }
}

fn display_expression(expression: &str) -> String {
    if expression.is_empty() {
        EMPTY_WORD.to_string()
    } else {
        expression.to_string()
    }
}

impl Display for Derivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.steps.iter().map(|step| display_expression(&step.expression)).join(" -> "))
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn derivation(steps: &[(&str, Option<(char, &str)>)]) -> Derivation {
        Derivation {
            steps: steps.iter()
                .map(|(expression, rule)| Step {
                    expression: expression.to_string(),
                    rule: rule.map(|(lhs, rhs)| Production::new(lhs, rhs)),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_reads_root_first() {
        let mut tree = DerivationTree::new();
        let root = tree.root("S".to_string());
        let middle = tree.child(root, Production::new('S', "aSb"), "aSb".to_string());
        tree.child(root, Production::new('S', ""), String::new());
        let leaf = tree.child(middle, Production::new('S', ""), "ab".to_string());

        let derivation = tree.derivation(leaf);
        assert_eq!(derivation.expressions(), vec!["S", "aSb", "ab"]);
        assert_eq!(derivation.productions(), vec![&Production::new('S', "aSb"), &Production::new('S', "")]);
        assert_eq!(derivation.word(), "ab");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn root_derivation_is_a_single_step() {
        let mut tree = DerivationTree::new();
        let root = tree.root("S".to_string());

        assert_eq!(tree.derivation(root), fixtures::derivation(&[("S", None)]));
        assert_eq!(tree.get(root).parent, None);
    }

    #[test]
    fn display_joins_with_arrows() {
        let derivation = fixtures::derivation(&[
            ("S", None),
            ("aSb", Some(('S', "aSb"))),
            ("ab", Some(('S', ""))),
        ]);
        assert_eq!(derivation.to_string(), "S -> aSb -> ab");

        let erased = fixtures::derivation(&[("S", None), ("", Some(('S', "")))]);
        assert_eq!(erased.to_string(), "S -> @");
    }
}
