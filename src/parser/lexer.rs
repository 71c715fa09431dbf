use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

pub fn lex_count(line: &str) -> Result<usize> {
    let text = line.trim();
    text.parse().map_err(|_| CompileErrorType::BadCount(text.to_string()))
}

// Symbols may be written contiguously or separated by whitespace
pub fn lex_alphabet(line: &str) -> Vec<char> {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn lex_symbol(line: &str) -> Result<char> {
    let text = line.trim();
    text.chars()
        .exactly_one()
        .map_err(|_| CompileErrorType::NotASymbol(text.to_string()))
}

fn skip_whitespace(line: &mut impl PeekingNext<Item = char>) {
    line.peeking_take_while(|c| c.is_whitespace()).for_each(drop);
}

fn lex_field(line: &mut impl PeekingNext<Item = char>) -> Option<String> {
    skip_whitespace(line);
    let field: String = line.peeking_take_while(|c| !c.is_whitespace()).collect();
    (!field.is_empty()).then_some(field)
}

// Splits a rule line into its left and right hand sides
pub fn lex_rule(line: &str) -> Result<(String, String)> {
    let mut chars = line.chars().peekable();

    let lhs = lex_field(&mut chars).ok_or(CompileErrorType::MissingRuleField)?;
    let rhs = lex_field(&mut chars).ok_or(CompileErrorType::MissingRuleField)?;

    if let Some(extra) = lex_field(&mut chars) {
        return Err(CompileErrorType::UnexpectedRuleField(extra));
    }

    Ok((lhs, rhs))
}
