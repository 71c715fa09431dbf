/*
    This module parses grammar description files
*/

mod lexer;
mod verifier;

use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;

use crate::error_handling::*;
use crate::grammar::*;
use verifier::verify_rules;

#[derive(Debug, Error, PartialEq)]
pub enum CompileErrorType {
    // The file ended before the named part of the description
    #[error("Expected the {0} but the file ended")]
    UnexpectedEnd(&'static str),
    #[error("`{0}` is not a count")]
    BadCount(String),
    #[error("Expected {expected} symbols but found {found}")]
    CountMismatch { expected: usize, found: usize },
    #[error("`{0}` appears twice in the same alphabet")]
    DuplicateSymbol(char),
    #[error("`{0}` is declared as both a terminal and a nonterminal")]
    TerminalNonterminal(char),
    // The empty word marker can not be a symbol of the grammar
    #[error("`{0}` is reserved for the empty word")]
    ReservedSymbol(char),
    #[error("`{0}` is not a single symbol")]
    NotASymbol(String),
    #[error("The start symbol `{0}` is not a nonterminal")]
    StartNotNonterminal(char),
    #[error("Expected a rule of the form `LHS RHS`")]
    MissingRuleField,
    #[error("Unexpected `{0}` after the right hand side of a rule")]
    UnexpectedRuleField(String),
    #[error("`{0}` on the left hand side of a rule is not a nonterminal")]
    LhsNotNonterminal(String),
    #[error("`{0}` is neither a terminal nor a nonterminal")]
    UndeclaredSymbol(char),
    #[error("`@` must be the whole right hand side of a rule")]
    MisplacedEmptyWord,
    #[error("Expected {expected} rules but found {found}")]
    RuleCountMismatch { expected: usize, found: usize },
    // There was an issue with reading a file
    #[error("File error: {message}")]
    FileError { kind: std::io::ErrorKind, message: String },
}

impl ErrorType for CompileErrorType {}

impl From<std::io::Error> for CompileErrorType {
    fn from(error: std::io::Error) -> Self {
        CompileErrorType::FileError { kind: error.kind(), message: error.to_string() }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::file(file),
        error: error.into()
    }
}

fn is_description_line(line: &String) -> bool {
    !line.trim().is_empty() && !line.starts_with(';')
}

// Returns an iterator over the meaningful lines of a file, with the io
// errors wrapped in CompileError and enumerated
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_description_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

#[cfg(test)]
fn text_line_nums(text: &str) -> impl Iterator<Item = (usize, LineResult<String>)> + '_ {
    text.lines()
        .map(str::to_string)
        .enumerate()
        .filter(|(_, line)| is_description_line(line))
        .map(|(num, line)| (num + 1, Ok(line)))
}

// A rule as it was written, kept with its line for the verifier
#[derive(PartialEq, Debug)]
struct Rule {
    production: Production,
    location: Location
}

// Walks the header lines one at a time
struct Reader<I> {
    lines: I,
    file: Location
}

impl<I: Iterator<Item = (usize, LineResult<String>)>> Reader<I> {
    fn next_line(&mut self, what: &'static str) -> LineResult<(Location, String)> {
        match self.lines.next() {
            Some((num, line)) => line.map(|line| (self.file.at(num), line)),
            None => Err(CompileError {
                location: self.file.clone(),
                error: CompileErrorType::UnexpectedEnd(what)
            })
        }
    }

    fn parse_with<T>(&mut self, what: &'static str, parse: impl FnOnce(&str) -> Result<T>) -> LineResult<(Location, T)> {
        let (location, line) = self.next_line(what)?;
        parse(&line)
            .map(|value| (location.clone(), value))
            .map_err(|error| CompileError { location, error })
    }

    // An empty alphabet is a blank line, and blank lines are skipped, so
    // there is no line to read for it
    fn read_alphabet(&mut self, what: &'static str, count: usize) -> LineResult<(Location, Vec<char>)> {
        if count == 0 {
            return Ok((self.file.clone(), Vec::new()));
        }
        self.parse_with(what, |line| parse_alphabet(line, count))
    }
}

fn parse_alphabet(line: &str, count: usize) -> Result<Vec<char>> {
    let symbols = lexer::lex_alphabet(line);

    if symbols.len() != count {
        return Err(CompileErrorType::CountMismatch { expected: count, found: symbols.len() });
    }
    if let Some(&reserved) = symbols.iter().find(|&&c| c == EMPTY_WORD) {
        return Err(CompileErrorType::ReservedSymbol(reserved));
    }
    if let Some(duplicate) = symbols.iter().duplicates().next() {
        return Err(CompileErrorType::DuplicateSymbol(*duplicate));
    }

    Ok(symbols)
}

struct Header {
    terminals: Vec<char>,
    nonterminals: Vec<char>,
    start: char,
    rule_count: usize
}

fn parse_header<I: Iterator<Item = (usize, LineResult<String>)>>(reader: &mut Reader<I>) -> LineResult<Header> {
    let (_, terminal_count) = reader.parse_with("terminal count", lexer::lex_count)?;
    let terminals = reader.read_alphabet("terminals", terminal_count)?.1;

    let (_, nonterminal_count) = reader.parse_with("nonterminal count", lexer::lex_count)?;
    let (location, nonterminals) = reader.read_alphabet("nonterminals", nonterminal_count)?;
    if let Some(&shared) = nonterminals.iter().find(|c| terminals.contains(c)) {
        return Err(CompileError { location, error: CompileErrorType::TerminalNonterminal(shared) });
    }

    let (_, start) = reader.parse_with("start symbol", |line| {
        let start = lexer::lex_symbol(line)?;
        if nonterminals.contains(&start) {
            Ok(start)
        } else {
            Err(CompileErrorType::StartNotNonterminal(start))
        }
    })?;

    let (_, rule_count) = reader.parse_with("rule count", lexer::lex_count)?;

    Ok(Header { terminals, nonterminals, start, rule_count })
}

fn parse_rule(line: &str, header: &Header) -> Result<Production> {
    let (lhs, rhs) = lexer::lex_rule(line)?;

    let symbol = lhs.chars().exactly_one().ok();
    let lhs = match symbol {
        Some(c) if header.nonterminals.contains(&c) => c,
        _ => return Err(CompileErrorType::LhsNotNonterminal(lhs)),
    };

    if rhs == EMPTY_WORD.to_string() {
        return Ok(Production::new(lhs, ""));
    }

    for c in rhs.chars() {
        if c == EMPTY_WORD {
            return Err(CompileErrorType::MisplacedEmptyWord);
        }
        if !header.terminals.contains(&c) && !header.nonterminals.contains(&c) {
            return Err(CompileErrorType::UndeclaredSymbol(c));
        }
    }

    Ok(Production::new(lhs, rhs))
}

fn parse_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> FileResult<Grammar> {
    let mut reader = Reader { lines, file: Location::file(path.to_path_buf()) };
    let header = parse_header(&mut reader).map_err(|error| vec![error])?;

    let mut rules = Vec::with_capacity(header.rule_count);
    let mut errors = Vec::new();
    let mut found = 0;

    for (num, line) in reader.lines.by_ref().take(header.rule_count) {
        found += 1;
        let location = reader.file.at(num);
        match line.and_then(|line| {
            parse_rule(&line, &header).map_err(|error| CompileError { location: location.clone(), error })
        }) {
            Ok(production) => rules.push(Rule { production, location }),
            Err(error) => errors.push(error),
        }
    }

    // Lines left over after the announced rules
    let leftover = reader.lines.collect_vec();
    if found < header.rule_count || !leftover.is_empty() {
        let location = leftover.first()
            .map_or_else(|| reader.file.clone(), |(num, _)| reader.file.at(*num));
        errors.push(CompileError {
            location,
            error: CompileErrorType::RuleCountMismatch {
                expected: header.rule_count,
                found: found + leftover.len()
            }
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let grammar = Grammar::new(
        header.terminals,
        header.nonterminals,
        header.start,
        rules.iter().map(|rule| rule.production.clone())
    );
    verify_rules(&grammar, &rules, &reader.file);

    Ok(grammar)
}

#[cfg(test)]
pub fn parse_str(text: &str, path: &Path) -> FileResult<Grammar> {
    parse_lines(text_line_nums(text), path)
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_lines(file_line_nums(file, path), path)
}
