/*
    This module talks to the user: it checks words and prints the verdicts
*/

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use rand::prelude::*;

use crate::generator::sample;
use crate::grammar::Grammar;
use crate::interrupt::Interrupt;
use crate::search::{search, search_bounded, Derivation, Outcome, SearchLimits, SearchResult};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Verdict {
    Valid,
    NotValid,
    // The expansion limit was hit before a decision
    Undecided,
    // Ctrl-C during the search
    Interrupted,
}

pub struct Session<'g> {
    pub grammar: &'g Grammar,
    pub limits: SearchLimits,
    pub show_rules: bool,
    pub interrupt: Option<&'g Interrupt>,
}

impl Session<'_> {
    fn write_derivation(&self, derivation: &Derivation, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "\tProduction of the word: {}", derivation)?;
        if self.show_rules {
            for step in derivation.steps().iter().skip(1) {
                if let Some(rule) = &step.rule {
                    writeln!(out, "\t\t{:<12} by {}", step.expression, rule)?;
                }
            }
        }
        Ok(())
    }

    pub fn check(&self, word: &str, out: &mut impl Write) -> io::Result<Verdict> {
        log_info!("Checking `{}`", word);

        let outcome = match self.interrupt {
            Some(interrupt) => {
                let _guard = interrupt.searching();
                search_bounded(self.grammar, word, self.limits, || interrupt.is_requested())
            }
            None if self.limits == SearchLimits::default() => Outcome::Completed(search(self.grammar, word)),
            None => search_bounded(self.grammar, word, self.limits, || false),
        };

        match outcome {
            Outcome::Completed(SearchResult::Found(derivation)) => {
                writeln!(out, "[+] The word IS valid!")?;
                self.write_derivation(&derivation, out)?;
                Ok(Verdict::Valid)
            }
            Outcome::Completed(SearchResult::NotFound) => {
                writeln!(out, "[+] The word is NOT valid!")?;
                Ok(Verdict::NotValid)
            }
            Outcome::LimitReached { expanded } => {
                writeln!(out, "[-] Gave up after {} expansions without a verdict", expanded)?;
                Ok(Verdict::Undecided)
            }
            Outcome::Interrupted { expanded } => {
                log_info!("Interrupted `{}` after {} expansions", word, expanded);
                Ok(Verdict::Interrupted)
            }
        }
    }

    /// Prompts for words until the user answers `n` or input ends. Breaks
    /// early if a search is interrupted.
    pub fn interactive(&self, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<ControlFlow<()>> {
        loop {
            write!(out, "Enter the word: ")?;
            out.flush()?;
            let Some(word) = read_line(input)? else { break };

            if self.check(&word, out)? == Verdict::Interrupted {
                return Ok(ControlFlow::Break(()));
            }

            write!(out, "\nDo you want to check another word? y/n: ")?;
            out.flush()?;
            match read_line(input)? {
                Some(choice) if choice.trim() != "n" => continue,
                _ => break,
            }
        }

        writeln!(out)?;
        Ok(ControlFlow::Continue(()))
    }

    // Returns how many words were printed
    pub fn sample(&self, rng: &mut impl Rng, amount: u32, max_steps: usize, out: &mut impl Write) -> io::Result<u32> {
        let mut printed = 0;
        for _ in 0..amount {
            match sample(self.grammar, rng, max_steps) {
                Ok(derivation) => {
                    writeln!(out, "{}", derivation.word())?;
                    self.write_derivation(&derivation, out)?;
                    printed += 1;
                }
                Err(error) => log_warn!("Skipped a sample: {}", error),
            }
        }
        Ok(printed)
    }
}

// A line without its line ending, or `None` at the end of input
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::rngs::StdRng;

    use super::*;
    use crate::grammar::fixtures::*;

    fn session(grammar: &Grammar) -> Session<'_> {
        Session { grammar, limits: SearchLimits::default(), show_rules: false, interrupt: None }
    }

    fn check(session: &Session, word: &str) -> (Verdict, String) {
        let mut out = Vec::new();
        let verdict = session.check(word, &mut out).unwrap();
        (verdict, String::from_utf8(out).unwrap())
    }

    #[test]
    fn valid_word_prints_its_production() {
        let grammar = anbn();
        let (verdict, output) = check(&session(&grammar), "ab");

        assert_eq!(verdict, Verdict::Valid);
        assert_eq!(output, "[+] The word IS valid!\n\tProduction of the word: S -> aSb -> ab\n");
    }

    #[test]
    fn invalid_word() {
        let grammar = anbn();
        let (verdict, output) = check(&session(&grammar), "aab");

        assert_eq!(verdict, Verdict::NotValid);
        assert_eq!(output, "[+] The word is NOT valid!\n");
    }

    #[test]
    fn rules_are_listed_per_step() {
        let grammar = anbn();
        let session = Session { show_rules: true, ..session(&grammar) };
        let (_, output) = check(&session, "ab");

        assert!(output.contains("\t\taSb          by S -> aSb\n"));
        assert!(output.contains("\t\tab           by S -> @\n"));
    }

    #[test]
    fn limit_leaves_the_word_undecided() {
        let grammar = anbn();
        let session = Session { limits: SearchLimits { max_expansions: Some(1) }, ..session(&grammar) };
        let (verdict, output) = check(&session, "aaabbb");

        assert_eq!(verdict, Verdict::Undecided);
        assert_eq!(output, "[-] Gave up after 1 expansions without a verdict\n");
    }

    #[test]
    fn interrupt_stops_the_check() {
        let grammar = anbn();
        let interrupt = Interrupt::default();
        let session = Session { interrupt: Some(&interrupt), ..session(&grammar) };

        assert_eq!(check(&session, "ab").0, Verdict::Valid);

        interrupt.request();
        assert_eq!(check(&session, "ab"), (Verdict::Interrupted, String::new()));
    }

    #[test]
    fn interrupt_ends_the_interactive_loop() {
        let grammar = anbn();
        let interrupt = Interrupt::default();
        interrupt.request();
        let session = Session { interrupt: Some(&interrupt), ..session(&grammar) };

        let mut input = Cursor::new("ab\ny\nab\n");
        let mut out = Vec::new();
        let flow = session.interactive(&mut input, &mut out).unwrap();

        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(String::from_utf8(out).unwrap(), "Enter the word: ");
    }

    #[test]
    fn interactive_loop_stops_on_no() {
        let grammar = anbn();
        let mut input = Cursor::new("ab\ny\nba\nn\nab\n");
        let mut out = Vec::new();
        let flow = session(&grammar).interactive(&mut input, &mut out).unwrap();
        assert_eq!(flow, ControlFlow::Continue(()));

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Enter the word: ").count(), 2);
        assert!(output.contains("IS valid"));
        assert!(output.contains("NOT valid"));
    }

    #[test]
    fn interactive_loop_stops_at_end_of_input() {
        let grammar = empty_only();
        let mut input = Cursor::new("\r\n");
        let mut out = Vec::new();
        session(&grammar).interactive(&mut input, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Production of the word: S -> @"));
        assert!(output.ends_with("y/n: \n"));
    }

    #[test]
    fn samples_are_printed_with_derivations() {
        let grammar = anbn();
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = Vec::new();
        let printed = session(&grammar).sample(&mut rng, 5, 50, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Production of the word: S").count() as u32, printed);
    }
}
