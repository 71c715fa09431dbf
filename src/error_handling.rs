use std::fmt::Display;
use std::io::IsTerminal;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    // A location pointing at the whole file rather than one line
    pub fn file(file: PathBuf) -> Self {
        Location { file, line: 0 }
    }

    pub fn at(&self, line: usize) -> Self {
        Location { file: self.file.clone(), line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only colour output that ends up on a terminal
        if std::io::stderr().is_terminal() {
            write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
        } else {
            write!(f, "[{}]  {}", self.location, self.error)
        }
    }
}

pub type Errors<T> = Vec<Error<T>>;

// Prints every error, one per line, in the order they were found
pub fn report<T: ErrorType>(errors: &Errors<T>) {
    for error in errors {
        log_error!("{}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_omits_line_zero() {
        let file = Location::file(PathBuf::from("grammar.cfg"));

        assert_eq!(file.to_string(), "grammar.cfg");
        assert_eq!(file.at(7).to_string(), "grammar.cfg:7");
        assert_eq!(file.at(7).file, file.file);
    }
}
