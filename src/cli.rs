use std::path::PathBuf;

use clap::Parser;

use crate::search::SearchLimits;

#[derive(Parser)]
#[command(version, about = "Checks whether words can be derived from a context-free grammar")]
pub struct Cli {
    /// File containing the grammar description
    pub file: PathBuf,

    /// Word to check; may be repeated (default: ask interactively)
    #[arg(short, long = "word", value_name = "WORD")]
    pub words: Vec<String>,

    /// Give up on a word after this many expansions (default: never)
    #[arg(long, value_name = "COUNT")]
    pub max_expansions: Option<usize>,

    /// Show the production used at every step of a derivation
    #[arg(short, long)]
    pub rules: bool,

    /// Print this many randomly derived words instead of checking any
    #[arg(short, long, value_name = "AMOUNT")]
    pub sample: Option<u32>,

    /// Give up on a sample after this many steps
    #[arg(long, value_name = "STEPS", default_value_t = 32)]
    pub sample_steps: usize,

    /// Log more; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8
}

impl Cli {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits { max_expansions: self.max_expansions }
    }
}
