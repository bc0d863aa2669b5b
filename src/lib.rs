pub mod charset;
pub mod error;
pub mod grep;
pub mod matcher;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod symbol;

pub use charset::CharSet;
pub use error::SyntaxError;
pub use grep::filter_lines;
pub use nfa::Automaton;
pub use parser::parse_regex;
pub use regex::Regex;
