use std::ffi::OsString;
use std::io::{self, ErrorKind};
use std::process;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use sgrep::{filter_lines, parse_regex, Regex};

fn build_cli() -> Command {
    Command::new("sgrep")
        .about("Print the lines of standard input that match a regular expression")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("pattern")
                .value_name("PATTERN")
                .required(true)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(OsString))
                .help("Regular expression using ^ $ . * + ? | ( ) [ ] \\"),
        )
        .arg(
            Arg::new("dump_nfa")
                .long("dump-nfa")
                .action(ArgAction::SetTrue)
                .help("Print the compiled automaton to stderr before filtering"),
        )
}

/// Compiles the pattern and filters stdin. Syntax errors surface as
/// [`sgrep::SyntaxError`] before any input is read.
fn run(matches: &ArgMatches) -> Result<usize> {
    let pattern = matches
        .get_one::<OsString>("pattern")
        .context("missing PATTERN")?;
    let regex = parse_regex(pattern.as_encoded_bytes())?;

    if matches.get_flag("dump_nfa") {
        eprintln!("pattern: {}", regex);
        eprint!("{}", regex.automaton());
    }

    filter(&regex)
}

fn filter(regex: &Regex) -> Result<usize> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    filter_lines(regex, stdin.lock(), stdout.lock()).context("failed to filter standard input")
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}

/// `--help` and `--version` also arrive as errors but are not failures.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// A reader that closed the pipe early is not a failure.
fn exit_code(err: &anyhow::Error) -> i32 {
    if is_broken_pipe(err) {
        0
    } else {
        1
    }
}

// Usage: <input> | sgrep <pattern>
fn main() {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let code = match err.print() {
                Ok(()) => usage_exit_code(&err),
                Err(_) => 1,
            };
            process::exit(code);
        }
    };

    if let Err(err) = run(&matches) {
        let code = exit_code(&err);
        if code != 0 {
            eprintln!("error: {:#}", err);
        }
        process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pattern() {
        let matches = build_cli().try_get_matches_from(["sgrep", "a*b"]).unwrap();
        let pattern = matches.get_one::<OsString>("pattern").unwrap();
        assert_eq!(pattern, "a*b");
        assert!(!matches.get_flag("dump_nfa"));
    }

    #[test]
    fn pattern_may_start_with_hyphen() {
        let matches = build_cli().try_get_matches_from(["sgrep", "-x-"]).unwrap();
        assert_eq!(matches.get_one::<OsString>("pattern").unwrap(), "-x-");
    }

    #[test]
    fn dump_flag() {
        let matches = build_cli()
            .try_get_matches_from(["sgrep", "--dump-nfa", "abc"])
            .unwrap();
        assert!(matches.get_flag("dump_nfa"));
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        let missing = build_cli().try_get_matches_from(["sgrep"]).unwrap_err();
        assert!(missing.use_stderr());

        let extra = build_cli()
            .try_get_matches_from(["sgrep", "a", "b"])
            .unwrap_err();
        assert!(extra.use_stderr());
    }

    #[test]
    fn help_and_version_exit_zero() {
        let help = build_cli().try_get_matches_from(["sgrep", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);
        let version = build_cli().try_get_matches_from(["sgrep", "--version"]).unwrap_err();
        assert_eq!(usage_exit_code(&version), 0);
    }

    #[test]
    fn usage_errors_exit_one() {
        let missing = build_cli().try_get_matches_from(["sgrep"]).unwrap_err();
        assert_eq!(usage_exit_code(&missing), 1);
    }

    #[test]
    fn syntax_error_stops_before_reading_input() {
        let matches = build_cli().try_get_matches_from(["sgrep", "(ab"]).unwrap();
        let err = run(&matches).unwrap_err();
        assert!(err.downcast_ref::<sgrep::SyntaxError>().is_some());
        assert_eq!(exit_code(&err), 1);
        assert_eq!(
            format!("{:#}", err),
            "expected ')' and got end of pattern at offset 3"
        );
    }

    #[test]
    fn broken_pipe_exits_zero() {
        let err = anyhow::Error::new(io::Error::from(ErrorKind::BrokenPipe)).context("writing");
        assert_eq!(exit_code(&err), 0);
        let other = anyhow::Error::new(io::Error::from(ErrorKind::Other)).context("reading");
        assert_eq!(exit_code(&other), 1);
    }

    #[test]
    fn broken_pipe_is_recognized_through_context() {
        let err = anyhow::Error::new(io::Error::from(ErrorKind::BrokenPipe)).context("writing");
        assert!(is_broken_pipe(&err));
        let other = anyhow::Error::new(io::Error::from(ErrorKind::Other));
        assert!(!is_broken_pipe(&other));
    }
}
