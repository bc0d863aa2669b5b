use nom::{
    branch::alt,
    character::complete::{char, one_of},
    combinator::{eof, map, not, opt, peek, value},
    error::{ErrorKind, ParseError},
    multi::many0,
    number::complete::u8 as any_byte,
    sequence::{delimited, preceded},
    IResult,
};

use crate::charset::CharSet;
use crate::error::{Found, Result, SyntaxError};
use crate::nfa::Automaton;
use crate::regex::{Anchors, Regex};

type Input<'a> = &'a [u8];
type PResult<'a, T> = IResult<Input<'a>, T, PatternError<'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Problem {
    Expected(u8),
    DanglingEscape,
    /// Recoverable combinator miss; steers `alt` and `many0` only.
    Backtrack,
}

/// Parser-side error; `at` is the unconsumed input where the problem was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PatternError<'a> {
    problem: Problem,
    at: Input<'a>,
}

impl<'a> PatternError<'a> {
    fn into_syntax_error(self, pattern: &[u8]) -> SyntaxError {
        let offset = pattern.len() - self.at.len();
        match self.problem {
            Problem::Expected(expected) => SyntaxError::Expected {
                expected,
                found: Found(self.at.first().copied()),
                offset,
            },
            Problem::DanglingEscape => SyntaxError::DanglingEscape { offset },
            Problem::Backtrack => unreachable!("atom accepts every byte, so only hard failures escape"),
        }
    }
}

impl<'a> ParseError<Input<'a>> for PatternError<'a> {
    fn from_error_kind(input: Input<'a>, _kind: ErrorKind) -> Self {
        PatternError {
            problem: Problem::Backtrack,
            at: input,
        }
    }

    fn append(_input: Input<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

fn fail<T>(problem: Problem, at: Input<'_>) -> PResult<'_, T> {
    Err(nom::Err::Failure(PatternError { problem, at }))
}

/// Compiles `pattern` into a [`Regex`].
///
/// Parsing stops after the optional closing `$`; whatever follows it, or a
/// stray `)` that ends the outermost alternation, is ignored.
pub fn parse_regex(pattern: impl AsRef<[u8]>) -> Result<Regex> {
    let pattern = pattern.as_ref();
    match regex(pattern) {
        Ok((_, (anchors, nfa))) => Ok(Regex::new(pattern.to_vec(), anchors, nfa)),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e.into_syntax_error(pattern)),
        Err(nom::Err::Incomplete(_)) => unreachable!("complete parsers never ask for more input"),
    }
}

/// Without `^` the core is prefixed by `.*`, without `$` it is followed by
/// one, which turns whole-line acceptance into substring search.
fn regex(input: Input<'_>) -> PResult<'_, (Anchors, Automaton)> {
    let (input, start) = opt(char('^'))(input)?;
    let (input, core) = union(input)?;
    let (input, end) = opt(char('$'))(input)?;

    let anchors = Anchors {
        start: start.is_some(),
        end: end.is_some(),
    };
    let mut nfa = core;
    if !anchors.start {
        nfa = any_run().concat(&nfa);
    }
    if !anchors.end {
        nfa = nfa.concat(&any_run());
    }
    Ok((input, (anchors, nfa)))
}

fn any_run() -> Automaton {
    Automaton::wildcard().kleene()
}

fn union(input: Input<'_>) -> PResult<'_, Automaton> {
    let (input, first) = concat(input)?;
    let (input, rest) = many0(preceded(char('|'), union))(input)?;

    Ok((input, rest.into_iter().fold(first, |acc, rhs| acc.union(&rhs))))
}

fn concat(input: Input<'_>) -> PResult<'_, Automaton> {
    let (input, first) = repeat(input)?;
    let (input, rest) = many0(preceded(not(boundary), repeat))(input)?;

    Ok((input, rest.into_iter().fold(first, |acc, next| acc.concat(&next))))
}

/// Where a concatenation stops. Newline is ordinary data.
fn boundary(input: Input<'_>) -> PResult<'_, ()> {
    alt((value((), one_of("|)$")), value((), eof)))(input)
}

fn repeat(input: Input<'_>) -> PResult<'_, Automaton> {
    let (input, base) = atom(input)?;
    let (input, quantifier) = opt(one_of("*+?"))(input)?;

    let result = match quantifier {
        Some('*') => base.kleene(),
        Some('+') => base.plus(),
        Some('?') => base.optional(),
        _ => base,
    };

    Ok((input, result))
}

/// Any byte that is not `[`, `(`, `.` or `\` is a literal, including `|`,
/// `)`, `$` and quantifiers. Only the end of the pattern yields ε.
fn atom(input: Input<'_>) -> PResult<'_, Automaton> {
    alt((
        map(eof, |_| Automaton::empty_string()),
        map(char_class, Automaton::class),
        grouped,
        map(char('.'), |_| Automaton::wildcard()),
        map(escaped_byte, Automaton::literal),
        map(any_byte, Automaton::literal),
    ))(input)
}

fn grouped(input: Input<'_>) -> PResult<'_, Automaton> {
    delimited(char('('), union, expect(b')'))(input)
}

fn escaped_byte(input: Input<'_>) -> PResult<'_, u8> {
    let (rest, _) = char('\\')(input)?;
    match rest.split_first() {
        Some((&byte, rest)) => Ok((rest, byte)),
        None => fail(Problem::DanglingEscape, input),
    }
}

fn char_class(input: Input<'_>) -> PResult<'_, CharSet> {
    let (input, _) = char('[')(input)?;
    let (input, negated) = opt(char('^'))(input)?;
    let (input, items) = many0(preceded(not(char(']')), class_item))(input)?;
    let (input, _) = expect(b']')(input)?;

    let mut set = CharSet::new();
    for item in &items {
        set.union(item);
    }
    if negated.is_some() {
        set.complement();
    }
    Ok((input, set))
}

/// `x`, `x-y`, or `x-` right before the closing bracket, which keeps the
/// dash as a member.
fn class_item(input: Input<'_>) -> PResult<'_, CharSet> {
    let (input, lo) = class_byte(input)?;
    let (input, dash) = opt(char('-'))(input)?;
    if dash.is_none() {
        return Ok((input, CharSet::single(lo)));
    }

    if peek(char::<_, PatternError>(']'))(input).is_ok() {
        let mut set = CharSet::single(lo);
        set.insert(b'-');
        return Ok((input, set));
    }
    if input.is_empty() {
        return fail(Problem::Expected(b']'), input);
    }
    let (input, hi) = class_byte(input)?;
    Ok((input, CharSet::range(lo, hi)))
}

fn class_byte(input: Input<'_>) -> PResult<'_, u8> {
    alt((escaped_byte, any_byte))(input)
}

/// Consumes `delimiter` or fails the whole parse.
fn expect<'a>(delimiter: u8) -> impl Fn(Input<'a>) -> PResult<'a, u8> {
    move |input: Input<'a>| match input.split_first() {
        Some((&byte, rest)) if byte == delimiter => Ok((rest, byte)),
        _ => fail(Problem::Expected(delimiter), input),
    }
}
