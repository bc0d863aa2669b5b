use std::io::{self, BufRead, Write};

use crate::regex::Regex;

/// Copies every line of `input` accepted by `regex` to `output`.
///
/// Lines are split on `\n` and matched without it; a last line with no
/// terminator still counts. Returns how many lines were written.
pub fn filter_lines<R, W>(regex: &Regex, input: R, output: W) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut output = io::BufWriter::new(output);
    let mut matched = 0;

    for line in input.split(b'\n') {
        let line = line?;
        if regex.find_match(&line) {
            output.write_all(&line)?;
            output.write_all(b"\n")?;
            matched += 1;
        }
    }

    output.flush()?;
    Ok(matched)
}
