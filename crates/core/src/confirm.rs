use std::io::{self, BufRead, Read, Write};

/// Longest answer accepted, in bytes, before the terminator. Every
/// recognized answer is ASCII, so this is also its visible length.
pub const MAX_INPUT_LEN: usize = 4;

/// Reads yes/no lines from `input` until one is recognized, writing a
/// re-prompt to `output` after anything else.
///
/// `y`, `ye` and `yes` (any case) confirm; `n` and `no` decline. A line
/// longer than [`MAX_INPUT_LEN`] bytes is discarded, the rest of the line is
/// drained so it cannot leak into the next read, and the user is
/// re-prompted. Lines are read as raw bytes, so input that does not decode
/// as UTF-8 is just another unrecognized answer. End of input declines.
pub fn confirm_changes<R, W>(input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    loop {
        match read_answer(input)? {
            Answer::End => return Ok(false),
            Answer::Token(token) => match parse_yes_no(&token) {
                Some(decision) => return Ok(decision),
                None => {
                    write!(output, "Invalid Input: Expects Yes or No: ")?;
                    output.flush()?;
                }
            },
            Answer::Overflow => {
                write!(output, "Invalid Input: Exceeded input buffer. Expects Yes or No: ")?;
                output.flush()?;
            }
        }
    }
}

enum Answer {
    Token(String),
    Overflow,
    End,
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Answer> {
    let mut line = Vec::new();
    let read = input
        .by_ref()
        .take(MAX_INPUT_LEN as u64 + 1)
        .read_until(b'\n', &mut line)?;
    if read == 0 {
        return Ok(Answer::End);
    }
    if line.last() != Some(&b'\n') && read > MAX_INPUT_LEN {
        // The window filled without a terminator.
        drain_line(input)?;
        return Ok(Answer::Overflow);
    }
    while let Some(&b'\r' | &b'\n') = line.last() {
        line.pop();
    }
    Ok(Answer::Token(String::from_utf8_lossy(&line).into_owned()))
}

fn parse_yes_no(token: &str) -> Option<bool> {
    match token.to_lowercase().as_str() {
        "y" | "ye" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn drain_line<R: BufRead>(input: &mut R) -> io::Result<()> {
    loop {
        let buffer = input.fill_buf()?;
        if buffer.is_empty() {
            return Ok(());
        }
        match buffer.iter().position(|&byte| byte == b'\n') {
            Some(position) => {
                input.consume(position + 1);
                return Ok(());
            }
            None => {
                let length = buffer.len();
                input.consume(length);
            }
        }
    }
}
