//! Line-oriented console protocol.
//!
//! Every question is either a bounded integer menu code or a literal
//! `yes` / `no`. Invalid answers print a diagnostic and the *same* question
//! is asked again; end of input ends the conversation (a code prompt
//! returns `None`, a yes/no prompt answers "no").

use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

use bikeshare_core::error::{BikeshareError, Result};

/// Prefix of top-level diagnostics.
pub const ERROR_PREFIX: &str = "*> ERROR :";

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a menu code and check it lies within `min..=max`.
pub fn parse_code(input: &str, min: u32, max: u32) -> Result<u32> {
    let trimmed = input.trim();
    let out_of_range = || BikeshareError::InputRange {
        value: trimmed.to_string(),
        min,
        max,
    };

    let value: i64 = trimmed.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => BikeshareError::InputParse(trimmed.to_string()),
    })?;

    if value < i64::from(min) || value > i64::from(max) {
        return Err(out_of_range());
    }
    // In range, so it fits.
    Ok(value as u32)
}

/// Parse a case-insensitive `yes` / `no` answer.
pub fn parse_answer(input: &str) -> Result<bool> {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(BikeshareError::InvalidAnswer(trimmed.to_string())),
    }
}

// ── Console ───────────────────────────────────────────────────────────────────

/// A question/answer channel over any reader and writer.
///
/// The binary wires it to stdin/stdout; tests use an in-memory cursor and
/// a `Vec<u8>`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Direct access to the writer for multi-line renderers.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Print a diagnostic for `err` with the top-level error prefix.
    pub fn error(&mut self, err: &BikeshareError) -> io::Result<()> {
        if !err.is_input_error() {
            tracing::debug!(error = %err, "error reported on console");
        }
        writeln!(self.output, "{} {}", ERROR_PREFIX, err)
    }

    /// Ask for a menu code in `min..=max` until a valid one is entered.
    ///
    /// Returns `None` on end of input.
    pub fn read_code(&mut self, prompt: &str, min: u32, max: u32) -> io::Result<Option<u32>> {
        loop {
            let Some(line) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse_code(&line, min, max) {
                Ok(code) => return Ok(Some(code)),
                Err(e) => {
                    tracing::debug!(prompt = prompt, input = %line.trim(), "rejected menu code");
                    self.error(&e)?;
                }
            }
        }
    }

    /// Ask a yes/no question until a valid answer is entered.
    ///
    /// End of input counts as "no".
    pub fn read_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            let Some(line) = self.ask(prompt)? else {
                return Ok(false);
            };
            match parse_answer(&line) {
                Ok(answer) => return Ok(answer),
                Err(e) => self.error(&e)?,
            }
        }
    }

    /// Print `prompt` without a newline and read one line.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            // Keep the transcript tidy when input ends mid-prompt.
            writeln!(self.output)?;
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD and fail parsing like any other
        // bad answer.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
