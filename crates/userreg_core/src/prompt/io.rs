//! Line-oriented operator I/O.

use std::io::{self, BufRead, Write};

/// Source of operator answers and sink for prompt feedback.
pub trait PromptIo {
    /// Shows `prompt` and reads one line without its line terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Shows a rejection or status message on its own line.
    fn say(&mut self, message: &str) -> io::Result<()>;
}

/// `PromptIo` over any buffered reader and writer pair.
///
/// Used with stdin/stdout by the CLI and with in-memory buffers by tests.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> PromptIo for LinePrompt<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }
        // Why: a non-UTF-8 line is already consumed; decoding lossily lets the
        // validation rules reject it instead of ending the session.
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }
}
