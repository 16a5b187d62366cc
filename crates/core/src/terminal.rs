//! Console access used by the pipeline.

use std::io::{self, Read, Stderr, Stdin, Stdout, Write};

/// Console the pipeline talks to: key input, human-readable messages, and
/// the payload stream used for stdout output.
pub trait Terminal {
    /// Reads one key. `None` means input is exhausted.
    fn read_key(&mut self) -> io::Result<Option<char>>;

    /// Stream for status lines and prompts.
    fn messages(&mut self) -> &mut dyn Write;

    /// Stream that receives converted documents written to stdout.
    fn output(&mut self) -> &mut dyn Write;
}

/// Terminal bound to the process's standard streams.
///
/// Messages go to stdout, or to stderr when stdout carries the converted
/// document.
pub struct StdTerminal {
    stdin: Stdin,
    stdout: Stdout,
    stderr: Stderr,
    messages_to_stderr: bool,
}

impl StdTerminal {
    pub fn new(messages_to_stderr: bool) -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            stderr: io::stderr(),
            messages_to_stderr,
        }
    }
}

impl Terminal for StdTerminal {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        let mut byte = [0u8; 1];
        loop {
            match self.stdin.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(char::from(byte[0]))),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    fn messages(&mut self) -> &mut dyn Write {
        if self.messages_to_stderr {
            return &mut self.stderr;
        }
        &mut self.stdout
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }
}
