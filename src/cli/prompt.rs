//! Line-based interactive prompts.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

/// Asks questions on `output` and reads replies from `input`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<BufReader<File>, io::Stdout> {
    /// Prompt attached to the terminal.
    ///
    /// Stdin is read one byte at a time from its own handle, so input after
    /// the last reply is left for the generator, which inherits stdin.
    pub fn stdio() -> io::Result<Self> {
        Ok(Self::new(BufReader::with_capacity(1, stdin_handle()?), io::stdout()))
    }
}

#[cfg(unix)]
fn stdin_handle() -> io::Result<File> {
    use std::os::fd::AsFd;
    Ok(File::from(io::stdin().as_fd().try_clone_to_owned()?))
}

#[cfg(windows)]
fn stdin_handle() -> io::Result<File> {
    use std::os::windows::io::AsHandle;
    Ok(File::from(io::stdin().as_handle().try_clone_to_owned()?))
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints a line without waiting for a reply.
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Asks `question` and returns the trimmed reply, or `None` at end of input.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes/no question; only `y` or `yes` count as agreement.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let reply = self.ask(&format!("{} [y/N]", question))?;
        Ok(reply.is_some_and(|reply| is_affirmative(&reply)))
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

fn is_affirmative(reply: &str) -> bool {
    matches!(reply.to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_trims_and_detects_end_of_input() {
        let mut p = prompt("  sol \n");
        assert_eq!(p.ask("Prefix?").unwrap(), Some("sol".to_string()));
        assert_eq!(p.ask("Prefix?").unwrap(), None);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.starts_with("Prefix? "));
    }

    #[test]
    fn single_byte_buffer_stops_at_the_reply() {
        let mut input = Cursor::new(b"y\nsecret\n".to_vec());
        let mut p = Prompt::new(BufReader::with_capacity(1, &mut input), Vec::new());
        assert!(p.confirm("Continue?").unwrap());
        drop(p);
        assert_eq!(input.position(), 2);
    }

    #[test]
    fn confirm_accepts_only_yes() {
        for (reply, expected) in [
            ("y\n", true),
            ("YES\n", true),
            ("Yes\n", true),
            ("n\n", false),
            ("\n", false),
            ("sure\n", false),
            ("", false),
        ] {
            assert_eq!(prompt(reply).confirm("Continue?").unwrap(), expected, "{reply:?}");
        }
    }
}
