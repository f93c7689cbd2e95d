//! Interactive agent - asks a human for each move

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

use ur_core::board::parse_position;
use ur_core::{render, Agent, Options, Position, Side, Steps};

/// Agent that prompts on `output` and reads choices from `input`
///
/// Complaints about bad input go to `errors`.
pub struct InteractiveAgent<R, W, E> {
    name: String,
    input: R,
    output: W,
    errors: E,
}

impl InteractiveAgent<StdinLock<'static>, Stdout, Stderr> {
    /// Prompt on the terminal
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> InteractiveAgent<R, W, E> {
    pub fn new(name: impl Into<String>, input: R, output: W, errors: E) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            errors,
        }
    }

    fn prompt(
        &mut self,
        me: &Side,
        other: &Side,
        steps: Steps,
        options: Options,
    ) -> io::Result<Option<Position>> {
        writeln!(self.output, "Hello, {}!", self.name)?;
        writeln!(self.output, "The current state (you are shown on top) is:")?;
        writeln!(self.output, "{}", render(me, other))?;
        writeln!(self.output, "You rolled a {}.", steps)?;
        writeln!(self.output, "Your options are:")?;
        for pos in options.iter() {
            writeln!(self.output, "> {}", pos)?;
        }
        write!(self.output, "What do you choose? ")?;
        self.output.flush()?;

        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                writeln!(self.errors, "Unexpected end of input.")?;
                return Ok(None);
            }
            match parse_position(&line) {
                Ok(pos) if options.contains(pos) => return Ok(Some(pos)),
                Ok(_) => writeln!(self.errors, "Invalid option.")?,
                Err(_) => writeln!(self.errors, "Illegal format.")?,
            }
            write!(self.output, "Please try again: ")?;
            self.output.flush()?;
        }
    }

    #[cfg(test)]
    fn into_writers(self) -> (W, E) {
        (self.output, self.errors)
    }
}

impl<R: BufRead, W: Write, E: Write> Agent for InteractiveAgent<R, W, E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &mut self,
        me: &Side,
        other: &Side,
        steps: Steps,
        options: Options,
    ) -> Option<Position> {
        match self.prompt(me, other, steps, options) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!("Failed to read move: {}", e);
                None
            }
        }
    }
}
