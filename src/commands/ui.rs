use crate::domain::warnings::Warnings;
use crate::utils::error::Result;
use std::io::{self, Write};

/// Command output: results on `out`, warnings and errors on `err`.
pub struct Ui<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Ui<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Ui<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn display_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn display_newline(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    pub fn display_ok(&mut self) -> Result<()> {
        self.display_text("OK")
    }

    pub fn display_warnings(&mut self, warnings: &Warnings) -> Result<()> {
        for warning in warnings {
            writeln!(self.err, "{}", warning)?;
        }
        Ok(())
    }

    pub fn display_error(&mut self, error: &dyn std::error::Error) -> Result<()> {
        writeln!(self.out, "FAILED")?;
        writeln!(self.err, "{}", error)?;
        Ok(())
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[cfg(test)]
pub(crate) fn buffered() -> Ui<Vec<u8>, Vec<u8>> {
    Ui::new(Vec::new(), Vec::new())
}

#[cfg(test)]
pub(crate) fn captured(ui: Ui<Vec<u8>, Vec<u8>>) -> (String, String) {
    let (out, err) = ui.into_parts();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}
