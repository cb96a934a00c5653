use std::io::{self, Write};

/// One `solid <name>` ... `endsolid` span of the input, kept verbatim.
///
/// Lines are stored as raw bytes including their own line terminator, so
/// writing a block back out reproduces the original span exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidBlock {
    name: String,
    lines: Vec<Vec<u8>>,
    start_line: usize,
    terminated: bool,
}

impl SolidBlock {
    pub(super) fn open(name: String, header: Vec<u8>, start_line: usize) -> Self {
        Self {
            name,
            lines: vec![header],
            start_line,
            terminated: false,
        }
    }

    pub(super) fn push(&mut self, line: Vec<u8>) {
        self.lines.push(line);
    }

    pub(super) fn close(&mut self) {
        self.terminated = true;
    }

    /// The solid's name: everything after the first space of the header.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw lines, header first and terminator last when present.
    #[must_use]
    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// The 1-based line number of the header in the source stream.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Returns `false` for a block cut off by end of stream.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Writes the block's lines unchanged.
    ///
    /// # Errors
    ///
    /// Returns any error produced by the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line)?;
        }
        Ok(())
    }

    /// Returns the block's content as one contiguous buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.concat()
    }
}
