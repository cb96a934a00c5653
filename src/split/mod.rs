mod block;
mod header;

pub use block::SolidBlock;

use std::io::BufRead;

use tracing::warn;

use crate::error::{FormatError, ResourceError, Result};
use header::{is_terminator, parse_header, strip_terminator};

enum State {
    /// Between solids: the next line must be a header.
    Scanning,
    /// Collecting lines until `endsolid` or end of stream.
    InSolid(SolidBlock),
    /// Stream exhausted or a fatal error was reported.
    Finished,
}

/// Splits a stream of concatenated solids into [`SolidBlock`]s.
///
/// Reads one line at a time, forward only. The iterator yields blocks in
/// stream order and is fused: after end of stream or the first error it only
/// returns `None`.
pub struct SolidBlocks<R> {
    reader: R,
    state: State,
    line_number: usize,
    allow_truncated: bool,
}

impl<R: BufRead> SolidBlocks<R> {
    /// Creates a splitter that accepts a truncated final block.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: State::Scanning,
            line_number: 0,
            allow_truncated: true,
        }
    }

    /// Sets whether a final block without `endsolid` is yielded (`true`) or
    /// reported as [`FormatError::UnterminatedSolid`] (`false`).
    #[must_use]
    pub fn allow_truncated(mut self, allow: bool) -> Self {
        self.allow_truncated = allow;
        self
    }

    fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(ResourceError::Read)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(line))
    }

    fn finish(&mut self) -> Option<Result<SolidBlock>> {
        match std::mem::replace(&mut self.state, State::Finished) {
            State::InSolid(block) if self.allow_truncated => {
                warn!(
                    "Solid '{}' starting at line {} ends without 'endsolid'; importing it as-is",
                    block.name(),
                    block.start_line()
                );
                Some(Ok(block))
            }
            State::InSolid(block) => Some(Err(FormatError::UnterminatedSolid {
                name: block.name().to_owned(),
                line: block.start_line(),
            }
            .into())),
            State::Scanning | State::Finished => None,
        }
    }
}

impl<R: BufRead> Iterator for SolidBlocks<R> {
    type Item = Result<SolidBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if matches!(self.state, State::Finished) {
                return None;
            }

            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return self.finish(),
                Err(err) => {
                    self.state = State::Finished;
                    return Some(Err(err));
                }
            };

            match std::mem::replace(&mut self.state, State::Finished) {
                State::Scanning => {
                    let Some(name) = parse_header(&line) else {
                        return Some(Err(FormatError::ExpectedSolidHeader {
                            line: self.line_number,
                            found: String::from_utf8_lossy(strip_terminator(&line)).into_owned(),
                        }
                        .into()));
                    };
                    self.state = State::InSolid(SolidBlock::open(name, line, self.line_number));
                }
                State::InSolid(mut block) => {
                    let closes = is_terminator(&line);
                    block.push(line);
                    if closes {
                        block.close();
                        self.state = State::Scanning;
                        return Some(Ok(block));
                    }
                    self.state = State::InSolid(block);
                }
                State::Finished => return None,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MultiStlError;

    fn split(input: &str) -> Vec<Result<SolidBlock>> {
        SolidBlocks::new(input.as_bytes()).collect()
    }

    fn names(blocks: &[Result<SolidBlock>]) -> Vec<&str> {
        blocks
            .iter()
            .map(|b| b.as_ref().unwrap().name())
            .collect()
    }

    const TWO_SOLIDS: &str = "solid A\nfacet...\nendsolid A\nsolid B\nfacet...\nendsolid B\n";

    #[test]
    fn splits_two_solids_in_order() {
        let blocks = split(TWO_SOLIDS);
        assert_eq!(names(&blocks), ["A", "B"]);

        let a = blocks[0].as_ref().unwrap();
        assert_eq!(a.lines().len(), 3);
        assert_eq!(a.to_bytes(), b"solid A\nfacet...\nendsolid A\n");
        assert_eq!(a.start_line(), 1);
        assert!(a.is_terminated());

        let b = blocks[1].as_ref().unwrap();
        assert_eq!(b.start_line(), 4);
        assert_eq!(b.lines()[0], b"solid B\n");
        assert_eq!(b.lines()[2], b"endsolid B\n");
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert!(split("").is_empty());
    }

    #[test]
    fn rejoined_blocks_reproduce_input() {
        let input = "solid a b\r\n  facet normal 0 0 1\r\n endsolid not yet\r\nendsolid a b\r\n\
                     solid c\n\tvertex 1 2 3   \nendsolid";
        let blocks = split(input);
        assert_eq!(names(&blocks), ["a b", "c"]);

        let rejoined: Vec<u8> = blocks
            .iter()
            .flat_map(|b| b.as_ref().unwrap().to_bytes())
            .collect();
        assert_eq!(rejoined, input.as_bytes());

        let resplit: Vec<_> = SolidBlocks::new(rejoined.as_slice())
            .map(Result::unwrap)
            .collect();
        let original: Vec<_> = blocks.into_iter().map(Result::unwrap).collect();
        assert_eq!(resplit, original);
    }

    #[test]
    fn header_without_space_is_fatal() {
        let input = format!("solidWithoutSpace\nendsolid\n{TWO_SOLIDS}");
        let mut blocks = SolidBlocks::new(input.as_bytes());

        match blocks.next() {
            Some(Err(MultiStlError::Format(FormatError::ExpectedSolidHeader { line, found }))) => {
                assert_eq!(line, 1);
                assert_eq!(found, "solidWithoutSpace");
            }
            other => panic!("expected header error, got {other:?}"),
        }
        assert!(blocks.next().is_none());
    }

    #[test]
    fn garbage_between_solids_reports_its_line() {
        let input = "solid A\nendsolid A\n\nsolid B\nendsolid B\n";
        let blocks = split(input);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].as_ref().unwrap().name(), "A");
        assert!(matches!(
            blocks[1],
            Err(MultiStlError::Format(FormatError::ExpectedSolidHeader { line: 3, .. }))
        ));
    }

    #[test]
    fn blank_solid_name_is_fatal() {
        let blocks = split("solid  \nendsolid\nsolid A\nendsolid A\n");

        assert_eq!(blocks.len(), 1);
        assert!(matches!(
            blocks[0],
            Err(MultiStlError::Format(FormatError::ExpectedSolidHeader { line: 1, .. }))
        ));
    }

    #[test]
    fn truncated_final_block_is_yielded() {
        let blocks = split("solid A\nendsolid A\nsolid B\nfacet normal 0 0 1\n");
        assert_eq!(names(&blocks), ["A", "B"]);

        let b = blocks[1].as_ref().unwrap();
        assert!(!b.is_terminated());
        assert_eq!(b.to_bytes(), b"solid B\nfacet normal 0 0 1\n");
    }

    #[test]
    fn truncated_final_block_rejected_when_disallowed() {
        let input = "solid A\nendsolid A\nsolid B\nfacet normal 0 0 1\n";
        let blocks: Vec<_> = SolidBlocks::new(input.as_bytes())
            .allow_truncated(false)
            .collect();

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].is_ok());
        match &blocks[1] {
            Err(MultiStlError::Format(FormatError::UnterminatedSolid { name, line })) => {
                assert_eq!(name, "B");
                assert_eq!(*line, 3);
            }
            other => panic!("expected unterminated error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_are_kept_apart() {
        let blocks = split("solid Part1\nendsolid\nsolid Part1\nendsolid\n");
        assert_eq!(names(&blocks), ["Part1", "Part1"]);
    }

    #[test]
    fn indented_endsolid_does_not_close() {
        let blocks = split("solid A\n  endsolid A\nendsolid A\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].as_ref().unwrap().lines().len(), 3);
    }

    #[test]
    fn read_failure_is_a_resource_error() {
        struct Failing;
        impl std::io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }

        let mut blocks = SolidBlocks::new(std::io::BufReader::new(Failing));
        assert!(matches!(
            blocks.next(),
            Some(Err(MultiStlError::Resource(ResourceError::Read(_))))
        ));
        assert!(blocks.next().is_none());
    }
}
