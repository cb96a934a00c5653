const SOLID_KEYWORD: &[u8] = b"solid";
const END_KEYWORD: &[u8] = b"endsolid";

/// Parses a `solid <name>` header line, returning the name.
///
/// Only the line's own terminator (`\n` or `\r\n`) is stripped. The keyword
/// must be followed by a single delimiting space and a remainder that is not
/// blank, which is returned as-is (further spaces included).
pub(crate) fn parse_header(line: &[u8]) -> Option<String> {
    let line = strip_terminator(line);
    let space = line.iter().position(|&b| b == b' ')?;
    let (keyword, rest) = (&line[..space], &line[space + 1..]);
    if keyword != SOLID_KEYWORD || rest.iter().all(|&b| b == b' ') {
        return None;
    }
    Some(String::from_utf8_lossy(rest).into_owned())
}

/// Returns `true` if the raw line closes a solid.
pub(crate) fn is_terminator(line: &[u8]) -> bool {
    line.starts_with(END_KEYWORD)
}

pub(crate) fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_name() {
        assert_eq!(parse_header(b"solid wall\n").as_deref(), Some("wall"));
        assert_eq!(parse_header(b"solid wall\r\n").as_deref(), Some("wall"));
        assert_eq!(parse_header(b"solid wall").as_deref(), Some("wall"));
    }

    #[test]
    fn name_keeps_inner_and_trailing_spaces() {
        assert_eq!(
            parse_header(b"solid inlet patch \n").as_deref(),
            Some("inlet patch ")
        );
        assert_eq!(parse_header(b"solid  x\n").as_deref(), Some(" x"));
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(parse_header(b"solidWithoutSpace\n"), None);
        assert_eq!(parse_header(b"solid\n"), None);
        assert_eq!(parse_header(b"solid \n"), None);
        assert_eq!(parse_header(b"solid  \n"), None);
        assert_eq!(parse_header(b"solid    \r\n"), None);
        assert_eq!(parse_header(b"Solid wall\n"), None);
        assert_eq!(parse_header(b" solid wall\n"), None);
        assert_eq!(parse_header(b"\n"), None);
        assert_eq!(parse_header(b"endsolid wall\n"), None);
    }

    #[test]
    fn terminator_matches_raw_prefix() {
        assert!(is_terminator(b"endsolid wall\n"));
        assert!(is_terminator(b"endsolid\n"));
        assert!(is_terminator(b"endsolidwall"));
        assert!(!is_terminator(b"  endsolid wall\n"));
        assert!(!is_terminator(b"facet normal 0 0 1\n"));
    }
}
