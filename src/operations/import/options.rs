/// Parameters controlling how a multi-solid file is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Whether a final solid cut off by end of file (no `endsolid` line) is
    /// still imported. When `false` it is reported as a format error instead.
    pub allow_truncated: bool,
}

impl ImportOptions {
    /// Options that reject a truncated final solid.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            allow_truncated: false,
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            allow_truncated: true,
        }
    }
}
