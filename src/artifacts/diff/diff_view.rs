/// How a client lays out hunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffViewMode {
    Inline,
    Parallel,
}

impl DiffViewMode {
    /// Normalize a requested view
    ///
    /// Only the exact, lowercase names are accepted. Anything else means the
    /// caller keeps its default and persists nothing.
    pub fn normalize(requested: &str) -> Option<Self> {
        match requested {
            "inline" => Some(DiffViewMode::Inline),
            "parallel" => Some(DiffViewMode::Parallel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiffViewMode::Inline => "inline",
            DiffViewMode::Parallel => "parallel",
        }
    }
}

impl std::fmt::Display for DiffViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
