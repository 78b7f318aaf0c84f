use crate::artifacts::diff::paginator::DEFAULT_PER_PAGE;
use derive_new::new;

pub const BATCH_LOAD_VAR: &str = "MRDIFF_BATCH_LOAD";
pub const PER_PAGE_VAR: &str = "MRDIFF_PER_PAGE";
pub const WORKERS_VAR: &str = "MRDIFF_WORKERS";

/// Settings of the diffs endpoints
///
/// The batch flag is the only configuration the core consults, through
/// `is_batch_enabled`.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DiffsConfig {
    batch_enabled: bool,
    default_per_page: usize,
    workers: usize,
}

impl Default for DiffsConfig {
    fn default() -> Self {
        DiffsConfig {
            batch_enabled: true,
            default_per_page: DEFAULT_PER_PAGE,
            workers: default_workers(),
        }
    }
}

impl DiffsConfig {
    /// Load shared settings from environment variables.
    pub fn load_from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Invalid values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let positive = |key: &str| {
            lookup(key)
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|value| *value > 0)
        };

        DiffsConfig {
            batch_enabled: lookup(BATCH_LOAD_VAR)
                .and_then(|value| parse_flag(&value))
                .unwrap_or(defaults.batch_enabled),
            default_per_page: positive(PER_PAGE_VAR).unwrap_or(defaults.default_per_page),
            workers: positive(WORKERS_VAR).unwrap_or(defaults.workers),
        }
    }

    pub fn is_batch_enabled(&self) -> bool {
        self.batch_enabled
    }

    pub fn default_per_page(&self) -> usize {
        self.default_per_page
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn with_batch_enabled(mut self, enabled: bool) -> Self {
        self.batch_enabled = enabled;
        self
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|workers| workers.get())
        .unwrap_or(1)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
