//! Query cache configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

const DEFAULT_LIST_LIMIT: usize = 100;
const DEFAULT_DETAIL_LIMIT: usize = 100;
const DEFAULT_DROPDOWN_LIMIT: usize = 50;
const DEFAULT_MAX_AGE_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum cached list pages across all resources.
    pub list_limit: usize,
    /// Maximum cached detail records across all resources.
    pub detail_limit: usize,
    /// Maximum cached dropdown option sets across all resources.
    pub dropdown_limit: usize,
    /// Entries older than this are treated as misses.
    pub max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_LIST_LIMIT,
            detail_limit: DEFAULT_DETAIL_LIMIT,
            dropdown_limit: DEFAULT_DROPDOWN_LIMIT,
            max_age_secs: DEFAULT_MAX_AGE_SECS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            list_limit: settings.list_limit,
            detail_limit: settings.detail_limit,
            dropdown_limit: settings.dropdown_limit,
            max_age_secs: settings.max_age_secs,
        }
    }
}

impl CacheConfig {
    /// Returns the list limit as NonZeroUsize, clamping to 1 if zero.
    pub fn list_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.list_limit).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn detail_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.detail_limit).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn dropdown_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.dropdown_limit).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert_eq!(config.list_limit, 100);
        assert_eq!(config.detail_limit, 100);
        assert_eq!(config.dropdown_limit, 50);
        assert_eq!(config.max_age(), Duration::from_secs(86_400));
    }

    #[test]
    fn non_zero_clamps_to_min() {
        let config = CacheConfig {
            dropdown_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.dropdown_limit_non_zero().get(), 1);
    }
}
