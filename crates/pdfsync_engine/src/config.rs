//! Configuration for the document service.

use std::time::Duration;

/// Maximum accepted file size: 50 MiB.
const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Default staleness interval: 5 minutes.
const DEFAULT_STALENESS_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Tunables for the document service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// How long a cached collection stays fresh after a sync.
    pub staleness_interval: Duration,
    /// Maximum accepted file size for `add`, in bytes.
    pub max_file_size: u64,
    /// Capacity of the mirror-error queue; oldest entries drop first.
    pub mirror_error_capacity: usize,
}

impl ServiceConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            staleness_interval: DEFAULT_STALENESS_INTERVAL,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            mirror_error_capacity: 32,
        }
    }

    /// Sets the staleness interval.
    pub fn with_staleness_interval(mut self, interval: Duration) -> Self {
        self.staleness_interval = interval;
        self
    }

    /// Sets the maximum accepted file size.
    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServiceConfig::new();
        assert_eq!(config.staleness_interval, Duration::from_secs(300));
        assert_eq!(config.max_file_size, 50 * 1024 * 1024);
        assert_eq!(config.mirror_error_capacity, 32);
    }

    #[test]
    fn builder_overrides() {
        let config = ServiceConfig::new()
            .with_staleness_interval(Duration::from_secs(1))
            .with_max_file_size(1024);
        assert_eq!(config.staleness_interval, Duration::from_secs(1));
        assert_eq!(config.max_file_size, 1024);
    }
}
