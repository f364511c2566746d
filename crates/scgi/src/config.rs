//! Tunables for reading an SCGI header frame.

use crate::ensure;
use crate::protocol::ConfigError;

/// Capacity of the header buffer allocated before the frame length is known.
pub const DEFAULT_INITIAL_CAPACITY: usize = 128;

/// Bytes within which the `:` length delimiter must show up.
pub const DEFAULT_PROBE_SIZE: usize = 16;

/// Largest accepted frame, length prefix and trailing `,` included.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;

/// Settings shared by [`Request`](crate::connection::Request) and
/// [`HeaderDecoder`](crate::codec::HeaderDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    initial_capacity: usize,
    probe_size: usize,
    max_header_bytes: usize,
}

impl ReaderConfig {
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::new()
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn probe_size(&self) -> usize {
        self.probe_size
    }

    pub fn max_header_bytes(&self) -> usize {
        self.max_header_bytes
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            probe_size: DEFAULT_PROBE_SIZE,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReaderConfigBuilder {
    config: ReaderConfig,
}

impl ReaderConfigBuilder {
    fn new() -> Self {
        Self { config: ReaderConfig::default() }
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self
    }

    pub fn probe_size(mut self, probe_size: usize) -> Self {
        self.config.probe_size = probe_size;
        self
    }

    pub fn max_header_bytes(mut self, max_header_bytes: usize) -> Self {
        self.config.max_header_bytes = max_header_bytes;
        self
    }

    pub fn build(self) -> Result<ReaderConfig, ConfigError> {
        let ReaderConfig { initial_capacity, probe_size, max_header_bytes } = self.config;

        ensure!(initial_capacity > 0, ConfigError::Zero { name: "initial_capacity" });
        ensure!(probe_size > 0, ConfigError::Zero { name: "probe_size" });
        // the first read lands in the initial allocation
        ensure!(probe_size <= initial_capacity, ConfigError::ProbeTooLarge { probe_size, initial_capacity });
        ensure!(max_header_bytes >= initial_capacity, ConfigError::MaxTooSmall { max_header_bytes, initial_capacity });

        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.initial_capacity(), 128);
        assert_eq!(config.probe_size(), 16);
        assert_eq!(config.max_header_bytes(), 64 * 1024);
        assert_eq!(ReaderConfig::builder().build(), Ok(config));
    }

    #[test]
    fn builder_overrides() {
        let config = ReaderConfig::builder().initial_capacity(32).probe_size(8).max_header_bytes(1024).build().unwrap();
        assert_eq!(config.initial_capacity(), 32);
        assert_eq!(config.probe_size(), 8);
        assert_eq!(config.max_header_bytes(), 1024);
    }

    #[test]
    fn builder_rejects_inconsistent_sizes() {
        assert_eq!(ReaderConfig::builder().probe_size(0).build(), Err(ConfigError::Zero { name: "probe_size" }));
        assert_eq!(ReaderConfig::builder().initial_capacity(0).build(), Err(ConfigError::Zero { name: "initial_capacity" }));
        assert_eq!(
            ReaderConfig::builder().initial_capacity(8).probe_size(16).build(),
            Err(ConfigError::ProbeTooLarge { probe_size: 16, initial_capacity: 8 })
        );
        assert_eq!(
            ReaderConfig::builder().max_header_bytes(64).build(),
            Err(ConfigError::MaxTooSmall { max_header_bytes: 64, initial_capacity: 128 })
        );
    }
}
