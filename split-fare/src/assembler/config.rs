//! Assembly configuration.

/// Configuration parameters for matrix assembly.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// How many listed connections per search are checked for the
    /// reference run. Listings rank other runs first surprisingly often.
    pub max_candidates: usize,

    /// Number of searches dispatched concurrently.
    pub batch_size: usize,
}

impl AssemblerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_candidates: usize, batch_size: usize) -> Self {
        Self {
            max_candidates,
            batch_size,
        }
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            batch_size: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AssemblerConfig::default();

        assert_eq!(config.max_candidates, 5);
        assert_eq!(config.batch_size, 4);
    }

    #[test]
    fn custom_config() {
        let config = AssemblerConfig::new(3, 1);

        assert_eq!(config.max_candidates, 3);
        assert_eq!(config.batch_size, 1);
    }
}
