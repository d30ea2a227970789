//! Command-line configuration

use crate::batch::{BatchConfig, DEFAULT_END, DEFAULT_START};
use clap::Parser;

/// Generate abstract black-and-white placeholder images
#[derive(Debug, Parser)]
#[command(name = "abstract_pattern", version)]
pub struct Cli {
    /// First image index (inclusive)
    #[arg(long, default_value_t = DEFAULT_START)]
    pub start: u32,

    /// Last image index (inclusive)
    #[arg(long, default_value_t = DEFAULT_END)]
    pub end: u32,
}

impl Cli {
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["abstract_pattern"]).unwrap();
        assert_eq!(cli.batch_config(), BatchConfig::default());
    }

    #[test]
    fn test_range_flags() {
        let cli = Cli::try_parse_from(["abstract_pattern", "--start", "5", "--end", "9"]).unwrap();
        let config = cli.batch_config();
        assert_eq!((config.start, config.end), (5, 9));
        assert_eq!(config.total(), 5);
    }

    #[test]
    fn test_rejects_negative_index() {
        assert!(Cli::try_parse_from(["abstract_pattern", "--start", "-1"]).is_err());
    }
}
