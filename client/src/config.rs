use clap::{Args, Parser};
use numgen::NumberSource;
use std::time::Duration;

use crate::{endpoint_uri, Error, Result};

#[derive(Debug, Clone, Parser)]
#[command(name = "client", about = "Calls the remote area service and streams random numbers to it")]
pub struct Config {
    /// Service address, `host:port` or `:port` for the local host.
    #[arg(long, default_value = ":10000")]
    pub addr: String,

    /// Inclusive lower bound of the streamed numbers.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min: i64,

    /// Exclusive upper bound of the streamed numbers.
    #[arg(long, default_value_t = 50000, allow_negative_numbers = true)]
    pub max: i64,

    /// Delay between two streamed numbers.
    #[arg(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Streaming stops after this many seconds.
    #[arg(long, default_value_t = 300)]
    pub deadline_secs: u64,

    /// Fixed seed for the number generator.
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub shapes: Shapes,
}

#[derive(Debug, Clone, Copy, PartialEq, Args)]
pub struct Shapes {
    #[arg(long, default_value_t = 3.0)]
    pub radius: f64,

    #[arg(long, default_value_t = 5.0)]
    pub side: f64,

    #[arg(long, default_value_t = 10.0)]
    pub width: f64,

    #[arg(long, default_value_t = 3.0)]
    pub height: f64,
}

impl Default for Shapes {
    fn default() -> Self {
        Self {
            radius: 3.0,
            side: 5.0,
            width: 10.0,
            height: 3.0,
        }
    }
}

impl Config {
    /// Checks everything that can be rejected without touching the network.
    pub fn validate(&self) -> Result<()> {
        endpoint_uri(&self.addr)?;
        self.number_source()?;
        if self.interval_ms == 0 {
            return Err(Error::InvalidInterval);
        }
        Ok(())
    }

    pub fn number_source(&self) -> Result<NumberSource> {
        let source = match self.seed {
            Some(seed) => NumberSource::seeded(self.min, self.max, seed)?,
            None => NumberSource::new(self.min, self.max)?,
        };
        Ok(source)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["client"]).unwrap();
        assert_eq!(config.addr, ":10000");
        assert_eq!((config.min, config.max), (0, 50000));
        assert_eq!(config.interval(), Duration::from_millis(500));
        assert_eq!(config.deadline(), Duration::from_secs(300));
        assert_eq!(config.seed, None);
        assert_eq!(config.shapes, Shapes::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "client",
            "--addr",
            "example.com:443",
            "--min",
            "-20",
            "--max",
            "-10",
            "--interval-ms",
            "50",
            "--deadline-secs",
            "2",
            "--seed",
            "9",
            "--radius",
            "1.5",
            "--height",
            "4",
        ])
        .unwrap();
        assert_eq!(config.addr, "example.com:443");
        assert_eq!((config.min, config.max), (-20, -10));
        assert_eq!(config.interval(), Duration::from_millis(50));
        assert_eq!(config.deadline(), Duration::from_secs(2));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.shapes.radius, 1.5);
        assert_eq!(config.shapes.side, 5.0);
        assert_eq!(config.shapes.height, 4.0);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_range() {
        let config = Config::try_parse_from(["client", "--min", "10", "--max", "10"]).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn test_validate_interval() {
        let config = Config::try_parse_from(["client", "--interval-ms", "0"]).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidInterval)));

        let config = Config::try_parse_from(["client", "--interval-ms", "1"]).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_addr() {
        let config = Config::try_parse_from(["client", "--addr", "10000"]).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidAddress(..))));
    }

    #[test]
    fn test_seeded_sources_match() {
        let config = Config::try_parse_from(["client", "--seed", "77"]).unwrap();
        let a: Vec<_> = config.number_source().unwrap().take(8).collect();
        let b: Vec<_> = config.number_source().unwrap().take(8).collect();
        assert_eq!(a, b);
    }
}
