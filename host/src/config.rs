use minesweeper_common::{ConfigError, GameParams, config::seed_from_env};
use rand::{SeedableRng, rngs::StdRng};

/// Settings for a hosted game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostConfig {
    pub params: GameParams,
    /// Fixed RNG seed; `None` draws boards from OS entropy.
    pub seed: Option<u64>,
}

impl HostConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            params: GameParams::from_env()?,
            seed: seed_from_env()?,
        })
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seeded_config_is_reproducible() {
        let config = HostConfig {
            seed: Some(99),
            ..HostConfig::default()
        };
        let first: u64 = config.rng().random();
        let second: u64 = config.rng().random();
        assert_eq!(first, second);
    }
}
