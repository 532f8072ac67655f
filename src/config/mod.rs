//! Runtime configuration: store location and simulation bounds.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rand::{Rng, RngCore};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::core::errors::{PacingError, Result};
use crate::utils;

/// Bounds for synthetic spend amounts, inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_amount: Decimal::new(100, 2),
            max_amount: Decimal::new(500, 2),
        }
    }
}

impl SimulationConfig {
    /// Draws an amount within the bounds, rounded to cents.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Decimal {
        let min = self.min_amount.to_f64().unwrap_or(0.0);
        let max = self.max_amount.to_f64().unwrap_or(min);
        if max <= min {
            return self.min_amount;
        }
        let raw = rng.gen_range(min..=max);
        Decimal::from_f64_retain(raw)
            .unwrap_or(self.min_amount)
            .round_dp(2)
    }
}

/// Top-level runtime configuration, persisted as JSON under the app data dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PacingConfig {
    /// Overrides the store document location when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            store_file: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl PacingConfig {
    /// Loads the configuration from the canonical location, falling back to
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&utils::config_file())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            utils::ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolved location of the store document.
    pub fn store_path(&self) -> PathBuf {
        self.store_file.clone().unwrap_or_else(utils::store_file)
    }

    fn validate(&self) -> Result<()> {
        if self.simulation.min_amount < Decimal::ZERO
            || self.simulation.max_amount < self.simulation.min_amount
        {
            return Err(PacingError::Validation(format!(
                "simulation bounds must satisfy 0 <= min <= max, got {}..{}",
                self.simulation.min_amount, self.simulation.max_amount
            )));
        }
        Ok(())
    }
}
