use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CARBON_MASS: f64 = 12.011;
pub const CC_BOND_LENGTH: f64 = 1.417;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PairCoeffs {
    pub epsilon: f64,
    pub sigma: f64,
}

/// `E = k2 (r - r0)^2 + k3 (r - r0)^3 + k4 (r - r0)^4`
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuarticBondCoeffs {
    pub r0: f64,
    pub k2: f64,
    pub k3: f64,
    pub k4: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ForcefieldParams {
    pub mass: f64,
    pub pair: PairCoeffs,
    pub bond: QuarticBondCoeffs,
}

impl Default for ForcefieldParams {
    fn default() -> Self {
        Self {
            mass: CARBON_MASS,
            pair: PairCoeffs {
                epsilon: 0.064,
                sigma: 4.01,
            },
            bond: QuarticBondCoeffs {
                r0: CC_BOND_LENGTH,
                k2: 470.8361,
                k3: -627.6179,
                k4: 1327.6345,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid parameter '{name}' in '{path}': {reason}")]
    Invalid {
        path: String,
        name: &'static str,
        reason: String,
    },
}

impl ForcefieldParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let params: Self = toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        params.validate().map_err(|(name, reason)| ParamLoadError::Invalid {
            path: path.to_string_lossy().to_string(),
            name,
            reason,
        })?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), (&'static str, String)> {
        let positive = [
            ("mass", self.mass),
            ("pair.sigma", self.pair.sigma),
            ("bond.r0", self.bond.r0),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err((name, format!("must be positive, got {}", value)));
            }
        }
        let finite = [
            ("pair.epsilon", self.pair.epsilon),
            ("bond.k2", self.bond.k2),
            ("bond.k3", self.bond.k3),
            ("bond.k4", self.bond.k4),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err((name, format!("must be finite, got {}", value)));
            }
        }
        Ok(())
    }
}
