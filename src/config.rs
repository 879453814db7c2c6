//! Backend Configuration
//!
//! The curve, the size and origin of the KZG SRS and the transcript label are
//! chosen before setup. A configuration is plain JSON:
//!
//! ```json
//! { "curve": "bls12-381", "srs_degree": 64, "srs_seed": 7, "transcript_label": "my-app" }
//! ```
//!
//! Every field is optional; missing fields take the [`Default`] values.
//! Configurations are plain data: nothing is logged or generated until
//! [`crate::dispatch::setup_encoded`] runs.

use serde::{Deserialize, Serialize};
use crate::commitment::kzg::MAX_SRS_DEGREE;
use crate::curve::CurveId;
use crate::error::{Error, Result};
use crate::serialize::MAX_LABEL_LEN;
use crate::transcript::TRANSCRIPT_LABEL;

/// Configuration of the curve-keyed entry points in [`crate::dispatch`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Curve name, see [`CurveId`]'s `FromStr` for the accepted spellings
    pub curve: String,

    /// Largest degree the SRS supports. When absent, the smallest degree the
    /// circuit needs.
    pub srs_degree: Option<usize>,

    /// Derive τ from this seed instead of the OS RNG. Anyone knowing the seed
    /// can forge proofs.
    pub srs_seed: Option<u64>,

    /// Domain separator of every transcript
    pub transcript_label: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            curve: CurveId::Bn254.name().to_string(),
            srs_degree: None,
            srs_seed: None,
            transcript_label: String::from_utf8_lossy(TRANSCRIPT_LABEL).into_owned(),
        }
    }
}

impl BackendConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BackendConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// The configured curve
    pub fn curve_id(&self) -> Result<CurveId> {
        self.curve.parse()
    }

    /// Check every field. Unknown curves are `UnsupportedInstantiation`, the
    /// rest `InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        self.curve_id()?;

        if self.transcript_label.is_empty() {
            return Err(Error::InvalidConfig("transcript label is empty".to_string()));
        }
        if self.transcript_label.len() > MAX_LABEL_LEN {
            return Err(Error::InvalidConfig(format!(
                "transcript label is {} bytes, at most {} allowed",
                self.transcript_label.len(),
                MAX_LABEL_LEN
            )));
        }

        match self.srs_degree {
            Some(0) => Err(Error::InvalidConfig("srs_degree must be positive".to_string())),
            Some(d) if d > MAX_SRS_DEGREE => Err(Error::InvalidConfig(format!(
                "srs_degree {} exceeds {}",
                d, MAX_SRS_DEGREE
            ))),
            _ => Ok(()),
        }
    }
}
