//! Generator configuration and the derived `levelDisplacement` (spec
//! §3's `TerrainConfig`, §7's "Configuration error").
//!
//! Grounded on `WorldConfig`'s `validator::Validate` usage in
//! `other_examples/39d5dc3b_LucasPickering-terra-rs__crates-core-src-config.rs.rs`:
//! business-rule checks (persistence strictly inside `(0, 1)`, positive
//! ellipsoid radii) get custom validator functions, while the two depth
//! fields use a declarative `range` attribute since they're plain
//! representability limits, not domain rules.

use serde_derive::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ellipsoid::Ellipsoid;
use crate::error::ConfigError;
use crate::error_model::level_displacement;
use crate::gltf::base_gltf_template;

fn validate_persistence(persistence: &f64) -> Result<(), ValidationError> {
    if *persistence > 0.0 && *persistence < 1.0 {
        Ok(())
    } else {
        let mut error = ValidationError::new("persistence_range");
        error.message = Some("persistence must be strictly between 0 and 1".into());
        Err(error)
    }
}

fn validate_maximum_displacement(maximum_displacement: &f64) -> Result<(), ValidationError> {
    if *maximum_displacement > 0.0 {
        Ok(())
    } else {
        let mut error = ValidationError::new("maximum_displacement_positive");
        error.message = Some("maximumDisplacement must be positive".into());
        Err(error)
    }
}

fn validate_ellipsoid(ellipsoid: &Ellipsoid) -> Result<(), ValidationError> {
    if ellipsoid.is_positive() {
        Ok(())
    } else {
        let mut error = ValidationError::new("ellipsoid_positive");
        error.message = Some("every ellipsoid radius must be strictly positive".into());
        Err(error)
    }
}

/// Constructor parameters for [`TerrainGenerator`] (spec §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct TerrainConfig {
    #[validate(custom = "validate_persistence")]
    pub persistence: f64,

    #[validate(custom = "validate_maximum_displacement")]
    pub maximum_displacement: f64,

    #[validate(range(min = 1, max = 31))]
    pub generation_depth: u32,

    #[validate(range(min = 1, max = 31))]
    pub content_generation_depth: u32,

    #[validate(custom = "validate_ellipsoid")]
    pub ellipsoid: Ellipsoid,
}

/// A validated configuration plus the derived constants computed from
/// it once at construction: `levelDisplacement` and the parsed base
/// glTF template. Immutable for the generator's lifetime (spec §3's
/// "Lifecycles").
pub struct TerrainGenerator {
    pub(crate) config: TerrainConfig,
    pub(crate) level_displacement: f64,
    pub(crate) base_template: serde_json::Value,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Validation)?;
        let level_displacement = level_displacement(config.maximum_displacement, config.persistence);
        let base_template = base_gltf_template()?;
        Ok(Self { config, level_displacement, base_template })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn level_displacement(&self) -> f64 {
        self.level_displacement
    }
}
