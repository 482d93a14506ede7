use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{MAX_DATA_SIZE, MAX_OBJECTS, MAX_TARGETS};
use crate::error::WireError;

/// Environment variable naming a JSON config file for the kernel binary
pub const CONFIG_ENV_VAR: &str = "UNITS_KERNEL_CONFIG";

/// Ceilings the wire codec enforces on counts and lengths read from a stream.
///
/// Limits may be tightened below the protocol ceilings but never raised above them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireLimits {
    /// Most objects in the working set
    pub max_objects: usize,
    /// Most target identifiers on an instruction
    pub max_targets: usize,
    /// Largest params, object payload or effect payload
    pub max_data_size: usize,
}

impl Default for WireLimits {
    fn default() -> Self {
        Self {
            max_objects: MAX_OBJECTS,
            max_targets: MAX_TARGETS,
            max_data_size: MAX_DATA_SIZE,
        }
    }
}

impl WireLimits {
    /// Reject any limit above the protocol ceiling
    pub fn validate(&self) -> Result<(), WireError> {
        let checks = [
            ("max_objects", self.max_objects, MAX_OBJECTS),
            ("max_targets", self.max_targets, MAX_TARGETS),
            ("max_data_size", self.max_data_size, MAX_DATA_SIZE),
        ];
        for (field, value, limit) in checks {
            if value > limit {
                return Err(WireError::CapacityExceeded { field, value, limit });
            }
        }
        Ok(())
    }
}

/// Configuration of one kernel process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub limits: WireLimits,
}

impl KernelConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: KernelConfig = serde_json::from_str(&contents)?;
        config.limits.validate()?;
        Ok(config)
    }

    /// Load from the file named by `UNITS_KERNEL_CONFIG`, or defaults when it is unset
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
