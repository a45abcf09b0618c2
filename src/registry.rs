//! The ordered, versioned set of migration units.
//!
//! Registration happens once at process start and fails fast on duplicate
//! or non-ascending versions, before any run can observe a broken order.
//! The total order matters: later units are written assuming invariants
//! established by earlier ones (a unit that reorganizes a resource pool
//! assumes the unit that created the pool already ran).

use crate::core::{MigrateError, Result};
use crate::unit::MigrationUnit;
use std::sync::Arc;

#[derive(Default)]
pub struct MigrationRegistry {
    units: Vec<Arc<dyn MigrationUnit>>,
}

impl std::fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationRegistry")
            .field(
                "versions",
                &self.units.iter().map(|u| u.version()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list that must already be strictly ascending.
    pub fn from_ordered(units: Vec<Arc<dyn MigrationUnit>>) -> Result<Self> {
        let mut previous = 0u32;
        for unit in &units {
            let version = unit.version();
            if version == 0 {
                return Err(MigrateError::ReservedVersion);
            }
            if version == previous {
                return Err(MigrateError::DuplicateVersion(version));
            }
            if version < previous {
                return Err(MigrateError::NonMonotonicVersion {
                    version,
                    after: previous,
                });
            }
            previous = version;
        }
        Ok(Self { units })
    }

    /// Add one unit, rejecting duplicate versions at registration time.
    pub fn register(&mut self, unit: Arc<dyn MigrationUnit>) -> Result<()> {
        let version = unit.version();
        if version == 0 {
            return Err(MigrateError::ReservedVersion);
        }
        match self
            .units
            .binary_search_by_key(&version, |u| u.version())
        {
            Ok(_) => Err(MigrateError::DuplicateVersion(version)),
            Err(pos) => {
                self.units.insert(pos, unit);
                Ok(())
            }
        }
    }

    /// All units with version strictly above `version`, ascending.
    pub fn units_above(&self, version: u32) -> Vec<Arc<dyn MigrationUnit>> {
        let start = self.units.partition_point(|u| u.version() <= version);
        self.units[start..].to_vec()
    }

    /// Highest registered version, 0 when the registry is empty.
    pub fn latest_version(&self) -> u32 {
        self.units.last().map(|u| u.version()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
