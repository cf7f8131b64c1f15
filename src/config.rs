//! Construction parameters for `AssocMap`.

use crate::error::{Error, Result};

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
pub const DEFAULT_LOAD_FACTOR_PERCENT: u32 = 75;

/// What `insert` does when the key is already present.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DuplicatePolicy {
    /// Push a new node at the chain head. The older entry stays allocated
    /// but is hidden from `lookup` until the newer one is removed.
    #[default]
    Shadow,
    /// Replace the value of the first matching node in place.
    Overwrite,
}

/// Builder-style configuration; validated when the map is created.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MapConfig {
    pub(crate) initial_capacity: usize,
    pub(crate) load_factor_percent: u32,
    pub(crate) duplicates: DuplicatePolicy,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor_percent: DEFAULT_LOAD_FACTOR_PERCENT,
            duplicates: DuplicatePolicy::Shadow,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets allocated up front. Must be non-zero.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Growth threshold as a percentage in `1..=100`.
    pub fn load_factor_percent(mut self, percent: u32) -> Self {
        self.load_factor_percent = percent;
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(Error::InvalidArgument("initial_capacity"));
        }
        if self.load_factor_percent == 0 || self.load_factor_percent > 100 {
            return Err(Error::InvalidArgument("load_factor_percent"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = MapConfig::new();
        assert_eq!(cfg.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(cfg.load_factor_percent, DEFAULT_LOAD_FACTOR_PERCENT);
        assert_eq!(cfg.duplicates, DuplicatePolicy::Shadow);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let cfg = MapConfig::new().initial_capacity(0);
        assert_eq!(
            cfg.validate(),
            Err(Error::InvalidArgument("initial_capacity"))
        );
    }

    /// The accepted range is the half-open `(0, 100]`.
    #[test]
    fn load_factor_bounds() {
        for bad in [0, 101, u32::MAX] {
            let cfg = MapConfig::new().load_factor_percent(bad);
            assert_eq!(
                cfg.validate(),
                Err(Error::InvalidArgument("load_factor_percent"))
            );
        }
        for good in [1, 50, 100] {
            assert!(MapConfig::new().load_factor_percent(good).validate().is_ok());
        }
    }
}
