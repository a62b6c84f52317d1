//! Shared configuration snapshot with validated replacement.
//!
//! Readers take an `Arc<ServoConfig>` snapshot and keep it for as long as
//! they need; a writer replaces the snapshot as a whole. A candidate goes
//! through the same validation as startup plus a scope check before it is
//! swapped in, so readers only ever observe a fully validated table.
//!
//! **Reloadable**: calibration table, travel bound, timing values.
//!
//! **NOT reloadable** (require restart): device address, because the bus
//! driver has already been initialised against it.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ConfigLoader;
use crate::error::ValidationErrors;
use crate::servo::ServoConfig;

/// Why a replacement config was rejected. The active snapshot is unchanged.
#[derive(Debug, Clone, Error)]
pub enum ReloadError {
    /// Candidate could not be parsed.
    #[error("reload parse failed: {0}")]
    Parse(String),

    /// Candidate failed validation.
    #[error("reload validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Candidate changes a field that cannot change at runtime.
    #[error("reload scope violation: {0}")]
    ScopeViolation(String),
}

/// Process-wide servo configuration behind a single-writer swap.
#[derive(Debug)]
pub struct SharedServoConfig {
    active: RwLock<Arc<ServoConfig>>,
}

impl SharedServoConfig {
    /// Wrap an initial configuration.
    ///
    /// # Errors
    ///
    /// Every validation error in `config`.
    pub fn new(config: ServoConfig) -> Result<Self, ValidationErrors> {
        config.validate()?;
        Ok(Self {
            active: RwLock::new(Arc::new(config)),
        })
    }

    /// Current validated configuration.
    pub fn snapshot(&self) -> Arc<ServoConfig> {
        Arc::clone(&self.active.read())
    }

    /// Validate `candidate`, check reload scope, then swap it in.
    ///
    /// Returns the new snapshot. On error nothing changes.
    pub fn replace(&self, candidate: ServoConfig) -> Result<Arc<ServoConfig>, ReloadError> {
        candidate.validate()?;

        let mut active = self.active.write();
        check_reload_scope(&active, &candidate)?;

        let next = Arc::new(candidate);
        *active = Arc::clone(&next);
        info!("Servo configuration replaced");
        Ok(next)
    }

    /// Parse a TOML document and [`replace`](Self::replace) with it.
    pub fn reload_from_str(&self, content: &str) -> Result<Arc<ServoConfig>, ReloadError> {
        let candidate = <ServoConfig as ConfigLoader>::from_toml(content)
            .map_err(|e| ReloadError::Parse(e.to_string()))?;
        self.replace(candidate)
    }
}

fn check_reload_scope(active: &ServoConfig, shadow: &ServoConfig) -> Result<(), ReloadError> {
    if active.device_address != shadow.device_address {
        warn!(
            "Rejected reload: device address {} -> {}",
            active.device_address, shadow.device_address
        );
        return Err(ReloadError::ScopeViolation(format!(
            "device address changed: {} → {} (requires restart)",
            active.device_address, shadow.device_address
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::servo::{DeviceAddress, ServoCalibration, ServoChannel};

    #[test]
    fn rejects_invalid_initial_config() {
        let mut config = ServoConfig::default();
        config.timing.servo_timeout = 0;
        assert!(SharedServoConfig::new(config).is_err());
    }

    #[test]
    fn replace_swaps_snapshot() {
        let shared = SharedServoConfig::new(ServoConfig::default()).unwrap();
        let before = shared.snapshot();

        let mut candidate = ServoConfig::default();
        candidate
            .calibration
            .set(ServoChannel::Jaw, ServoCalibration::new(70, 95, 115));
        shared.replace(candidate).unwrap();

        let after = shared.snapshot();
        assert_eq!(after.channel(ServoChannel::Jaw), ServoCalibration::new(70, 95, 115));
        // Old readers keep their snapshot.
        assert_eq!(before.channel(ServoChannel::Jaw), ServoCalibration::new(60, 90, 120));
    }

    #[test]
    fn invalid_candidate_leaves_snapshot_untouched() {
        let shared = SharedServoConfig::new(ServoConfig::default()).unwrap();

        let mut candidate = ServoConfig::default();
        candidate
            .calibration
            .set(ServoChannel::EarLeft, ServoCalibration::new(120, 90, 60));
        let result = shared.replace(candidate);

        assert!(matches!(result, Err(ReloadError::Validation(_))));
        assert_eq!(*shared.snapshot(), ServoConfig::default());
    }

    #[test]
    fn device_address_change_is_scope_violation() {
        let shared = SharedServoConfig::new(ServoConfig::default()).unwrap();

        let candidate = ServoConfig {
            device_address: DeviceAddress::new(0x41).unwrap(),
            ..ServoConfig::default()
        };
        let result = shared.replace(candidate);

        assert!(matches!(result, Err(ReloadError::ScopeViolation(_))));
        assert_eq!(shared.snapshot().device_address.get(), 0x40);
    }

    #[test]
    fn reload_from_str_parses_and_swaps() {
        let shared = SharedServoConfig::new(ServoConfig::default()).unwrap();
        let next = shared
            .reload_from_str(
                r#"
[timing]
blink_interval = 4000
"#,
            )
            .unwrap();
        assert_eq!(next.timing.blink_interval, 4000);
        assert_eq!(shared.snapshot().timing.blink_interval, 4000);
    }

    #[test]
    fn reload_from_str_reports_parse_errors() {
        let shared = SharedServoConfig::new(ServoConfig::default()).unwrap();
        let result = shared.reload_from_str("timing = {{");
        assert!(matches!(result, Err(ReloadError::Parse(_))));
    }

    #[test]
    fn readers_on_other_threads_see_valid_snapshots() {
        let shared = Arc::new(SharedServoConfig::new(ServoConfig::default()).unwrap());

        let reader = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    assert!(shared.snapshot().validate().is_ok());
                }
            })
        };

        for step in 0..100u8 {
            let mut candidate = ServoConfig::default();
            candidate.calibration.set(
                ServoChannel::HeadPan,
                ServoCalibration::new(45, 90 + step % 40, 135),
            );
            shared.replace(candidate).unwrap();
        }

        reader.join().unwrap();
    }
}
