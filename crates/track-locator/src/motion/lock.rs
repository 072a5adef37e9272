//! GPS lock quality from reported accuracy.

use crate::config::LocatorConfig;
use crate::models::types::LockStatus;

/// Classify lock quality from reported horizontal accuracy.
///
/// Both bounds are inclusive on the better side: exactly 50 m is strong and
/// exactly 100 m is weak with the default config. A non-finite accuracy is
/// treated as no fix.
pub fn classify_lock(accuracy_m: f64, config: &LocatorConfig) -> LockStatus {
    if !accuracy_m.is_finite() {
        LockStatus::NoFix
    } else if accuracy_m <= config.strong_lock_max_accuracy_m {
        LockStatus::Strong
    } else if accuracy_m <= config.weak_lock_max_accuracy_m {
        LockStatus::Weak
    } else {
        LockStatus::NoFix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_boundaries() {
        let config = LocatorConfig::default();

        assert_eq!(classify_lock(0.0, &config), LockStatus::Strong);
        assert_eq!(classify_lock(50.0, &config), LockStatus::Strong);
        assert_eq!(classify_lock(50.01, &config), LockStatus::Weak);
        assert_eq!(classify_lock(100.0, &config), LockStatus::Weak);
        assert_eq!(classify_lock(100.01, &config), LockStatus::NoFix);
        assert_eq!(classify_lock(5_000.0, &config), LockStatus::NoFix);
        assert_eq!(classify_lock(f64::NAN, &config), LockStatus::NoFix);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = LocatorConfig {
            strong_lock_max_accuracy_m: 10.0,
            weak_lock_max_accuracy_m: 20.0,
            ..LocatorConfig::default()
        };

        assert_eq!(classify_lock(15.0, &config), LockStatus::Weak);
        assert_eq!(classify_lock(25.0, &config), LockStatus::NoFix);
    }
}
