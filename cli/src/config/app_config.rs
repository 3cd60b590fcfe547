//! Runtime configuration loaded from the environment.

use twobit_codec::{GapPolicy, ThresholdSet};

use super::defaults::{self, KEY_GAP_POLICY, KEY_STRICT_ORDER, KEY_THREADS};
use super::validation::validate_setting;
use crate::error::RunError;

/// Settings that apply to a whole conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub gap_policy: GapPolicy,
    /// Worker threads for row packing; 0 uses rayon's default.
    pub threads: usize,
    pub strict_order: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gap_policy: GapPolicy::Reject,
            threads: 0,
            strict_order: true,
        }
    }
}

impl RunConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, RunError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `get`, falling back to defaults for unset keys.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, RunError> {
        let g = |key: &'static str| -> Result<String, RunError> {
            let value = get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| defaults::get_default(key).unwrap_or_default().to_string());
            validate_setting(key, &value).map_err(|reason| RunError::Config {
                key,
                reason: match defaults::get_def(key) {
                    Some(def) => format!("{reason} ({})", def.description),
                    None => reason,
                },
            })?;
            Ok(value)
        };

        let gap_policy = match g(KEY_GAP_POLICY)?.as_str() {
            "zero" => GapPolicy::Zero,
            _ => GapPolicy::Reject,
        };
        let threads = g(KEY_THREADS)?.parse().unwrap_or_default();
        let strict_order = g(KEY_STRICT_ORDER)? == "true";

        Ok(Self {
            gap_policy,
            threads,
            strict_order,
        })
    }

    /// Build the threshold set for this run, enforcing ascending order when strict.
    pub fn threshold_set(&self, [t1, t2, t3]: [u8; 3]) -> Result<ThresholdSet, RunError> {
        if self.strict_order {
            ThresholdSet::new(t1, t2, t3).map_err(RunError::Thresholds)
        } else {
            Ok(ThresholdSet::unchecked(t1, t2, t3))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<RunConfig, RunError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), RunConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (KEY_GAP_POLICY, "zero"),
            (KEY_THREADS, "4"),
            (KEY_STRICT_ORDER, "false"),
        ])
        .unwrap();
        assert_eq!(config.gap_policy, GapPolicy::Zero);
        assert_eq!(config.threads, 4);
        assert!(!config.strict_order);
    }

    #[test]
    fn test_blank_value_uses_default() {
        assert_eq!(load(&[(KEY_THREADS, "  ")]).unwrap().threads, 0);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let err = load(&[(KEY_GAP_POLICY, "maybe")]).unwrap_err();
        assert!(matches!(err, RunError::Config { key: KEY_GAP_POLICY, .. }));
        assert_eq!(err.exit_code(), 8);
    }

    #[test]
    fn test_config_error_explains_setting() {
        let err = load(&[(KEY_THREADS, "many")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid setting TWOBPP_THREADS: must be a non-negative integer \
             (worker threads for row packing, 0 uses one per core)"
        );
    }

    #[test]
    fn test_strict_threshold_order() {
        let strict = RunConfig::default();
        assert!(strict.threshold_set([50, 100, 150]).is_ok());
        assert_eq!(strict.threshold_set([150, 100, 50]).unwrap_err().exit_code(), 3);

        let lenient = RunConfig {
            strict_order: false,
            ..RunConfig::default()
        };
        let set = lenient.threshold_set([150, 100, 50]).unwrap();
        assert!(!set.is_ordered());
    }
}
