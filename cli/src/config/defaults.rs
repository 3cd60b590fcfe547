//! Setting definitions with their default values.

/// Environment variable selecting how samples in `(0, t1]` are handled.
pub const KEY_GAP_POLICY: &str = "TWOBPP_GAP_POLICY";
/// Environment variable with the worker thread count (0 = one per core).
pub const KEY_THREADS: &str = "TWOBPP_THREADS";
/// Environment variable controlling whether descending thresholds are rejected.
pub const KEY_STRICT_ORDER: &str = "TWOBPP_STRICT_ORDER";

/// Width and height of the generated gradient test image.
pub const GRADIENT_SIZE: u32 = 1000;

/// Resolution (dpi) of a generated gradient when none is given.
pub const GRADIENT_DPI: u32 = 300;

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

pub const SETTINGS: &[SettingDef] = &[
    SettingDef {
        key: KEY_GAP_POLICY,
        default: "reject",
        description: "reject: fail on samples in (0, t1]; zero: classify them as level 0",
    },
    SettingDef {
        key: KEY_THREADS,
        default: "0",
        description: "worker threads for row packing, 0 uses one per core",
    },
    SettingDef {
        key: KEY_STRICT_ORDER,
        default: "true",
        description: "reject thresholds that are not ascending",
    },
];

/// Look up the definition of a setting key.
pub fn get_def(key: &str) -> Option<&'static SettingDef> {
    SETTINGS.iter().find(|d| d.key == key)
}

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    get_def(key).map(|d| d.default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_is_valid() {
        for def in SETTINGS {
            assert!(
                super::super::validation::validate_setting(def.key, def.default).is_ok(),
                "default for {} is invalid",
                def.key
            );
        }
    }

    #[test]
    fn test_unknown_key_has_no_default() {
        assert_eq!(get_default("TWOBPP_NOPE"), None);
        assert_eq!(get_default(KEY_THREADS), Some("0"));
        assert!(get_def("TWOBPP_NOPE").is_none());
    }

    #[test]
    fn test_every_setting_is_described() {
        for def in SETTINGS {
            assert!(!def.description.is_empty(), "{} has no description", def.key);
        }
    }
}
