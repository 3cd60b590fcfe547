//! Setting value validation.

use super::defaults::{KEY_GAP_POLICY, KEY_STRICT_ORDER, KEY_THREADS};

/// Upper bound for `TWOBPP_THREADS`.
pub const MAX_THREADS: usize = 256;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        KEY_GAP_POLICY => {
            if value != "reject" && value != "zero" {
                return Err("must be 'reject' or 'zero'".into());
            }
        }
        KEY_THREADS => {
            let v: usize = value.parse().map_err(|_| "must be a non-negative integer")?;
            if v > MAX_THREADS {
                return Err(format!("must be at most {MAX_THREADS}"));
            }
        }
        KEY_STRICT_ORDER => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => return Err(format!("unknown setting {key}")),
    }
    Ok(())
}
