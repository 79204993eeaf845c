//! String-to-type conversions and the typed accessors built on them.
//!
//! Every parser consumes the whole string: leading or trailing characters,
//! an empty string, or a value outside the target type's range is a
//! [`ConfigError::ParseFailure`].  No partial value is ever returned.

use crate::error::ConfigError;
use crate::store::config_store::ConfigStore;

const TRUE_VALUES: [&str; 4] = ["1", "yes", "true", "on"];
const FALSE_VALUES: [&str; 4] = ["0", "no", "false", "off"];

/// Returns `true` if `value` is `1`, `yes`, `true` or `on`, ignoring ASCII case.
pub fn is_true(value: &str) -> bool {
    TRUE_VALUES.iter().any(|t| value.eq_ignore_ascii_case(t))
}

/// Returns `true` if `value` is `0`, `no`, `false` or `off`, ignoring ASCII case.
///
/// Not used by [`ConfigStore::get_bool`], which only checks [`is_true`].
pub fn is_false(value: &str) -> bool {
    FALSE_VALUES.iter().any(|f| value.eq_ignore_ascii_case(f))
}

/// Parses a signed integer with C-style base detection.
///
/// `0x`/`0X` selects hexadecimal, a leading `0` followed by more digits
/// selects octal, anything else is decimal.  An optional `+` or `-` may
/// precede the prefix.
///
/// # Examples
///
/// ```rust
/// use conftree_core::parse_int;
///
/// assert_eq!(parse_int("0xffff").unwrap(), 65535);
/// assert_eq!(parse_int("-010").unwrap(), -8);
/// assert!(parse_int("12abc").is_err());
/// ```
pub fn parse_int(text: &str) -> Result<i64, ConfigError> {
    let failure = || parse_failure(text, "integer");

    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    // `from_str_radix` would accept a second sign here.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(failure());
    }
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| failure())?;

    if negative {
        0_i64.checked_sub_unsigned(magnitude).ok_or_else(failure)
    } else {
        i64::try_from(magnitude).map_err(|_| failure())
    }
}

/// Parses a double-precision float.
///
/// Overflow to infinity and underflow of a non-zero literal to zero are both
/// failures; `inf` and `nan` written out literally are accepted.
pub fn parse_double(text: &str) -> Result<f64, ConfigError> {
    let value: f64 = text.parse().map_err(|_| parse_failure(text, "double"))?;
    check_range(text, value.is_infinite(), value == 0.0, "double")?;
    Ok(value)
}

/// Parses a single-precision float with the same rules as [`parse_double`],
/// applied at `f32` range.
pub fn parse_float(text: &str) -> Result<f32, ConfigError> {
    let value: f32 = text.parse().map_err(|_| parse_failure(text, "float"))?;
    check_range(text, value.is_infinite(), value == 0.0, "float")?;
    Ok(value)
}

fn check_range(
    text: &str,
    is_infinite: bool,
    is_zero: bool,
    expected: &'static str,
) -> Result<(), ConfigError> {
    let unsigned = text.trim_start_matches(['+', '-']);
    let overflowed = is_infinite && !unsigned.to_ascii_lowercase().starts_with("inf");
    let underflowed = is_zero
        && unsigned
            .bytes()
            .take_while(|b| !matches!(b, b'e' | b'E'))
            .any(|b| matches!(b, b'1'..=b'9'));
    if overflowed || underflowed {
        return Err(parse_failure(text, expected));
    }
    Ok(())
}

fn parse_failure(text: &str, expected: &'static str) -> ConfigError {
    ConfigError::ParseFailure {
        value: text.to_string(),
        expected,
    }
}

impl ConfigStore {
    /// Value at `path` as an integer.
    ///
    /// A node without a value is parsed as the empty string and fails.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParseFailure`], or any error from [`ConfigStore::get`].
    pub fn get_int(&self, path: &str) -> Result<i64, ConfigError> {
        parse_int(self.get(path)?.unwrap_or(""))
    }

    /// Value at `path` as a boolean.
    ///
    /// `true` only for the values accepted by [`is_true`]; every other value,
    /// including `no`/`off` and a missing value, is `false`.
    ///
    /// # Errors
    ///
    /// Any error from [`ConfigStore::get`] (never a parse failure).
    pub fn get_bool(&self, path: &str) -> Result<bool, ConfigError> {
        Ok(self.get(path)?.is_some_and(is_true))
    }

    /// Value at `path` as an `f64`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParseFailure`], or any error from [`ConfigStore::get`].
    pub fn get_double(&self, path: &str) -> Result<f64, ConfigError> {
        parse_double(self.get(path)?.unwrap_or(""))
    }

    /// Value at `path` as an `f32`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParseFailure`], or any error from [`ConfigStore::get`].
    pub fn get_float(&self, path: &str) -> Result<f32, ConfigError> {
        parse_float(self.get(path)?.unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_int ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_int_decimal_hex_octal() {
        assert_eq!(parse_int("0").unwrap(), 0);
        assert_eq!(parse_int("-1").unwrap(), -1);
        assert_eq!(parse_int("+42").unwrap(), 42);
        assert_eq!(parse_int("0xffff").unwrap(), 0xffff);
        assert_eq!(parse_int("0XFF").unwrap(), 255);
        assert_eq!(parse_int("017").unwrap(), 15);
    }

    #[test]
    fn test_parse_int_rejects_garbage() {
        for text in ["", "not-an-int", "12abc", " 12", "12 ", "0x", "08", "-", "0x-5", "--1"] {
            assert!(parse_int(text).is_err(), "{text:?} must not parse");
        }
    }

    #[test]
    fn test_parse_int_range_edges() {
        assert_eq!(parse_int("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(parse_int("-9223372036854775808").unwrap(), i64::MIN);
        assert!(parse_int("9223372036854775808").is_err());
        assert!(parse_int("-9223372036854775809").is_err());
        assert!(parse_int("0x10000000000000000").is_err());
    }

    // ── parse_double / parse_float ────────────────────────────────────────────

    #[test]
    fn test_parse_double_accepts_plain_and_exponent_forms() {
        assert_eq!(parse_double("1.5").unwrap(), 1.5);
        assert_eq!(parse_double("-2e3").unwrap(), -2000.0);
        assert_eq!(parse_double("0").unwrap(), 0.0);
        assert_eq!(parse_double("0.0e10").unwrap(), 0.0);
        assert!(parse_double("inf").unwrap().is_infinite());
    }

    #[test]
    fn test_parse_double_rejects_garbage_and_out_of_range() {
        for text in ["", "abc", "1.5x", " 1.5", "1e400", "1e-400"] {
            assert!(parse_double(text).is_err(), "{text:?} must not parse");
        }
    }

    #[test]
    fn test_parse_float_uses_f32_range() {
        assert_eq!(parse_float("0.25").unwrap(), 0.25_f32);
        assert!(parse_float("1e39").is_err());
        assert!(parse_double("1e39").is_ok());
    }

    // ── Booleans ──────────────────────────────────────────────────────────────

    #[test]
    fn test_is_true_and_is_false_sets() {
        assert!(is_true("YeS"));
        assert!(!is_true("no"));
        assert!(is_false("OFF"));
        assert!(!is_false("something"));
    }

    // ── Store accessors ───────────────────────────────────────────────────────

    fn store() -> ConfigStore {
        ConfigStore::new_initialized().unwrap()
    }

    #[test]
    fn test_get_int_sequence() {
        let mut store = store();
        let name = "some-int.x";

        store.set(name, "0").unwrap();
        assert_eq!(store.get_int(name).unwrap(), 0);
        store.set(name, "-1").unwrap();
        assert_eq!(store.get_int(name).unwrap(), -1);
        store.set(name, "0xffff").unwrap();
        assert_eq!(store.get_int(name).unwrap(), 65535);
        store.set(name, "not-an-int").unwrap();
        assert!(matches!(
            store.get_int(name),
            Err(ConfigError::ParseFailure { .. })
        ));
    }

    #[test]
    fn test_get_bool_true_set_only() {
        let mut store = store();
        let name = "some-bool";

        for value in ["1", "on", "ON", "yes", "YeS", "true", "TRUE"] {
            store.set(name, value).unwrap();
            assert!(store.get_bool(name).unwrap(), "{value:?} must be true");
        }
        for value in ["0", "something", "off", "OFF", "false", "FalSE", "no", "NO"] {
            store.set(name, value).unwrap();
            assert!(!store.get_bool(name).unwrap(), "{value:?} must be false");
        }
    }

    #[test]
    fn test_get_bool_missing_path_is_not_found() {
        let store = store();
        assert!(store.get_bool("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_typed_get_on_branch_without_value() {
        let mut store = store();
        store.set("branch.leaf", "1").unwrap();
        assert!(store.get_int("branch").is_err());
        assert!(!store.get_bool("branch").unwrap());
    }

    #[test]
    fn test_get_double_and_float() {
        let mut store = store();
        store.set("ratio", "0.5").unwrap();
        assert_eq!(store.get_double("ratio").unwrap(), 0.5);
        assert_eq!(store.get_float("ratio").unwrap(), 0.5_f32);
        store.set("ratio", "half").unwrap();
        assert!(store.get_double("ratio").is_err());
        assert!(store.get_float("ratio").is_err());
    }
}
