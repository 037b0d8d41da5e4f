//! Value coercion
//!
//! Converts raw [`ConfigValue`]s into the declared type of a configuration
//! slot. Numbers accept numeric strings, booleans accept the usual textual
//! spellings, strings accept any scalar, and collections accept lists.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::path::PathBuf;

use hearth_domain::error::CoercionError;
use hearth_domain::value_objects::ConfigValue;

/// Types a configuration value can be coerced into
pub trait FromConfigValue: Sized {
    /// Coerce `value` into `Self`
    ///
    /// # Errors
    ///
    /// [`CoercionError::Mismatch`] when the value kind has no conversion,
    /// other variants when the conversion exists but the value is unusable.
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError>;
}

fn mismatch(expected: &'static str, value: &ConfigValue) -> CoercionError {
    CoercionError::Mismatch {
        expected,
        found: value.kind(),
    }
}

fn out_of_range(value: impl ToString, target: &'static str) -> CoercionError {
    CoercionError::OutOfRange {
        value: value.to_string(),
        target,
    }
}

macro_rules! impl_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
                    let target = stringify!($ty);
                    match value {
                        ConfigValue::Integer(n) => {
                            <$ty>::try_from(*n).map_err(|_| out_of_range(n, target))
                        }
                        ConfigValue::String(s) => {
                            let trimmed = s.trim();
                            let parsed: i128 = trimmed.parse().map_err(|_| mismatch("integer", value))?;
                            <$ty>::try_from(parsed).map_err(|_| out_of_range(trimmed, target))
                        }
                        other => Err(mismatch("integer", other)),
                    }
                }
            }
        )+
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        match value {
            ConfigValue::Float(f) => Ok(*f),
            #[allow(clippy::cast_precision_loss)]
            ConfigValue::Integer(n) => Ok(*n as f64),
            ConfigValue::String(s) => s.trim().parse().map_err(|_| mismatch("float", value)),
            other => Err(mismatch("float", other)),
        }
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        match value {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::Integer(0) => Ok(false),
            ConfigValue::Integer(1) => Ok(true),
            ConfigValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(CoercionError::UnknownSymbol {
                    value: s.clone(),
                    allowed: vec!["true", "false", "yes", "no", "on", "off", "1", "0"],
                }),
            },
            other => Err(mismatch("boolean", other)),
        }
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        value.to_scalar_string().ok_or_else(|| mismatch("string", value))
    }
}

impl FromConfigValue for PathBuf {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        String::from_config_value(value).map(PathBuf::from)
    }
}

/// The raw value, unconverted
impl FromConfigValue for ConfigValue {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        Ok(value.clone())
    }
}

impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        match value {
            ConfigValue::Null => Ok(None),
            other => T::from_config_value(other).map(Some),
        }
    }
}

impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        let items = value.as_list().ok_or_else(|| mismatch("list", value))?;
        items.iter().map(T::from_config_value).collect()
    }
}

impl<T: FromConfigValue + Eq + Hash> FromConfigValue for HashSet<T> {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        let items = value.as_list().ok_or_else(|| mismatch("list", value))?;
        items.iter().map(T::from_config_value).collect()
    }
}

impl<T: FromConfigValue + Ord> FromConfigValue for BTreeSet<T> {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        let items = value.as_list().ok_or_else(|| mismatch("list", value))?;
        items.iter().map(T::from_config_value).collect()
    }
}

/// Set of values that keeps the order values were first seen in
///
/// Coerced from a list; later duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UniqueList<T>(Vec<T>);

impl<T> UniqueList<T> {
    /// Values in first-occurrence order
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Take the values out
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> std::ops::Deref for UniqueList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for UniqueList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        Self(iter.into_iter().filter(|item| seen.insert(item.clone())).collect())
    }
}

impl<T: FromConfigValue + Eq + Hash + Clone> FromConfigValue for UniqueList<T> {
    fn from_config_value(value: &ConfigValue) -> Result<Self, CoercionError> {
        let items = value.as_list().ok_or_else(|| mismatch("list", value))?;
        items.iter().map(T::from_config_value).collect()
    }
}

/// Look a string value up in a symbol table
///
/// Matching is exact. Used by [`config_enum!`](crate::config_enum).
///
/// # Errors
///
/// [`CoercionError::Mismatch`] for non-string values,
/// [`CoercionError::UnknownSymbol`] when no symbol matches.
pub fn coerce_symbol<T: Clone>(
    value: &ConfigValue,
    symbols: &[(&'static str, T)],
) -> Result<T, CoercionError> {
    let text = value.as_str().ok_or_else(|| mismatch("string", value))?;
    symbols
        .iter()
        .find(|(symbol, _)| *symbol == text)
        .map(|(_, member)| member.clone())
        .ok_or_else(|| CoercionError::UnknownSymbol {
            value: text.to_string(),
            allowed: symbols.iter().map(|(symbol, _)| *symbol).collect(),
        })
}

/// Implement [`FromConfigValue`] for a symbolic enum
///
/// ```ignore
/// #[derive(Clone)]
/// enum Mode { Fast, Safe }
///
/// hearth_application::config_enum!(Mode {
///     "FAST" => Mode::Fast,
///     "SAFE" => Mode::Safe,
/// });
/// ```
#[macro_export]
macro_rules! config_enum {
    ($ty:ty { $($symbol:literal => $member:expr),+ $(,)? }) => {
        impl $crate::injection::FromConfigValue for $ty {
            fn from_config_value(
                value: &$crate::__private::ConfigValue,
            ) -> ::std::result::Result<Self, $crate::__private::CoercionError> {
                $crate::injection::coerce_symbol(value, &[$(($symbol, $member)),+])
            }
        }
    };
}
