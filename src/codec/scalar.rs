use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use super::duration::{format_duration, parse_duration};
use super::{Coerce, CoerceError};

/// Splits an integer literal into sign, radix and digits.
///
/// Accepts `0x`, `0o` and `0b` prefixes (either case) and a leading `0` for
/// octal. Returns `None` for text that cannot be an integer literal at all.
fn split_radix(value: &str) -> Option<(&str, u32, &str)> {
    let (sign, rest) = match value.as_bytes().first() {
        Some(b'-') => ("-", &value[1..]),
        Some(b'+') => ("", &value[1..]),
        _ => ("", value),
    };

    let lower = rest.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match lower.as_deref() {
        Some("0x") => (16, &rest[2..]),
        Some("0o") => (8, &rest[2..]),
        Some("0b") => (2, &rest[2..]),
        _ if rest.len() > 1 && rest.starts_with('0') => (8, &rest[1..]),
        _ => (10, rest),
    };

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    Some((sign, radix, digits))
}

macro_rules! integer_coerce {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
                    let (sign, radix, digits) =
                        split_radix(value).ok_or_else(|| CoerceError::syntax(value))?;
                    *self = <$ty>::from_str_radix(&format!("{sign}{digits}"), radix).map_err(
                        |source| CoerceError::Int {
                            value: value.to_string(),
                            source,
                        },
                    )?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn to_raw(&self) -> toml::Value {
                    match i64::try_from(*self) {
                        Ok(int) => toml::Value::Integer(int),
                        Err(_) => toml::Value::String(self.to_string()),
                    }
                }
            }
        )*
    };
}

integer_coerce!(i8, i16, i32, i64, isize, u16, u32, u64, usize);

// `u8` is split out so byte vectors take the raw string instead of a list.
impl Coerce for u8 {
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        let (sign, radix, digits) = split_radix(value).ok_or_else(|| CoerceError::syntax(value))?;
        *self = u8::from_str_radix(&format!("{sign}{digits}"), radix).map_err(|source| {
            CoerceError::Int {
                value: value.to_string(),
                source,
            }
        })?;
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_raw(&self) -> toml::Value {
        toml::Value::Integer(i64::from(*self))
    }

    fn coerce_sequence(seq: &mut Vec<Self>, value: &str) -> Result<(), CoerceError> {
        *seq = value.as_bytes().to_vec();
        Ok(())
    }

    fn render_sequence(seq: &[Self]) -> String {
        String::from_utf8_lossy(seq).into_owned()
    }

    fn sequence_to_raw(seq: &[Self]) -> toml::Value {
        toml::Value::String(Self::render_sequence(seq))
    }
}

macro_rules! float_coerce {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
                    *self = value.parse::<$ty>().map_err(|source| CoerceError::Float {
                        value: value.to_string(),
                        source,
                    })?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn to_raw(&self) -> toml::Value {
                    toml::Value::Float(f64::from(*self))
                }
            }
        )*
    };
}

float_coerce!(f32, f64);

impl Coerce for bool {
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        *self = match value {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => return Err(CoerceError::syntax(value)),
        };
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_raw(&self) -> toml::Value {
        toml::Value::Boolean(*self)
    }
}

impl Coerce for String {
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        value.clone_into(self);
        Ok(())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl Coerce for Duration {
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        *self = parse_duration(value)?;
        Ok(())
    }

    fn render(&self) -> String {
        format_duration(*self)
    }
}

macro_rules! from_str_coerce {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
                    *self = value
                        .parse::<$ty>()
                        .map_err(|e| CoerceError::Custom(Box::new(e)))?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

from_str_coerce!(char, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

impl Coerce for PathBuf {
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        *self = PathBuf::from(value);
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}
