//! String ⇄ native value coercion for a single field.
//!
//! Every bindable field type implements [`Coerce`]. Hydration goes through
//! [`hydrate`], which gives user hooks the first chance at the input:
//!
//! 1. [`Decode`]
//! 2. [`SetFromStr`]
//! 3. [`ParseText`]
//! 4. [`ParseBinary`]
//! 5. the type's built-in [`Coerce::coerce`]
//!
//! Serialization goes through [`render`], which prefers an [`Encode`] hook
//! over the built-in [`Coerce::render`].

mod collection;
mod duration;
mod error;
mod scalar;

pub use duration::{format_duration, parse_duration};
pub use error::CoerceError;

use crate::BoxError;

/// Custom decoding from a string. Takes precedence over every other hook.
pub trait Decode {
    fn decode(&mut self, value: &str) -> Result<(), BoxError>;
}

/// Self-deserialization from a string.
pub trait SetFromStr {
    fn set(&mut self, value: &str) -> Result<(), BoxError>;
}

/// Parsing from the text bytes of the value.
pub trait ParseText {
    fn parse_text(&mut self, text: &[u8]) -> Result<(), BoxError>;
}

/// Parsing from the raw bytes of the value.
pub trait ParseBinary {
    fn parse_binary(&mut self, data: &[u8]) -> Result<(), BoxError>;
}

/// Custom rendering used when marshaling.
pub trait Encode {
    fn encode(&self) -> String;
}

/// A value that can be bound to a single key.
///
/// The `as_*` accessors declare which hooks a type exposes; they default to
/// `None`. A user type typically implements one hook trait and returns
/// `Some(self)` from the matching accessor:
///
/// ```
/// use kv_mapper::{BoxError, Coerce, SetFromStr};
///
/// #[derive(Default)]
/// struct Level(u8);
///
/// impl SetFromStr for Level {
///     fn set(&mut self, value: &str) -> Result<(), BoxError> {
///         self.0 = match value {
///             "low" => 1,
///             "high" => 9,
///             other => return Err(format!("unknown level {other}").into()),
///         };
///         Ok(())
///     }
/// }
///
/// impl Coerce for Level {
///     fn as_setter(&mut self) -> Option<&mut dyn SetFromStr> {
///         Some(self)
///     }
///
///     fn render(&self) -> String {
///         self.0.to_string()
///     }
/// }
/// ```
pub trait Coerce {
    fn as_decoder(&mut self) -> Option<&mut dyn Decode> {
        None
    }

    fn as_setter(&mut self) -> Option<&mut dyn SetFromStr> {
        None
    }

    fn as_text(&mut self) -> Option<&mut dyn ParseText> {
        None
    }

    fn as_binary(&mut self) -> Option<&mut dyn ParseBinary> {
        None
    }

    fn as_encoder(&self) -> Option<&dyn Encode> {
        None
    }

    /// Built-in conversion by kind. Kinds without one leave the value untouched.
    fn coerce(&mut self, _value: &str) -> Result<(), CoerceError> {
        Ok(())
    }

    /// Built-in textual rendering.
    fn render(&self) -> String {
        String::new()
    }

    /// Typed rendering handed to raw setters.
    fn to_raw(&self) -> toml::Value {
        let text = match self.as_encoder() {
            Some(encoder) => encoder.encode(),
            None => self.render(),
        };
        toml::Value::String(text)
    }

    /// Hydrates a whole `Vec<Self>` from one string.
    ///
    /// Splits on `,`; byte elements override this to take the raw bytes.
    /// `seq` is only replaced once every element has converted.
    fn coerce_sequence(seq: &mut Vec<Self>, value: &str) -> Result<(), CoerceError>
    where
        Self: Sized + Default,
    {
        let mut items = Vec::new();
        if !value.trim().is_empty() {
            for piece in value.split(',') {
                let mut item = Self::default();
                hydrate(&mut item, piece)?;
                items.push(item);
            }
        }
        *seq = items;
        Ok(())
    }

    fn render_sequence(seq: &[Self]) -> String
    where
        Self: Sized,
    {
        seq.iter()
            .map(|item| render(item))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn sequence_to_raw(seq: &[Self]) -> toml::Value
    where
        Self: Sized,
    {
        toml::Value::Array(seq.iter().map(Coerce::to_raw).collect())
    }
}

/// Hydrates `target` from `value`, honouring hooks in precedence order.
pub fn hydrate(target: &mut dyn Coerce, value: &str) -> Result<(), CoerceError> {
    if let Some(decoder) = target.as_decoder() {
        return decoder.decode(value).map_err(CoerceError::Custom);
    }
    if let Some(setter) = target.as_setter() {
        return setter.set(value).map_err(CoerceError::Custom);
    }
    if let Some(text) = target.as_text() {
        return text.parse_text(value.as_bytes()).map_err(CoerceError::Custom);
    }
    if let Some(binary) = target.as_binary() {
        return binary
            .parse_binary(value.as_bytes())
            .map_err(CoerceError::Custom);
    }
    target.coerce(value)
}

/// Renders `value` for a string setter.
pub fn render(value: &dyn Coerce) -> String {
    match value.as_encoder() {
        Some(encoder) => encoder.encode(),
        None => value.render(),
    }
}

/// Whether `value` exposes any of the four hydration hooks.
pub fn exposes_hook(value: &mut dyn Coerce) -> bool {
    value.as_decoder().is_some()
        || value.as_setter().is_some()
        || value.as_text().is_some()
        || value.as_binary().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct AllHooks {
        used: &'static str,
    }

    impl Decode for AllHooks {
        fn decode(&mut self, _value: &str) -> Result<(), BoxError> {
            self.used = "decode";
            Ok(())
        }
    }

    impl SetFromStr for AllHooks {
        fn set(&mut self, _value: &str) -> Result<(), BoxError> {
            self.used = "set";
            Ok(())
        }
    }

    impl ParseText for AllHooks {
        fn parse_text(&mut self, _text: &[u8]) -> Result<(), BoxError> {
            self.used = "text";
            Ok(())
        }
    }

    impl ParseBinary for AllHooks {
        fn parse_binary(&mut self, _data: &[u8]) -> Result<(), BoxError> {
            self.used = "binary";
            Ok(())
        }
    }

    impl Coerce for AllHooks {
        fn as_decoder(&mut self) -> Option<&mut dyn Decode> {
            Some(self)
        }

        fn as_setter(&mut self) -> Option<&mut dyn SetFromStr> {
            Some(self)
        }

        fn as_text(&mut self) -> Option<&mut dyn ParseText> {
            Some(self)
        }

        fn as_binary(&mut self) -> Option<&mut dyn ParseBinary> {
            Some(self)
        }

        fn coerce(&mut self, _value: &str) -> Result<(), CoerceError> {
            self.used = "builtin";
            Ok(())
        }
    }

    #[derive(Default)]
    struct TextAndBinary {
        bytes: Vec<u8>,
        via: &'static str,
    }

    impl ParseText for TextAndBinary {
        fn parse_text(&mut self, text: &[u8]) -> Result<(), BoxError> {
            self.bytes = text.to_vec();
            self.via = "text";
            Ok(())
        }
    }

    impl ParseBinary for TextAndBinary {
        fn parse_binary(&mut self, data: &[u8]) -> Result<(), BoxError> {
            self.bytes = data.to_vec();
            self.via = "binary";
            Ok(())
        }
    }

    impl Coerce for TextAndBinary {
        fn as_text(&mut self) -> Option<&mut dyn ParseText> {
            Some(self)
        }

        fn as_binary(&mut self) -> Option<&mut dyn ParseBinary> {
            Some(self)
        }
    }

    #[derive(Default)]
    struct NoDecoder {
        via: &'static str,
    }

    impl SetFromStr for NoDecoder {
        fn set(&mut self, _value: &str) -> Result<(), BoxError> {
            self.via = "set";
            Ok(())
        }
    }

    impl ParseText for NoDecoder {
        fn parse_text(&mut self, _text: &[u8]) -> Result<(), BoxError> {
            self.via = "text";
            Ok(())
        }
    }

    impl ParseBinary for NoDecoder {
        fn parse_binary(&mut self, _data: &[u8]) -> Result<(), BoxError> {
            self.via = "binary";
            Ok(())
        }
    }

    impl Coerce for NoDecoder {
        fn as_setter(&mut self) -> Option<&mut dyn SetFromStr> {
            Some(self)
        }

        fn as_text(&mut self) -> Option<&mut dyn ParseText> {
            Some(self)
        }

        fn as_binary(&mut self) -> Option<&mut dyn ParseBinary> {
            Some(self)
        }
    }

    struct Hex(u32);

    impl Encode for Hex {
        fn encode(&self) -> String {
            format!("{:#x}", self.0)
        }
    }

    impl Coerce for Hex {
        fn as_encoder(&self) -> Option<&dyn Encode> {
            Some(self)
        }

        fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
            hydrate(&mut self.0, value)
        }

        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    struct Failing;

    impl Decode for Failing {
        fn decode(&mut self, value: &str) -> Result<(), BoxError> {
            Err(format!("refusing {value}").into())
        }
    }

    impl Coerce for Failing {
        fn as_decoder(&mut self) -> Option<&mut dyn Decode> {
            Some(self)
        }
    }

    #[test]
    fn test_decode_hook_wins() {
        let mut value = AllHooks::default();
        hydrate(&mut value, "x").unwrap();
        assert_eq!(value.used, "decode");
    }

    #[test]
    fn test_setter_before_text_and_binary() {
        let mut value = NoDecoder::default();
        hydrate(&mut value, "x").unwrap();
        assert_eq!(value.via, "set");
    }

    #[test]
    fn test_text_hook_before_binary() {
        let mut value = TextAndBinary::default();
        hydrate(&mut value, "abc").unwrap();
        assert_eq!(value.via, "text");
        assert_eq!(value.bytes, b"abc");
    }

    #[test]
    fn test_exposes_hook() {
        assert!(exposes_hook(&mut AllHooks::default()));
        assert!(exposes_hook(&mut TextAndBinary::default()));
        assert!(!exposes_hook(&mut 0u8));
        assert!(!exposes_hook(&mut Hex(1)));
    }

    #[test]
    fn test_hook_error_is_wrapped() {
        let err = hydrate(&mut Failing, "nope").unwrap_err();
        assert!(matches!(err, CoerceError::Custom(_)));
        assert_eq!(err.to_string(), "refusing nope");
    }

    #[test]
    fn test_render_prefers_encoder() {
        let mut value = Hex(0);
        hydrate(&mut value, "255").unwrap();
        assert_eq!(render(&value), "0xff");
        assert_eq!(value.render(), "255");
        assert_eq!(value.to_raw(), toml::Value::String("0xff".into()));
    }

    #[test]
    fn test_unhooked_user_type_is_noop() {
        struct Opaque(u8);
        impl Coerce for Opaque {}

        let mut value = Opaque(3);
        hydrate(&mut value, "9").unwrap();
        assert_eq!(value.0, 3);
    }
}
