//! Records and their field tables.
//!
//! A [`Record`] lists its fields in declaration order. Each [`Field`] holds
//! a mutable handle to either a leaf value or a nested record, along with the
//! tag metadata that drives key derivation:
//!
//! ```
//! use kv_mapper::{Field, Record};
//!
//! #[derive(Default)]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     name: String,
//!     database: Database,
//! }
//!
//! impl Record for Database {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::value("host", &mut self.host).keyname("DB_HOST").required(),
//!             Field::value("port", &mut self.port).keyname("DB_PORT").default_value("5432"),
//!         ]
//!     }
//! }
//!
//! impl Record for AppConfig {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::value("name", &mut self.name).keyname("APP_NAME"),
//!             Field::record("database", &mut self.database),
//!         ]
//!     }
//! }
//! ```

mod introspect;
mod naming;

pub use introspect::{describe, Descriptor, MAX_DEPTH};
pub(crate) use introspect::Introspector;
pub use naming::{derive_key, split_words};

use crate::codec::Coerce;

/// A structured type whose fields can be bound to keys.
pub trait Record {
    /// The record's fields, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Lets a record act as a single value.
    ///
    /// A record whose value exposes a hydration hook is bound as one leaf
    /// instead of being flattened into its fields.
    fn as_value(&mut self) -> Option<&mut dyn Coerce> {
        None
    }
}

/// A nil record pointer is allocated so its fields can be reached.
impl<R: Record + Default> Record for Option<R> {
    fn fields(&mut self) -> Vec<Field<'_>> {
        self.get_or_insert_with(R::default).fields()
    }

    fn as_value(&mut self) -> Option<&mut dyn Coerce> {
        self.get_or_insert_with(R::default).as_value()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&mut self) -> Vec<Field<'_>> {
        (**self).fields()
    }

    fn as_value(&mut self) -> Option<&mut dyn Coerce> {
        (**self).as_value()
    }
}

/// Metadata attached to a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags {
    pub keyname: Option<&'static str>,
    pub default: Option<&'static str>,
    pub required: bool,
    pub ignored: bool,
    pub split_words: bool,
}

/// What a field holds.
pub enum Slot<'a> {
    Value(&'a mut dyn Coerce),
    Record(&'a mut dyn Record),
}

/// One entry of a record's field table.
pub struct Field<'a> {
    pub(crate) name: &'static str,
    pub(crate) type_name: &'static str,
    pub(crate) tags: Tags,
    pub(crate) slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// A leaf field bound through [`Coerce`].
    pub fn value<T: Coerce>(name: &'static str, value: &'a mut T) -> Self {
        Self {
            name,
            type_name: std::any::type_name::<T>(),
            tags: Tags::default(),
            slot: Slot::Value(value),
        }
    }

    /// A nested record, flattened unless it exposes a hydration hook.
    pub fn record<R: Record>(name: &'static str, record: &'a mut R) -> Self {
        Self {
            name,
            type_name: std::any::type_name::<R>(),
            tags: Tags::default(),
            slot: Slot::Record(record),
        }
    }

    /// Explicit key, replacing the derived one. May contain `%s` for the key processor.
    #[must_use]
    pub fn keyname(mut self, keyname: &'static str) -> Self {
        self.tags.keyname = Some(keyname);
        self
    }

    /// Value used when the key is absent.
    #[must_use]
    pub fn default_value(mut self, default: &'static str) -> Self {
        self.tags.default = Some(default);
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.tags.required = true;
        self
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.tags.ignored = true;
        self
    }

    /// Derive the key by splitting the camel-cased name into `_`-joined words.
    #[must_use]
    pub fn split_words(mut self) -> Self {
        self.tags.split_words = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}
