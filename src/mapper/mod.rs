//! Binding records to and from key/value collaborators.

mod builder;

pub use builder::MapperBuilder;

use tracing::debug;

use crate::codec::{hydrate, render};
use crate::record::{Descriptor, Introspector, Record};
use crate::source::{KeyProcessor, KeyValueGetter, KeyValueRawSetter, KeyValueSetter};
use crate::{Error, ParseError};

/// Hydrates records from a [`KeyValueGetter`] and serializes them into a
/// [`KeyValueSetter`] and/or [`KeyValueRawSetter`].
///
/// Every call introspects the target afresh; the mapper keeps no state
/// between calls besides its collaborators.
pub struct Mapper<'a> {
    getter: Option<Box<dyn KeyValueGetter + 'a>>,
    setter: Option<Box<dyn KeyValueSetter + 'a>>,
    raw_setter: Option<Box<dyn KeyValueRawSetter + 'a>>,
    processor: Option<Box<dyn KeyProcessor + 'a>>,
    prefix: String,
    bind_derived_keys: bool,
}

impl<'a> Mapper<'a> {
    pub fn builder() -> MapperBuilder<'a> {
        MapperBuilder::new()
    }

    fn introspector(&self) -> Introspector<'_> {
        Introspector {
            prefix: &self.prefix,
            bind_derived_keys: self.bind_derived_keys,
            processor: self.processor.as_deref().map(|p| p as &dyn KeyProcessor),
        }
    }

    /// Lists the leaves of `target` with the keys this mapper would use.
    ///
    /// Like every operation, this allocates `None` record pointers.
    pub fn describe<'t>(&self, target: &'t mut dyn Record) -> Result<Vec<Descriptor<'t>>, Error> {
        self.introspector().describe(target)
    }

    /// Populates `target` from the getter.
    ///
    /// Absent keys fall back to the field's default; absent keys without a
    /// default fail for required fields and are skipped otherwise. Stops at
    /// the first value that cannot be converted.
    pub fn unmarshal(&self, target: &mut dyn Record) -> Result<(), Error> {
        let getter = self
            .getter
            .as_deref()
            .ok_or(Error::MissingCollaborator("getter"))?;

        for descriptor in self.describe(target)? {
            let value = match (getter.get(&descriptor.key), descriptor.default) {
                (Some(value), _) => value,
                (None, Some(default)) => {
                    debug!(key = %descriptor.key, "using default value");
                    default.to_string()
                }
                (None, None) if descriptor.required => {
                    return Err(Error::MissingRequired(descriptor.display_key().to_string()));
                }
                (None, None) => {
                    debug!(key = %descriptor.key, "no value, leaving field unchanged");
                    continue;
                }
            };

            let Descriptor {
                name,
                key,
                type_name,
                handle,
                ..
            } = descriptor;
            if let Err(source) = hydrate(handle, &value) {
                return Err(ParseError {
                    key,
                    field: name,
                    type_name,
                    value,
                    source,
                }
                .into());
            }
            debug!(key = %key, field = name, "bound field");
        }

        Ok(())
    }

    /// Same as [`unmarshal`](Self::unmarshal), but panics if an error occurs.
    pub fn must_unmarshal(&self, target: &mut dyn Record) {
        if let Err(e) = self.unmarshal(target) {
            panic!("{e}");
        }
    }

    /// Writes every leaf of `target` to the configured setters.
    ///
    /// Values go to the string setter rendered as text and to the raw setter
    /// as typed TOML values. Stops at the first write that fails.
    pub fn marshal(&mut self, target: &mut dyn Record) -> Result<(), Error> {
        if self.setter.is_none() && self.raw_setter.is_none() {
            return Err(Error::MissingCollaborator("setter"));
        }

        let descriptors = self.introspector().describe(target)?;

        for descriptor in descriptors {
            let value = descriptor.value();
            if let Some(setter) = self.setter.as_deref_mut() {
                setter
                    .set(&descriptor.key, &render(value))
                    .map_err(Error::Sink)?;
            }
            if let Some(raw_setter) = self.raw_setter.as_deref_mut() {
                raw_setter
                    .set_raw(&descriptor.key, value.to_raw())
                    .map_err(Error::Sink)?;
            }
            debug!(key = %descriptor.key, field = descriptor.name, "stored field");
        }

        Ok(())
    }

    /// Same as [`marshal`](Self::marshal), but panics if an error occurs.
    pub fn must_marshal(&mut self, target: &mut dyn Record) {
        if let Err(e) = self.marshal(target) {
            panic!("{e}");
        }
    }
}

impl std::fmt::Debug for Mapper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .field("raw_setter", &self.raw_setter.is_some())
            .field("processor", &self.processor.is_some())
            .field("prefix", &self.prefix)
            .field("bind_derived_keys", &self.bind_derived_keys)
            .finish()
    }
}
