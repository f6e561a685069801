use super::Mapper;
use crate::source::{KeyProcessor, KeyValueGetter, KeyValueRawSetter, KeyValueSetter};

/// Builder for a [`Mapper`].
///
/// Collaborators are optional; each operation fails with
/// [`Error::MissingCollaborator`](crate::Error::MissingCollaborator) when the
/// one it needs is absent.
///
/// ## Example
///
/// ```
/// use std::collections::HashMap;
///
/// use kv_mapper::{Field, Mapper, Placeholder, Record};
///
/// #[derive(Default)]
/// struct Shard {
///     replicas: u8,
/// }
///
/// impl Record for Shard {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::value("replicas", &mut self.replicas).keyname("shard/%s/replicas")]
///     }
/// }
///
/// let source = HashMap::from([("shard/7/replicas".to_string(), "3".to_string())]);
/// let mapper = Mapper::builder()
///     .with_getter(&source)
///     .with_processor(Placeholder::new("7"))
///     .build();
///
/// let mut shard = Shard::default();
/// mapper.unmarshal(&mut shard)?;
/// assert_eq!(shard.replicas, 3);
/// # Ok::<(), kv_mapper::Error>(())
/// ```
#[must_use = "builders do nothing until .build() is called"]
pub struct MapperBuilder<'a> {
    mapper: Mapper<'a>,
}

impl<'a> MapperBuilder<'a> {
    pub(super) fn new() -> Self {
        Self {
            mapper: Mapper {
                getter: None,
                setter: None,
                raw_setter: None,
                processor: None,
                prefix: String::new(),
                bind_derived_keys: false,
            },
        }
    }

    /// Source of values for [`Mapper::unmarshal`].
    pub fn with_getter(mut self, getter: impl KeyValueGetter + 'a) -> Self {
        self.mapper.getter = Some(Box::new(getter));
        self
    }

    /// Sink for rendered strings in [`Mapper::marshal`].
    pub fn with_setter(mut self, setter: impl KeyValueSetter + 'a) -> Self {
        self.mapper.setter = Some(Box::new(setter));
        self
    }

    /// Sink for typed values in [`Mapper::marshal`]. Used alongside the string setter if both are set.
    pub fn with_raw_setter(mut self, raw_setter: impl KeyValueRawSetter + 'a) -> Self {
        self.mapper.raw_setter = Some(Box::new(raw_setter));
        self
    }

    /// Rewrites explicit key names before they reach the store.
    ///
    /// Derived keys are never passed through the processor.
    pub fn with_processor(mut self, processor: impl KeyProcessor + 'a) -> Self {
        self.mapper.processor = Some(Box::new(processor));
        self
    }

    /// Prefix joined with `_` in front of derived keys.
    ///
    /// Explicit key names replace the derived key outright and carry no prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.mapper.prefix = prefix.into();
        self
    }

    /// Also bind leaves that have no explicit key name, under their derived key.
    ///
    /// Off by default: only fields with a key name are bound.
    pub fn bind_derived_keys(mut self, enabled: bool) -> Self {
        self.mapper.bind_derived_keys = enabled;
        self
    }

    pub fn build(self) -> Mapper<'a> {
        self.mapper
    }
}
