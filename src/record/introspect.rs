use tracing::trace;

use super::naming::derive_key;
use super::{Field, Record, Slot};
use crate::codec::{exposes_hook, Coerce};
use crate::source::KeyProcessor;
use crate::Error;

/// Nesting depth past which a record graph is treated as runaway (cyclic).
///
/// The error is raised while walking, so the `None` record pointers walked
/// through before reaching the limit stay allocated in the target.
pub const MAX_DEPTH: usize = 64;

/// A leaf field discovered during one traversal.
pub struct Descriptor<'a> {
    /// Declared field name.
    pub name: &'static str,
    /// Explicit key name, before key processing.
    pub keyname: Option<&'static str>,
    /// Key used against the store.
    pub key: String,
    pub required: bool,
    pub default: Option<&'static str>,
    pub type_name: &'static str,
    pub(crate) handle: &'a mut dyn Coerce,
}

impl Descriptor<'_> {
    /// The key reported to users: the explicit key name if any, else the derived key.
    pub fn display_key(&self) -> &str {
        self.keyname.unwrap_or(self.key.as_str())
    }

    pub fn value(&self) -> &dyn Coerce {
        &*self.handle
    }
}

impl std::fmt::Debug for Descriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("keyname", &self.keyname)
            .field("key", &self.key)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Walks a record's field tables, producing descriptors for its leaves.
pub(crate) struct Introspector<'p> {
    pub prefix: &'p str,
    pub bind_derived_keys: bool,
    pub processor: Option<&'p dyn KeyProcessor>,
}

impl Introspector<'_> {
    pub fn describe<'a>(&self, record: &'a mut dyn Record) -> Result<Vec<Descriptor<'a>>, Error> {
        let mut descriptors = Vec::new();
        self.walk(record, 0, &mut descriptors)?;
        Ok(descriptors)
    }

    fn walk<'a>(
        &self,
        record: &'a mut dyn Record,
        depth: usize,
        out: &mut Vec<Descriptor<'a>>,
    ) -> Result<(), Error> {
        for field in record.fields() {
            let Field {
                name,
                type_name,
                tags,
                slot,
            } = field;

            if tags.ignored {
                trace!(field = name, "skipping ignored field");
                continue;
            }

            let handle = match slot {
                Slot::Value(value) => value,
                Slot::Record(nested) => {
                    let is_leaf = nested.as_value().is_some_and(|value| exposes_hook(value));
                    if !is_leaf {
                        if depth + 1 > MAX_DEPTH {
                            return Err(Error::InvalidSpecification(format!(
                                "record nesting exceeds {MAX_DEPTH} levels at field `{name}` \
                                 (cyclic record?)"
                            )));
                        }
                        // Nesting contributes no prefix segment.
                        self.walk(nested, depth + 1, out)?;
                        continue;
                    }
                    match nested.as_value() {
                        Some(value) => value,
                        None => continue,
                    }
                }
            };

            let key = match tags.keyname {
                Some(keyname) => match self.processor {
                    Some(processor) => processor.process_key(keyname),
                    None => keyname.to_string(),
                },
                None if self.bind_derived_keys => {
                    derive_key(name, tags.split_words, self.prefix)
                }
                None => continue,
            };
            trace!(field = name, key = %key, "described field");

            out.push(Descriptor {
                name,
                keyname: tags.keyname,
                key,
                required: tags.required,
                default: tags.default,
                type_name,
                handle,
            });
        }
        Ok(())
    }
}

/// Describes `record` with no prefix, no key processor and keyname-only leaves.
pub fn describe(record: &mut dyn Record) -> Result<Vec<Descriptor<'_>>, Error> {
    Introspector {
        prefix: "",
        bind_derived_keys: false,
        processor: None,
    }
    .describe(record)
}
