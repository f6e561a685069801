//! Binds strongly-typed, possibly nested records to flat string key/value stores.
//!
//! A [`Record`] lists its fields; the [`Mapper`] derives a key for every leaf,
//! reads the value from a [`KeyValueGetter`] and coerces it into the field
//! (`unmarshal`), or renders each field and writes it to a
//! [`KeyValueSetter`] (`marshal`).
//!
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! use kv_mapper::{Field, Mapper, Record};
//!
//! #[derive(Debug, Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     timeout: Duration,
//!     tags: Vec<String>,
//! }
//!
//! impl Record for Server {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::value("Host", &mut self.host).keyname("host").required(),
//!             Field::value("Port", &mut self.port).keyname("port").default_value("8080"),
//!             Field::value("Timeout", &mut self.timeout).keyname("timeout"),
//!             Field::value("Tags", &mut self.tags).keyname("tags"),
//!         ]
//!     }
//! }
//!
//! let source = HashMap::from([
//!     ("host".to_string(), "example.com".to_string()),
//!     ("timeout".to_string(), "2m30s".to_string()),
//!     ("tags".to_string(), "edge,eu".to_string()),
//! ]);
//!
//! let mut server = Server::default();
//! Mapper::builder().with_getter(&source).build().unmarshal(&mut server)?;
//!
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.timeout, Duration::from_secs(150));
//! assert_eq!(server.tags, ["edge", "eu"]);
//! # Ok::<(), kv_mapper::Error>(())
//! ```

pub mod codec;
mod error;
pub mod mapper;
pub mod record;
pub mod source;

pub use codec::{Coerce, CoerceError, Decode, Encode, ParseBinary, ParseText, SetFromStr};
pub use error::{Error, ParseError};
pub use mapper::{Mapper, MapperBuilder};
pub use record::{Descriptor, Field, Record, Slot, Tags};
pub use source::{
    EnvSource, KeyProcessor, KeyValueGetter, KeyValueRawSetter, KeyValueSetter, Placeholder,
    StoreError, TomlStore,
};

/// Error type returned by user hooks and collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
