use super::KeyValueGetter;

/// Reads values from the process environment.
///
/// Keys map to variable names as `{prefix}{key}`, upper-cased when
/// [`uppercase_keys`](Self::uppercase_keys) is set. Variables that are unset
/// or not valid UTF-8 count as absent.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: String,
    uppercase: bool,
}

impl EnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `prefix` verbatim to every key; include any separator yourself.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn uppercase_keys(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    fn var_name(&self, key: &str) -> String {
        let name = format!("{}{}", self.prefix, key);
        if self.uppercase {
            name.to_uppercase()
        } else {
            name
        }
    }
}

impl KeyValueGetter for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}
