use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::{hydrate, render, Coerce, CoerceError, Decode, Encode, ParseBinary, ParseText, SetFromStr};

impl<T: Coerce + Default> Coerce for Vec<T> {
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        T::coerce_sequence(self, value)
    }

    fn render(&self) -> String {
        T::render_sequence(self)
    }

    fn to_raw(&self) -> toml::Value {
        T::sequence_to_raw(self)
    }
}

/// Splits `k1:v1,k2:v2` into pairs, hydrating fresh keys and values.
fn for_each_pair<K, V>(value: &str, mut insert: impl FnMut(K, V)) -> Result<(), CoerceError>
where
    K: Coerce + Default,
    V: Coerce + Default,
{
    if value.trim().is_empty() {
        return Ok(());
    }
    for pair in value.split(',') {
        let parts: Vec<&str> = pair.split(':').collect();
        let [key_text, value_text] = parts.as_slice() else {
            return Err(CoerceError::MapItem(pair.to_string()));
        };
        let mut key = K::default();
        hydrate(&mut key, key_text)?;
        let mut item = V::default();
        hydrate(&mut item, value_text)?;
        insert(key, item);
    }
    Ok(())
}

fn render_pairs<'m, K, V>(entries: impl Iterator<Item = (&'m K, &'m V)>) -> String
where
    K: Coerce + 'm,
    V: Coerce + 'm,
{
    entries
        .map(|(k, v)| format!("{}:{}", render(k), render(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn raw_table<'m, K, V>(entries: impl Iterator<Item = (&'m K, &'m V)>) -> toml::Value
where
    K: Coerce + 'm,
    V: Coerce + 'm,
{
    toml::Value::Table(entries.map(|(k, v)| (render(k), v.to_raw())).collect())
}

impl<K, V> Coerce for HashMap<K, V>
where
    K: Coerce + Default + Eq + Hash,
    V: Coerce + Default,
{
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        let mut map = HashMap::new();
        for_each_pair(value, |k, v| {
            map.insert(k, v);
        })?;
        *self = map;
        Ok(())
    }

    fn render(&self) -> String {
        render_pairs(self.iter())
    }

    fn to_raw(&self) -> toml::Value {
        raw_table(self.iter())
    }
}

impl<K, V> Coerce for BTreeMap<K, V>
where
    K: Coerce + Default + Ord,
    V: Coerce + Default,
{
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        let mut map = BTreeMap::new();
        for_each_pair(value, |k, v| {
            map.insert(k, v);
        })?;
        *self = map;
        Ok(())
    }

    fn render(&self) -> String {
        render_pairs(self.iter())
    }

    fn to_raw(&self) -> toml::Value {
        raw_table(self.iter())
    }
}

/// A nullable pointer: allocated on first hydration, rendered empty when `None`.
impl<T: Coerce + Default> Coerce for Option<T> {
    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        hydrate(self.get_or_insert_with(T::default), value)
    }

    fn render(&self) -> String {
        self.as_ref().map(|inner| render(inner)).unwrap_or_default()
    }

    fn to_raw(&self) -> toml::Value {
        match self {
            Some(inner) => inner.to_raw(),
            None => toml::Value::String(String::new()),
        }
    }
}

impl<T: Coerce + ?Sized> Coerce for Box<T> {
    fn as_decoder(&mut self) -> Option<&mut dyn Decode> {
        (**self).as_decoder()
    }

    fn as_setter(&mut self) -> Option<&mut dyn SetFromStr> {
        (**self).as_setter()
    }

    fn as_text(&mut self) -> Option<&mut dyn ParseText> {
        (**self).as_text()
    }

    fn as_binary(&mut self) -> Option<&mut dyn ParseBinary> {
        (**self).as_binary()
    }

    fn as_encoder(&self) -> Option<&dyn Encode> {
        (**self).as_encoder()
    }

    fn coerce(&mut self, value: &str) -> Result<(), CoerceError> {
        (**self).coerce(value)
    }

    fn render(&self) -> String {
        (**self).render()
    }

    fn to_raw(&self) -> toml::Value {
        (**self).to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_split() {
        let mut values: Vec<String> = vec!["stale".into()];
        hydrate(&mut values, "a,b,c").unwrap();
        assert_eq!(values, ["a", "b", "c"]);

        let mut numbers: Vec<i32> = Vec::new();
        hydrate(&mut numbers, "1,0x10,-3").unwrap();
        assert_eq!(numbers, [1, 16, -3]);
        assert_eq!(render(&numbers), "1,16,-3");
    }

    #[test]
    fn test_sequence_empty_input() {
        for text in ["", "   ", "\t\n"] {
            let mut values: Vec<String> = vec!["stale".into()];
            hydrate(&mut values, text).unwrap();
            assert!(values.is_empty());
        }
    }

    #[test]
    fn test_sequence_element_error() {
        let mut values: Vec<u8> = Vec::new();
        hydrate(&mut values, "1,2").unwrap();
        assert_eq!(values, b"1,2");

        let mut values: Vec<u16> = Vec::new();
        assert!(hydrate(&mut values, "1,x").is_err());
    }

    #[test]
    fn test_sequence_error_keeps_previous_contents() {
        let mut values: Vec<u16> = vec![9, 9];
        assert!(hydrate(&mut values, "1,x").is_err());
        assert_eq!(values, [9, 9]);

        let mut names: Vec<Option<bool>> = vec![Some(true)];
        assert!(hydrate(&mut names, "t,maybe").is_err());
        assert_eq!(names, [Some(true)]);
    }

    #[test]
    fn test_bytes_take_raw_string() {
        let mut bytes: Vec<u8> = Vec::new();
        hydrate(&mut bytes, "a,b c").unwrap();
        assert_eq!(bytes, b"a,b c");
        assert_eq!(render(&bytes), "a,b c");
        assert_eq!(bytes.to_raw(), toml::Value::String("a,b c".into()));
    }

    #[test]
    fn test_map_pairs() {
        let mut map: HashMap<String, String> = HashMap::new();
        hydrate(&mut map, "k1:v1,k2:v2").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["k1"], "v1");
        assert_eq!(map["k2"], "v2");
    }

    #[test]
    fn test_map_duplicates_overwrite() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        hydrate(&mut map, "a:1,b:2,a:3").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], 3);
        assert_eq!(render(&map), "a:3,b:2");
    }

    #[test]
    fn test_map_empty_input() {
        let mut map: BTreeMap<String, i32> = BTreeMap::from([("x".to_string(), 1)]);
        hydrate(&mut map, " ").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_map_invalid_item() {
        let mut map: HashMap<String, String> = HashMap::new();
        for text in ["k1:v1,k2", "a:b:c"] {
            let err = hydrate(&mut map, text).unwrap_err();
            assert!(matches!(err, CoerceError::MapItem(_)), "{text}");
        }
        let err = hydrate(&mut map, "ok:1,broken").unwrap_err();
        assert_eq!(err.to_string(), "invalid map item: \"broken\"");
    }

    #[test]
    fn test_map_value_error() {
        let mut map: HashMap<String, u8> = HashMap::new();
        let err = hydrate(&mut map, "a:300").unwrap_err();
        assert!(matches!(err, CoerceError::Int { .. }));
    }

    #[test]
    fn test_map_raw_table() {
        let map: BTreeMap<String, i64> = BTreeMap::from([("a".to_string(), 1)]);
        let raw = map.to_raw();
        assert_eq!(raw.get("a"), Some(&toml::Value::Integer(1)));
    }

    #[test]
    fn test_option_allocates() {
        let mut port: Option<u16> = None;
        hydrate(&mut port, "8080").unwrap();
        assert_eq!(port, Some(8080));

        let mut nested: Option<Option<String>> = None;
        hydrate(&mut nested, "deep").unwrap();
        assert_eq!(nested, Some(Some("deep".to_string())));
    }

    #[test]
    fn test_option_render() {
        assert_eq!(render(&None::<i32>), "");
        assert_eq!(render(&Some(5)), "5");
        assert_eq!(None::<i32>.to_raw(), toml::Value::String(String::new()));
    }

    #[test]
    fn test_box_forwards() {
        let mut boxed: Box<bool> = Box::default();
        hydrate(&mut boxed, "T").unwrap();
        assert!(*boxed);
        assert_eq!(boxed.to_raw(), toml::Value::Boolean(true));
    }
}
