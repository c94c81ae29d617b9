use crate::{Error, Result};

/// Keys a field tag may carry.
pub const KEYS: &[&str] = &[
    "column_name",
    "column_type",
    "column_subtype",
    "column_keytype",
    "column_valuetype",
    "primary_key",
    "clustering_key",
    "index_key",
    "order_by",
    "order_by_num",
];

/// A parsed field tag: comma-separated `key=value` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Tag<'a> {
    /// Parses the tag attached to `field`.
    ///
    /// Returns `None` for an empty tag or the skip marker `-`.
    pub fn parse(field: &str, src: &'a str) -> Result<Option<Tag<'a>>> {
        let src = src.trim();

        if src.is_empty() || src == "-" {
            return Ok(None);
        }

        let mut pairs: Vec<(&'a str, &'a str)> = vec![];

        for pair in src.split(',') {
            let mut parts = pair.split('=');

            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(Error::malformed_tag(
                    field,
                    format!("`{}` is not a `key=value` pair", pair.trim()),
                ));
            };

            let key = key.trim();
            let value = value.trim();

            if !KEYS.contains(&key) {
                return Err(Error::malformed_tag(field, format!("unknown key `{key}`")));
            }

            if pairs.iter().any(|(k, _)| *k == key) {
                return Err(Error::malformed_tag(
                    field,
                    format!("key `{key}` appears more than once"),
                ));
            }

            pairs.push((key, value));
        }

        Ok(Some(Tag { pairs }))
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.pairs.iter().copied()
    }
}
