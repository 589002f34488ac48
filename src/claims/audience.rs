use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Audience (aud) claim
///
/// RFC 7519 allows `aud` to be either a single string or an array of strings.
/// Both encodings decode to the same ordered list, so `"aud":"x"` and
/// `"aud":["x"]` compare equal. A single value encodes back to a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Audience(Vec<String>);

impl Audience {
    /// Create an empty audience
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the audience contains `value`
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|aud| aud == value)
    }

    /// Whether any value is shared with `other`
    pub fn intersects(&self, other: &Audience) -> bool {
        self.0.iter().any(|aud| other.contains(aud))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Audience {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for Audience {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl<S: Into<String>> From<Vec<S>> for Audience {
    fn from(values: Vec<S>) -> Self {
        values.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Audience {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Audience {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Audience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => serializer.serialize_str(single),
            values => values.serialize(serializer),
        }
    }
}

/// Encoded forms accepted for `aud`
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
            Some(OneOrMany::One(value)) => Self(vec![value]),
            Some(OneOrMany::Many(values)) => Self(values),
            None => Self::default(),
        })
    }
}
