//! Qualified names (`module::name`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A qualified catalog name such as `std::int64`.
///
/// The full text is stored once behind an `Arc`, so cloning a name into an
/// error value or a lookup key is a reference-count bump. A name without a
/// `::` separator has no module (`anytype` is as valid as `std::anytype`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualName {
    text: Arc<str>,
}

impl QualName {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: Arc::from(text.as_ref()),
        }
    }

    /// Build `module::name`.
    pub fn qualified(module: &str, name: &str) -> Self {
        Self::new(format!("{module}::{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The module part, if the name is qualified.
    pub fn module(&self) -> Option<&str> {
        self.text.rsplit_once("::").map(|(module, _)| module)
    }

    /// The unqualified short name.
    pub fn short_name(&self) -> &str {
        match self.text.rsplit_once("::") {
            Some((_, name)) => name,
            None => &self.text,
        }
    }
}

impl fmt::Display for QualName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for QualName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.text)
    }
}

impl From<&str> for QualName {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for QualName {
    fn from(text: String) -> Self {
        Self {
            text: Arc::from(text),
        }
    }
}

impl std::borrow::Borrow<str> for QualName {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl Serialize for QualName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for QualName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::from(text))
    }
}
