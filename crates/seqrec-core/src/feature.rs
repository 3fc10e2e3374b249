use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named attribute attached to a feature, e.g. a note or product name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub key: String,
    pub value: String,
}

/// An annotated sub-region of a sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    /// Feature type, taken verbatim from the file (e.g. "CDS", "gene")
    pub kind: String,
    /// Raw location range (e.g. "1..10", "complement(30..90)"); not parsed further
    pub location: String,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
}

impl Feature {
    pub fn new(kind: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            location: location.into(),
            qualifiers: Vec::new(),
        }
    }

    pub fn get_qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers
            .iter()
            .find(|q| q.key == key)
            .map(|q| q.value.as_str())
    }

    /// Insert or overwrite; keys stay unique within one feature
    pub fn set_qualifier(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(q) = self.qualifiers.iter_mut().find(|q| q.key == key) {
            q.value = value;
        } else {
            self.qualifiers.push(Qualifier { key, value });
        }
    }
}
