use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::feature::Feature;

/// Header fields taken positionally from a GenBank LOCUS line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocusInfo {
    pub name: String,
    pub size: String,
    pub molecule_type: String,
    pub topology: String,
    pub division: String,
}

/// Per-record header metadata; the variant depends on the source format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum RecordInfo {
    GenBank(LocusInfo),
    Fasta { description: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub id: Uuid,
    pub info: RecordInfo,
    /// The biological sequence string; for GenBank records this never
    /// contains whitespace
    pub residues: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Sequence {
    pub fn new(info: RecordInfo, residues: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            info,
            residues: residues.into(),
            features: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// LOCUS header fields, if this record came from a GenBank file
    pub fn locus(&self) -> Option<&LocusInfo> {
        match &self.info {
            RecordInfo::GenBank(locus) => Some(locus),
            RecordInfo::Fasta { .. } => None,
        }
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }
}
