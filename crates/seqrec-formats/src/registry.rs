use std::collections::HashMap;
use std::fs;
use std::path::Path;

use seqrec_core::Sequence;

use crate::{fasta, genbank, ParseError};

/// The closed set of supported flat-file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    GenBank,
    Fasta,
}

/// What a parse produced: a GenBank file holds exactly one record, a FASTA
/// file zero or more
#[derive(Debug, Clone)]
pub enum Parsed {
    Single(Sequence),
    Multi(Vec<Sequence>),
}

impl Parsed {
    pub fn into_vec(self) -> Vec<Sequence> {
        match self {
            Parsed::Single(seq) => vec![seq],
            Parsed::Multi(seqs) => seqs,
        }
    }
}

impl FileFormat {
    pub fn parse(&self, input: &str) -> Result<Parsed, ParseError> {
        match self {
            FileFormat::GenBank => genbank::parse(input).map(Parsed::Single),
            FileFormat::Fasta => fasta::parse(input).map(Parsed::Multi),
        }
    }
}

/// Maps file extensions to parsers. Lookup of an unregistered extension
/// fails; the registry never guesses a format from file content.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, FileFormat>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the conventional GenBank and FASTA extensions
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for ext in ["gb", "gbk", "genbank"] {
            registry.register(ext, FileFormat::GenBank);
        }
        for ext in ["fa", "fasta", "fna"] {
            registry.register(ext, FileFormat::Fasta);
        }
        registry
    }

    pub fn register(&mut self, extension: &str, format: FileFormat) {
        self.formats.insert(extension.to_ascii_lowercase(), format);
    }

    pub fn get(&self, extension: &str) -> Result<FileFormat, ParseError> {
        self.formats
            .get(&extension.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| ParseError::UnsupportedFormat(extension.to_string()))
    }

    /// Open, read, and parse a file, picking the parser by extension. The
    /// format lookup happens before the file is touched, and the handle is
    /// released on every exit path.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<Parsed, ParseError> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let format = self.get(extension)?;
        let content = fs::read_to_string(path)?;
        format.parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let registry = FormatRegistry::with_defaults();
        assert!(matches!(
            registry.get("xyz"),
            Err(ParseError::UnsupportedFormat(ext)) if ext == "xyz"
        ));
    }

    #[test]
    fn test_default_table() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.get("gb").unwrap(), FileFormat::GenBank);
        assert_eq!(registry.get("gbk").unwrap(), FileFormat::GenBank);
        assert_eq!(registry.get("fasta").unwrap(), FileFormat::Fasta);
        assert_eq!(registry.get("FA").unwrap(), FileFormat::Fasta);
    }

    #[test]
    fn test_explicit_registration() {
        let mut registry = FormatRegistry::new();
        assert!(registry.get("fa").is_err());
        registry.register("fa", FileFormat::Fasta);
        assert_eq!(registry.get("fa").unwrap(), FileFormat::Fasta);
    }

    #[test]
    fn test_unregistered_path() {
        let registry = FormatRegistry::new();
        assert!(matches!(
            registry.parse_path("reads.xyz"),
            Err(ParseError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_format_parse_dispatch() {
        let parsed = FileFormat::Fasta.parse(">s\nACGT\n").unwrap();
        assert_eq!(parsed.into_vec().len(), 1);

        let parsed = FileFormat::GenBank
            .parse("LOCUS t 4 bp DNA linear SYN\nORIGIN\n        1 acgt\n//\n")
            .unwrap();
        let seqs = parsed.into_vec();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].residues, "acgt");
    }
}
