use regex::Regex;
use seqrec_core::{Feature, LocusInfo, RecordInfo, Sequence};

use crate::{tokenize, ParseError};

/// Parser position within a GenBank record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    FeatureTable,
    OriginBlock,
    Done,
}

impl State {
    fn name(self) -> &'static str {
        match self {
            State::Header => "header",
            State::FeatureTable => "feature table",
            State::OriginBlock => "origin block",
            State::Done => "done",
        }
    }
}

/// Shape a feature location string must have: digits with `..` ranges,
/// `<`/`>` bounds, optionally wrapped in complement()/join()/order().
/// Qualifier continuations never look like this, feature header rows do.
const LOCATION_PATTERN: &str = r"^(?:complement\(|join\(|order\(|<)*\d[0-9.,<>()]*$";

fn looks_like_location(token: &str) -> bool {
    Regex::new(LOCATION_PATTERN)
        .map(|re| re.is_match(token))
        .unwrap_or(false)
}

/// Holds the feature currently being read from the FEATURES table. A feature
/// is only known to be complete when the *next* feature header row or the
/// terminator is seen, so the accumulator carries it across lines and
/// flushes on demand.
#[derive(Debug, Default)]
pub struct FeatureAccumulator {
    current: Option<Feature>,
    last_key: Option<String>,
}

impl FeatureAccumulator {
    /// Begin a new in-progress feature with empty qualifiers
    pub fn start(&mut self, kind: &str, location: &str) {
        self.current = Some(Feature::new(kind, location));
        self.last_key = None;
    }

    /// Insert or overwrite a qualifier; false when no feature is in progress
    pub fn set_qualifier(&mut self, key: &str, value: &str) -> bool {
        match self.current.as_mut() {
            Some(feature) => {
                feature.set_qualifier(key, value);
                self.last_key = Some(key.to_string());
                true
            }
            None => false,
        }
    }

    /// Concatenate wrapped text onto the most recently set qualifier's value,
    /// with no separator inserted; false when no qualifier has been set yet
    pub fn append_to_last(&mut self, text: &str) -> bool {
        let feature = match self.current.as_mut() {
            Some(f) => f,
            None => return false,
        };
        let key = match self.last_key.as_deref() {
            Some(k) => k,
            None => return false,
        };
        match feature.qualifiers.iter_mut().find(|q| q.key == key) {
            Some(q) => {
                q.value.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Finish the in-progress feature and reset. Flushing with nothing in
    /// progress is a defined no-op, not an error.
    pub fn flush(&mut self) -> Option<Feature> {
        self.last_key = None;
        self.current.take()
    }
}

/// Single-pass state machine over the lines of one GenBank record
struct GenBankParser {
    state: State,
    locus: Option<LocusInfo>,
    accumulator: FeatureAccumulator,
    features: Vec<Feature>,
    residues: String,
    line_no: usize,
}

impl GenBankParser {
    fn new() -> Self {
        Self {
            state: State::Header,
            locus: None,
            accumulator: FeatureAccumulator::default(),
            features: Vec::new(),
            residues: String::new(),
            line_no: 0,
        }
    }

    fn structural(&self, line: &str, msg: impl Into<String>) -> ParseError {
        ParseError::Structural {
            line: self.line_no,
            state: self.state.name(),
            msg: msg.into(),
            content: line.to_string(),
        }
    }

    fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        self.line_no += 1;

        // Everything after the terminator is ignored
        if self.state == State::Done {
            return Ok(());
        }

        let tokens = tokenize(line);
        let first = match tokens.first() {
            Some(t) => *t,
            None => return Ok(()),
        };

        if first == "//" {
            self.flush_feature();
            self.state = State::Done;
            return Ok(());
        }

        match self.state {
            State::Header => self.header_line(&tokens, line),
            State::FeatureTable => self.feature_line(&tokens, line),
            State::OriginBlock => {
                // Token 0 is the running coordinate counter
                for data in &tokens[1..] {
                    self.residues.push_str(data);
                }
                Ok(())
            }
            State::Done => Ok(()),
        }
    }

    fn header_line(&mut self, tokens: &[&str], line: &str) -> Result<(), ParseError> {
        match tokens[0] {
            "LOCUS" => {
                if self.locus.is_some() {
                    return Err(self.structural(line, "duplicate LOCUS line"));
                }
                if tokens.len() < 7 {
                    return Err(self.structural(line, "LOCUS line has too few fields"));
                }
                self.locus = Some(LocusInfo {
                    name: tokens[1].to_string(),
                    size: tokens[2].to_string(),
                    molecule_type: tokens[4].to_string(),
                    topology: tokens[5].to_string(),
                    division: tokens[6].to_string(),
                });
                Ok(())
            }
            "FEATURES" => {
                self.state = State::FeatureTable;
                Ok(())
            }
            "ORIGIN" => {
                self.enter_origin();
                Ok(())
            }
            // Other header sections (DEFINITION, ACCESSION, ...) are skipped
            _ => Ok(()),
        }
    }

    fn feature_line(&mut self, tokens: &[&str], line: &str) -> Result<(), ParseError> {
        if tokens[0] == "ORIGIN" {
            self.enter_origin();
            return Ok(());
        }

        if let Some(rest) = tokens[0].strip_prefix('/') {
            // Qualifier line: rejoin the tokens, split on the first '='
            let mut joined = rest.to_string();
            for t in &tokens[1..] {
                joined.push(' ');
                joined.push_str(t);
            }
            return match joined.split_once('=') {
                Some((key, value)) => {
                    if self.accumulator.set_qualifier(key, value.trim_matches('"')) {
                        Ok(())
                    } else {
                        Err(self.structural(line, "qualifier before any feature row"))
                    }
                }
                // Wrapped qualifier value; no separator is inserted
                None => {
                    if self.accumulator.append_to_last(joined.trim_matches('"')) {
                        Ok(())
                    } else {
                        Err(self.structural(line, "continuation with no open qualifier"))
                    }
                }
            };
        }

        // Feature header row: (kind, location). The location-shape check keeps
        // two-token qualifier continuations from starting a bogus feature.
        if tokens.len() == 2 && looks_like_location(tokens[1]) {
            self.flush_feature();
            self.accumulator.start(tokens[0], tokens[1]);
            return Ok(());
        }

        // Anything else is only valid as the wrapped tail of an open qualifier
        let joined = tokens.join(" ");
        if self.accumulator.append_to_last(joined.trim_matches('"')) {
            Ok(())
        } else {
            Err(self.structural(line, "unrecognized feature table line"))
        }
    }

    fn flush_feature(&mut self) {
        if let Some(feature) = self.accumulator.flush() {
            self.features.push(feature);
        }
    }

    fn enter_origin(&mut self) {
        // Leaving the feature table finalizes the last feature exactly once
        self.flush_feature();
        self.state = State::OriginBlock;
    }

    fn finish(self) -> Result<Sequence, ParseError> {
        if self.state != State::Done {
            return Err(ParseError::UnexpectedEnd);
        }
        let locus = match self.locus {
            Some(l) => l,
            None => {
                return Err(ParseError::Structural {
                    line: self.line_no,
                    state: State::Done.name(),
                    msg: "record has no LOCUS line".to_string(),
                    content: String::new(),
                })
            }
        };
        let mut seq = Sequence::new(RecordInfo::GenBank(locus), self.residues);
        seq.features = self.features;
        Ok(seq)
    }
}

/// Parse a single GenBank record into a Sequence.
///
/// All-or-nothing: a line that violates the expected shape for the current
/// state aborts the parse with line context; no partial Sequence is returned.
pub fn parse(input: &str) -> Result<Sequence, ParseError> {
    let mut parser = GenBankParser::new();
    for line in input.lines() {
        parser.feed(line)?;
    }
    parser.finish()
}
