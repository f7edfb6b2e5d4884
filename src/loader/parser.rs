//! Streaming parser for the OpenOffice-style thesaurus data format.
//!
//! ```text
//! ISO8859-1
//! happy|2
//! (adj)|felicitous|glad
//! (adj)|content|contented
//! ```
//!
//! The first line names the encoding. Each record is a `word|N` header followed by
//! exactly `N` rows of `(lexeme)|synonym|synonym|...`.

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Serialize;

use crate::error::{Result, ThesaurizeError};
use crate::loader::encoding::Encoding;
use crate::loader::profanity::ProfanityFilter;
use crate::store::lexeme::Lexeme;

/// One set union to perform against the synonym store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRecord {
    pub lexeme: Lexeme,
    pub headword: String,
    pub synonyms: Vec<String>,
}

impl IngestRecord {
    /// Store key of the set this record unions into.
    pub fn key(&self) -> String {
        self.lexeme.key(&self.headword)
    }
}

/// A parsed record: a headword and its synonyms grouped by lexeme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThesaurusEntry {
    pub headword: String,
    pub synonyms: BTreeMap<Lexeme, Vec<String>>,
}

impl ThesaurusEntry {
    /// Split the entry into one ingestion record per lexeme that has synonyms.
    pub fn into_ingest_records(self) -> impl Iterator<Item = IngestRecord> {
        let headword = self.headword;
        self.synonyms
            .into_iter()
            .filter(|(_, synonyms)| !synonyms.is_empty())
            .map(move |(lexeme, synonyms)| IngestRecord {
                lexeme,
                headword: headword.clone(),
                synonyms,
            })
    }
}

/// Counters kept while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Entries returned to the caller.
    pub entries: usize,
    /// Headers that could not be parsed.
    pub malformed_headers: usize,
    /// Records cut short by the end of input.
    pub truncated_records: usize,
    /// Rows with fewer than two fields or an unknown lexeme.
    pub skipped_rows: usize,
    /// Records dropped because the filter rejected the headword.
    pub filtered_headwords: usize,
    /// Individual synonyms dropped by the filter.
    pub filtered_synonyms: usize,
}

/// Iterator over the entries of a thesaurus data file.
///
/// Malformed records yield a recoverable [`ThesaurizeError::Parse`] and parsing
/// resumes at the next valid header. I/O errors are returned as-is and end the
/// iteration.
pub struct ThesaurusParser<'a, R> {
    reader: R,
    encoding: Option<Encoding>,
    filter: Option<&'a ProfanityFilter>,
    stats: ParseStats,
    started: bool,
    resyncing: bool,
    finished: bool,
    line: Vec<u8>,
}

impl<'a, R: BufRead> ThesaurusParser<'a, R> {
    /// Create a parser. The encoding is taken from the first line of input.
    pub fn new(reader: R) -> Self {
        ThesaurusParser {
            reader,
            encoding: None,
            filter: None,
            stats: ParseStats::default(),
            started: false,
            resyncing: false,
            finished: false,
            line: Vec::new(),
        }
    }

    /// Decode with `encoding` regardless of what the input declares.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Drop headwords and synonyms matched by `filter`.
    pub fn with_filter(mut self, filter: &'a ProfanityFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Counters so far.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// The encoding in use, once the first line has been read.
    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        while matches!(self.line.last(), Some(b'\n' | b'\r')) {
            self.line.pop();
        }
        Ok(Some(self.encoding.unwrap_or_default().decode(&self.line)))
    }

    fn read_encoding_header(&mut self) -> Result<()> {
        self.started = true;
        let Some(label) = self.read_line()? else {
            return Ok(());
        };

        if self.encoding.is_some() {
            return Ok(());
        }
        self.encoding = match Encoding::from_label(&label) {
            Some(encoding) => Some(encoding),
            None => {
                log::warn!("Unknown data file encoding '{}', assuming UTF-8", label.trim());
                Some(Encoding::Utf8)
            }
        };
        Ok(())
    }

    /// Read the `count` rows of `headword`. Returns `None` when the headword is
    /// filtered out.
    fn read_record(&mut self, headword: String, count: usize) -> Result<Option<ThesaurusEntry>> {
        let skip = self.filter.is_some_and(|filter| filter.is_match(&headword));
        let mut entry = ThesaurusEntry {
            headword,
            synonyms: BTreeMap::new(),
        };

        for read in 0..count {
            let Some(row) = self.read_line()? else {
                self.stats.truncated_records += 1;
                return Err(ThesaurizeError::parse(format!(
                    "record '{}' ends after {read} of {count} rows",
                    entry.headword
                )));
            };
            if !skip {
                self.parse_row(&mut entry, &row);
            }
        }

        if skip {
            self.stats.filtered_headwords += 1;
            log::debug!("Filtered headword '{}'", entry.headword);
            return Ok(None);
        }
        Ok(Some(entry))
    }

    fn parse_row(&mut self, entry: &mut ThesaurusEntry, row: &str) {
        let mut fields = row.split('|');
        let tag = fields.next().unwrap_or_default();
        let candidates: Vec<&str> = fields.collect();
        if candidates.is_empty() {
            self.stats.skipped_rows += 1;
            return;
        }

        let tag = tag.trim().trim_matches(|c: char| c == '(' || c == ')');
        let lexeme = match tag.parse::<Lexeme>() {
            Ok(lexeme) => lexeme,
            Err(e) => {
                self.stats.skipped_rows += 1;
                log::debug!("Skipping row of '{}': {e}", entry.headword);
                return;
            }
        };

        let synonyms = entry.synonyms.entry(lexeme).or_default();
        for candidate in candidates {
            let candidate = candidate.trim();
            if candidate.is_empty() {
                continue;
            }
            if self.filter.is_some_and(|filter| filter.is_match(candidate)) {
                self.stats.filtered_synonyms += 1;
                continue;
            }
            synonyms.push(candidate.to_string());
        }
    }
}

/// Parse a `word|N` header line.
pub fn parse_header(line: &str) -> Result<(String, usize)> {
    if line.starts_with('(') {
        return Err(ThesaurizeError::parse(format!(
            "expected a header, found row '{line}'"
        )));
    }
    let Some((word, count)) = line.split_once('|') else {
        return Err(ThesaurizeError::parse(format!(
            "invalid header '{line}', expected 2 fields"
        )));
    };
    let count = count.trim().parse::<usize>().map_err(|_| {
        ThesaurizeError::parse(format!(
            "invalid row count in header for word '{word}', {count} is not a valid number"
        ))
    })?;
    Ok((word.to_string(), count))
}

impl<R: BufRead> Iterator for ThesaurusParser<'_, R> {
    type Item = Result<ThesaurusEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started
            && let Err(e) = self.read_encoding_header()
        {
            self.finished = true;
            return Some(Err(e));
        }

        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let (headword, count) = match parse_header(&line) {
                Ok(header) => header,
                Err(_) if self.resyncing => continue,
                Err(e) => {
                    self.stats.malformed_headers += 1;
                    self.resyncing = true;
                    return Some(Err(e));
                }
            };
            self.resyncing = false;

            match self.read_record(headword, count) {
                Ok(Some(entry)) => {
                    self.stats.entries += 1;
                    return Some(Ok(entry));
                }
                Ok(None) => continue,
                Err(e) => {
                    if !e.is_recoverable() {
                        self.finished = true;
                    }
                    return Some(Err(e));
                }
            }
        }
    }
}
