//! The load pipeline: fetch, extract, parse, filter, write.
//!
//! Parsing runs on the calling thread and hands records to a writer thread over a
//! bounded channel, so a slow store throttles the parser. Closing the channel is
//! the end-of-stream signal; the writer then commits its last batch and publishes
//! readiness.

use std::io::BufRead;
use std::thread;
use std::time::Instant;

use crossbeam_channel::bounded;
use serde::Serialize;

use crate::config::{FilterConfig, LoaderConfig};
use crate::error::{Result, ThesaurizeError};
use crate::loader::archive;
use crate::loader::encoding::Encoding;
use crate::loader::parser::{IngestRecord, ParseStats, ThesaurusParser};
use crate::loader::profanity::ProfanityFilter;
use crate::loader::source;
use crate::store::synonym::{BatchSummary, SynonymStore};

/// Summary of a finished load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Entries parsed from the data file.
    pub entries: usize,
    /// Records lost to parse errors.
    pub skipped_records: usize,
    /// Rows skipped inside otherwise valid records.
    pub skipped_rows: usize,
    /// Headwords rejected by the profanity filter.
    pub filtered_headwords: usize,
    /// Synonyms rejected by the profanity filter.
    pub filtered_synonyms: usize,
    /// Set unions written to the store.
    pub records_written: usize,
    /// Transactions committed.
    pub batches: usize,
    /// Wall-clock duration of the load.
    pub elapsed_ms: u64,
}

impl LoadReport {
    fn new(stats: &ParseStats, summary: BatchSummary, started: Instant) -> Self {
        LoadReport {
            entries: stats.entries,
            skipped_records: stats.malformed_headers + stats.truncated_records,
            skipped_rows: stats.skipped_rows,
            filtered_headwords: stats.filtered_headwords,
            filtered_synonyms: stats.filtered_synonyms,
            records_written: summary.entries,
            batches: summary.batches,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Load the thesaurus archive at `uri` into `store`.
///
/// Fetch and format errors, and failures to build the profanity filter, abort
/// before anything is written. A store failure aborts the rest of the load;
/// batches committed before it remain. Readiness is published only when the
/// whole data file has been written.
pub fn load(
    uri: &str,
    store: &SynonymStore,
    config: &LoaderConfig,
    filter: Option<&FilterConfig>,
) -> Result<LoadReport> {
    let started = Instant::now();
    log::info!("Loading thesaurus from {uri}");

    let content = source::fetch(uri)?;
    let data = archive::extract_data_file(&content, &config.data_file_suffix)?;
    drop(content);

    let filter = filter.map(ProfanityFilter::from_config).transpose()?;
    let encoding = config
        .encoding
        .as_deref()
        .map(str::parse::<Encoding>)
        .transpose()?;

    let report = ingest(&data[..], store, config, filter.as_ref(), encoding, started)?;
    log::info!(
        "Loading complete: {} entries, {} records in {} batches ({} ms)",
        report.entries,
        report.records_written,
        report.batches,
        report.elapsed_ms
    );
    Ok(report)
}

/// Parse a data file from `reader` and write it into `store`.
pub fn ingest<R: BufRead>(
    reader: R,
    store: &SynonymStore,
    config: &LoaderConfig,
    filter: Option<&ProfanityFilter>,
    encoding: Option<Encoding>,
    started: Instant,
) -> Result<LoadReport> {
    let (sender, receiver) = bounded::<Result<IngestRecord>>(config.channel_capacity.max(1));

    thread::scope(|scope| {
        let writer = scope.spawn(move || -> Result<BatchSummary> {
            let mut batch = store.batch_writer();
            for message in receiver {
                let record = message?;
                batch.add(record.lexeme, &record.headword, &record.synonyms)?;
            }
            batch.finish()
        });

        let mut parser = ThesaurusParser::new(reader);
        if let Some(encoding) = encoding {
            parser = parser.with_encoding(encoding);
        }
        if let Some(filter) = filter {
            parser = parser.with_filter(filter);
        }

        let mut fatal = None;
        'entries: for result in parser.by_ref() {
            match result {
                Ok(entry) => {
                    for record in entry.into_ingest_records() {
                        if sender.send(Ok(record)).is_err() {
                            // The writer has stopped; its error is reported below.
                            break 'entries;
                        }
                    }
                }
                Err(e) if e.is_recoverable() => {
                    log::warn!("Unable to get synonyms: {e}");
                }
                Err(e) => {
                    let _ = sender.send(Err(ThesaurizeError::other(
                        "data file could not be read to the end",
                    )));
                    fatal = Some(e);
                    break;
                }
            }
        }
        drop(sender);

        let stats = *parser.stats();
        let summary = writer
            .join()
            .map_err(|_| ThesaurizeError::ThreadJoin("writer thread panicked".to_string()))?;

        if let Some(e) = fatal {
            return Err(e);
        }
        Ok(LoadReport::new(&stats, summary?, started))
    })
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::config::StoreConfig;
    use crate::store::memory::MemoryBackend;

    fn store(batch_size: usize) -> (Arc<MemoryBackend>, SynonymStore) {
        let backend = Arc::new(MemoryBackend::new());
        let config = StoreConfig {
            batch_size,
            ..Default::default()
        };
        (backend.clone(), SynonymStore::with_config(backend, config))
    }

    fn run(data: &[u8], store: &SynonymStore) -> Result<LoadReport> {
        let config = LoaderConfig {
            channel_capacity: 2,
            ..Default::default()
        };
        ingest(data, store, &config, None, None, Instant::now())
    }

    #[test]
    fn test_ingest_and_ready() {
        let (backend, store) = store(500);
        let ready = store.subscribe_ready().unwrap();

        let report = run(b"UTF-8\nhappy|1\n(adj)|joyful|glad\n", &store).unwrap();

        assert_eq!(report.entries, 1);
        assert_eq!(report.records_written, 1);
        assert_eq!(report.batches, 1);
        assert_eq!(backend.members("adj:happy").len(), 2);
        ready.wait(Duration::from_secs(1)).unwrap();

        let candidate = store.best_candidate("happy");
        assert!(candidate == "joyful" || candidate == "glad");
    }

    #[test]
    fn test_small_batches() {
        let (backend, store) = store(2);
        let data = b"UTF-8\na|1\n(noun)|x\nb|1\n(noun)|x\nc|1\n(noun)|x\nd|1\n(noun)|x\ne|1\n(noun)|x\n";

        let report = run(data, &store).unwrap();

        assert_eq!(report.records_written, 5);
        assert_eq!(report.batches, 3);
        assert_eq!(backend.key_count(), 5);
    }

    #[test]
    fn test_parse_errors_are_skipped() {
        let (backend, store) = store(500);
        let data = b"UTF-8\nbroken\ngood|1\n(verb)|fine\n";

        let report = run(data, &store).unwrap();

        assert_eq!(report.skipped_records, 1);
        assert_eq!(backend.members("verb:good").len(), 1);
    }

    #[test]
    fn test_store_failure_is_fatal() {
        let (backend, store) = store(1);
        let ready = store.subscribe_ready().unwrap();
        backend.set_offline(true);

        let result = run(b"UTF-8\na|1\n(noun)|x\nb|1\n(noun)|y\n", &store);

        assert!(matches!(result, Err(ThesaurizeError::Store(_))));
        backend.set_offline(false);
        assert!(ready.wait(Duration::from_millis(20)).is_err());
    }

    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("disk on fire"));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn test_read_failure_does_not_publish_ready() {
        let (_, store) = store(500);
        let ready = store.subscribe_ready().unwrap();
        let reader = io::BufReader::new(FailingReader {
            data: b"UTF-8\nhappy|1\n(adj)|glad\n",
        });

        let config = LoaderConfig::default();
        let result = ingest(reader, &store, &config, None, None, Instant::now());

        assert!(matches!(result, Err(ThesaurizeError::Io(_))));
        assert!(ready.wait(Duration::from_millis(20)).is_err());
    }
}
