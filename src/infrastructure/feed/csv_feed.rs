//! CSV file redirect feed.

use async_trait::async_trait;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{info, warn};

use super::service::{FeedVersion, LoadOutcome, RedirectFeed};
use crate::domain::{LoadError, LoadReport, RedirectTable, Row, load_rows};

/// Redirect feed backed by a CSV file with a header row.
///
/// The source column is matched against `old url` / `oldUrl` and the
/// destination column against `redirectTo` / `redirect_to`, ignoring case.
/// Other columns are ignored.
///
/// ```text
/// old url,redirectTo,notes
/// /shop/old-sofa,/products/sofa,moved in 2021
/// /about-us/,/About,
/// ```
///
/// Rows are streamed from disk on a blocking thread; the file is never read
/// into memory as a whole.
#[derive(Debug, Clone)]
pub struct CsvFileFeed {
    path: PathBuf,
}

impl CsvFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the file synchronously.
    ///
    /// A missing file yields an empty table and an empty report.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file exists but cannot be opened and
    /// [`LoadError::Csv`] for read or decoding failures mid-file.
    pub fn load_blocking(&self) -> Result<LoadOutcome, LoadError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Redirect feed {} not found, no redirects loaded",
                    self.path.display()
                );
                return Ok((RedirectTable::empty(), LoadReport::default()));
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = read_rows(file)?;
        info!(
            "Loaded {} redirects from {} ({} rows skipped)",
            outcome.1.accepted,
            self.path.display(),
            outcome.1.skipped()
        );

        Ok(outcome)
    }
}

/// Streams CSV records from any reader into the loader.
pub fn read_rows<R: Read>(reader: R) -> Result<LoadOutcome, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let rows = reader
        .into_records()
        .map(move |record| -> Result<Row, LoadError> {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect())
        });

    load_rows(rows)
}

#[async_trait]
impl RedirectFeed for CsvFileFeed {
    async fn load(&self) -> Result<LoadOutcome, LoadError> {
        let feed = self.clone();
        tokio::task::spawn_blocking(move || feed.load_blocking())
            .await
            .map_err(|e| LoadError::Task(e.to_string()))?
    }

    async fn version(&self) -> FeedVersion {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => FeedVersion::File {
                modified: meta.modified().ok(),
                len: meta.len(),
            },
            Err(_) => FeedVersion::Missing,
        }
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_rows_with_extra_columns() {
        let csv = "id,Old URL,redirectTo,notes\n\
                   1,/Old-Sofa/,/products/Sofa,moved\n\
                   2,/about-us,/About,\n";

        let (table, report) = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(table.get("/old-sofa"), Some("/products/Sofa"));
        assert_eq!(table.get("/about-us"), Some("/About"));
    }

    #[test]
    fn test_read_rows_short_record_is_skipped() {
        let csv = "oldUrl,redirect_to\n/a\n/b,/c\n";

        let (table, report) = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(report.skipped_missing_column, 1);
    }

    #[test]
    fn test_read_rows_quoted_values() {
        let csv = "old url,redirectTo\n\"/sale, 2019\",\"/sale\"\n";

        let (table, _) = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(table.get("/sale, 2019"), Some("/sale"));
    }

    #[test]
    fn test_read_rows_invalid_utf8_is_an_error() {
        let mut bytes = b"old url,redirectTo\n/a,/".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.push(b'\n');

        let err = read_rows(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_missing_file_loads_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let feed = CsvFileFeed::new(dir.path().join("absent.csv"));

        let (table, report) = feed.load_blocking().unwrap();

        assert!(table.is_empty());
        assert_eq!(report.accepted, 0);
    }

    #[tokio::test]
    async fn test_async_load_and_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redirects.csv");
        let feed = CsvFileFeed::new(&path);

        assert_eq!(feed.version().await, FeedVersion::Missing);

        let mut file = File::create(&path).unwrap();
        writeln!(file, "old url,redirectTo").unwrap();
        writeln!(file, "/old,/new").unwrap();
        drop(file);

        let (table, _) = feed.load().await.unwrap();
        assert_eq!(table.get("/old"), Some("/new"));
        assert!(matches!(feed.version().await, FeedVersion::File { .. }));
        assert!(feed.describe().ends_with("redirects.csv"));
    }
}
