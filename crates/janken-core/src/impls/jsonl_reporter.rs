//! JsonLinesReporter - ファイルに結果ドキュメントを追記する ResultReporter
//!
//! 1 ラウンド = 1 行の JSON（`StoredRecord`）。
//! 書き込みは Mutex で直列化し、行が混ざらないようにする。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::{GameRecord, ReportError, RoundId, StoredRecord};
use crate::ports::{Clock, ResultReporter};

pub struct JsonLinesReporter {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl JsonLinesReporter {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored document back.
    pub async fn load(&self) -> Result<Vec<StoredRecord>, ReportError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(ReportError::from))
            .collect()
    }
}

#[async_trait]
impl ResultReporter for JsonLinesReporter {
    async fn report(&self, round_id: RoundId, record: &GameRecord) -> Result<(), ReportError> {
        let document = StoredRecord::new(round_id, record, self.clock.now());
        let mut line = serde_json::to_vec(&document)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        tracing::debug!(path = %self.path.display(), %round_id, "stored game result");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerName, ReportLabel};
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use ulid::Ulid;

    fn reporter(dir: &tempfile::TempDir) -> JsonLinesReporter {
        let at = Utc.with_ymd_and_hms(2024, 5, 4, 10, 0, 0).unwrap();
        JsonLinesReporter::new(dir.path().join("results.jsonl"), Arc::new(FixedClock::new(at)))
    }

    #[tokio::test]
    async fn appends_one_document_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = reporter(&dir);
        let ada = GameRecord {
            player: PlayerName::new("Ada").unwrap(),
            outcome: ReportLabel::Win,
        };
        let grace = GameRecord {
            player: PlayerName::new("Grace").unwrap(),
            outcome: ReportLabel::Lose,
        };
        let first = RoundId::from_ulid(Ulid::new());

        reporter.report(first, &ada).await.unwrap();
        reporter
            .report(RoundId::from_ulid(Ulid::new()), &grace)
            .await
            .unwrap();

        let stored = reporter.load().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, first);
        assert_eq!(stored[0].player.as_str(), "Ada");
        assert_eq!(stored[1].outcome, ReportLabel::Lose);
        assert_eq!(stored[1].recorded_at.to_rfc3339(), "2024-05-04T10:00:00+00:00");

        let raw = tokio::fs::read_to_string(reporter.path()).await.unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.lines().next().unwrap().contains(r#""outcome":"Win""#));
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(reporter(&dir).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = JsonLinesReporter::new(
            dir.path().join("missing").join("results.jsonl"),
            Arc::new(crate::ports::SystemClock),
        );
        let record = GameRecord {
            player: PlayerName::new("Ada").unwrap(),
            outcome: ReportLabel::Draw,
        };
        let err = reporter
            .report(RoundId::from_ulid(Ulid::new()), &record)
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
