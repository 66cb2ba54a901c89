//! Replay source for recorded classification streams.
//!
//! Reads JSONL frames of `{"label": ..., "confidence": ...}` and feeds them
//! to an observer, standing in for the live capture/classification chain.
//! Malformed lines are per-buffer inference failures; an unopenable input is
//! a setup failure for the whole pipeline.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::Utc;
use serde::Deserialize;

use super::{ClassificationEvent, ClassificationObserver};
use crate::error::{InferenceError, SetupError};

#[derive(Debug, Deserialize)]
struct ReplayFrame {
    label: String,
    confidence: f64,
}

/// A recorded classification stream.
pub struct ReplaySource<R> {
    reader: R,
}

impl ReplaySource<BufReader<File>> {
    /// Open a replay file.
    pub fn open(path: &Path) -> Result<Self, SetupError> {
        let file = File::open(path).map_err(|source| SetupError::ReplayOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Feed every frame to the observer, then signal completion.
    pub fn run(self, observer: &mut dyn ClassificationObserver) {
        for line in self.reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    observer.on_failure(InferenceError::Failed(err.to_string()));
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ReplayFrame>(&line) {
                Ok(frame) => observer.on_result(ClassificationEvent {
                    label: frame.label,
                    confidence: frame.confidence,
                    at: Utc::now(),
                }),
                Err(err) => observer.on_failure(InferenceError::Failed(err.to_string())),
            }
        }
        observer.on_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::test_support::RecordingObserver;
    use std::io::Cursor;

    #[test]
    fn replays_frames_in_order() {
        let input = concat!(
            "{\"label\": \"background\", \"confidence\": 0.98}\n",
            "{\"label\": \"gunshot\", \"confidence\": 0.91}\n",
        );
        let mut observer = RecordingObserver::default();

        ReplaySource::from_reader(Cursor::new(input)).run(&mut observer);

        assert_eq!(observer.results.len(), 2);
        assert_eq!(observer.results[0].label, "background");
        assert_eq!(observer.results[1].label, "gunshot");
        assert!(observer.completed);
    }

    #[test]
    fn malformed_lines_drop_one_event_each() {
        let input = concat!(
            "{\"label\": \"gunshot\", \"confidence\": 0.91}\n",
            "not json\n",
            "\n",
            "{\"label\": \"background\", \"confidence\": 0.5}\n",
        );
        let mut observer = RecordingObserver::default();

        ReplaySource::from_reader(Cursor::new(input)).run(&mut observer);

        assert_eq!(observer.results.len(), 2);
        assert_eq!(observer.failures.len(), 1);
        assert!(observer.completed);
    }

    #[test]
    fn missing_file_is_a_setup_error() {
        let result = ReplaySource::open(Path::new("/nonexistent/replay.jsonl"));
        assert!(matches!(result, Err(SetupError::ReplayOpen { .. })));
    }
}
