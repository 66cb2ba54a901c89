//! Classifier oracle boundary.
//!
//! The acoustic model is opaque to this crate: it takes one fixed-size audio
//! buffer and returns a ranked list of label/confidence pairs. Only the
//! top-ranked pair per buffer enters the pipeline. Results cross into the
//! controller's single-writer loop through a channel-backed observer.

mod aggregator;
mod replay;

pub use aggregator::{AggregatorState, Escalation, ThreatAggregator};
pub use replay::ReplaySource;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::InferenceError;

/// Label the acoustic model emits for non-threat ambient audio.
pub const BACKGROUND_LABEL: &str = "background";

/// One classification per analyzed audio buffer. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationEvent {
    pub label: String,
    pub confidence: f64,
    pub at: DateTime<Utc>,
}

/// The opaque classifier oracle.
///
/// Implementations wrap the actual acoustic model. Failures are per-buffer:
/// an error drops that buffer's event and the stream continues.
pub trait Classifier: Send {
    /// Classify one fixed-size audio buffer, best label first.
    fn classify(&mut self, buffer: &[f32]) -> Result<Vec<(String, f64)>, InferenceError>;
}

/// Capability interface for classification notifications.
///
/// The producer side of the oracle boundary calls these from its own
/// execution context; implementations must hand results off to the pipeline
/// owner rather than touching pipeline state directly.
pub trait ClassificationObserver: Send {
    fn on_result(&mut self, event: ClassificationEvent);
    fn on_failure(&mut self, error: InferenceError);
    fn on_complete(&mut self);
}

/// Observer that forwards results into the controller's event channel.
///
/// `on_result` uses a blocking send and must be called from outside the
/// async runtime (the oracle's capture thread); the bounded channel applies
/// backpressure instead of dropping events. Failures are logged and dropped
/// here -- they never reach the aggregator.
pub struct ChannelObserver {
    tx: mpsc::Sender<ClassificationEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<ClassificationEvent>) -> Self {
        Self { tx }
    }
}

impl ClassificationObserver for ChannelObserver {
    fn on_result(&mut self, event: ClassificationEvent) {
        if self.tx.blocking_send(event).is_err() {
            debug!("classification consumer gone, event dropped");
        }
    }

    fn on_failure(&mut self, error: InferenceError) {
        warn!(error = %error, "classifier failure, buffer dropped");
    }

    fn on_complete(&mut self) {
        debug!("classification stream complete");
    }
}

/// Pump audio buffers through the classifier oracle.
///
/// Forwards the top-ranked label/confidence pair per buffer to the observer.
/// An empty ranking or a failed inference drops exactly one event via
/// `on_failure`; the stream keeps going.
pub fn drive<C, I>(classifier: &mut C, buffers: I, observer: &mut dyn ClassificationObserver)
where
    C: Classifier,
    I: IntoIterator<Item = Vec<f32>>,
{
    for buffer in buffers {
        match classifier.classify(&buffer) {
            Ok(ranking) => match ranking.into_iter().next() {
                Some((label, confidence)) => observer.on_result(ClassificationEvent {
                    label,
                    confidence,
                    at: Utc::now(),
                }),
                None => observer.on_failure(InferenceError::EmptyRanking),
            },
            Err(err) => observer.on_failure(err),
        }
    }
    observer.on_complete();
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Observer that records everything it is handed.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub results: Vec<ClassificationEvent>,
        pub failures: Vec<InferenceError>,
        pub completed: bool,
    }

    impl ClassificationObserver for RecordingObserver {
        fn on_result(&mut self, event: ClassificationEvent) {
            self.results.push(event);
        }

        fn on_failure(&mut self, error: InferenceError) {
            self.failures.push(error);
        }

        fn on_complete(&mut self) {
            self.completed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingObserver;
    use super::*;

    struct ScriptedClassifier {
        outputs: Vec<Result<Vec<(String, f64)>, InferenceError>>,
    }

    impl Classifier for ScriptedClassifier {
        fn classify(&mut self, _buffer: &[f32]) -> Result<Vec<(String, f64)>, InferenceError> {
            self.outputs.remove(0)
        }
    }

    #[test]
    fn drive_forwards_top_ranked_pair() {
        let mut classifier = ScriptedClassifier {
            outputs: vec![Ok(vec![
                ("gunshot".to_string(), 0.93),
                ("background".to_string(), 0.07),
            ])],
        };
        let mut observer = RecordingObserver::default();

        drive(&mut classifier, vec![vec![0.0; 1024]], &mut observer);

        assert_eq!(observer.results.len(), 1);
        assert_eq!(observer.results[0].label, "gunshot");
        assert!((observer.results[0].confidence - 0.93).abs() < f64::EPSILON);
        assert!(observer.completed);
    }

    #[test]
    fn drive_drops_failed_buffers_and_continues() {
        let mut classifier = ScriptedClassifier {
            outputs: vec![
                Err(InferenceError::Failed("model choked".to_string())),
                Ok(vec![("background".to_string(), 0.99)]),
            ],
        };
        let mut observer = RecordingObserver::default();

        drive(
            &mut classifier,
            vec![vec![0.0; 1024], vec![0.0; 1024]],
            &mut observer,
        );

        assert_eq!(observer.failures.len(), 1);
        assert_eq!(observer.results.len(), 1);
        assert_eq!(observer.results[0].label, "background");
    }

    #[test]
    fn drive_treats_empty_ranking_as_failure() {
        let mut classifier = ScriptedClassifier {
            outputs: vec![Ok(vec![])],
        };
        let mut observer = RecordingObserver::default();

        drive(&mut classifier, vec![vec![0.0; 1024]], &mut observer);

        assert!(observer.results.is_empty());
        assert!(matches!(
            observer.failures[0],
            InferenceError::EmptyRanking
        ));
    }
}
