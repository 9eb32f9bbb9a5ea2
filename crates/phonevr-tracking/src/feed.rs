use crate::tracker::OrientationTracker;
use crate::types::RawOrientation;
use std::sync::Arc;
use tokio::sync::watch;

const DEFAULT_HEARTBEAT_SAMPLES: u64 = 1000;

/// Latest sample plus how many samples have been published in total.
#[derive(Debug, Clone, Copy, Default)]
struct Published {
    sequence: u64,
    sample: RawOrientation,
}

/// Create a connected sender/feed pair.
///
/// The sender goes to whatever delivers platform orientation events; the
/// feed stays with the render loop and is drained once per frame. Only the
/// newest sample is kept, so an undrained feed holds constant memory.
pub fn sample_channel() -> (SampleSender, SampleFeed) {
    let (tx, rx) = watch::channel(Published::default());
    (
        SampleSender { tx: Arc::new(tx) },
        SampleFeed {
            rx,
            seen_sequence: 0,
            total_samples: 0,
            heartbeat_samples: DEFAULT_HEARTBEAT_SAMPLES,
            closed: false,
        },
    )
}

/// Producer side of the sample handoff. Cheap to clone, never blocks.
#[derive(Debug, Clone)]
pub struct SampleSender {
    tx: Arc<watch::Sender<Published>>,
}

impl SampleSender {
    /// Publish a sample, replacing any not yet drained. Returns `false` once
    /// the feed has been dropped.
    pub fn send(&self, sample: RawOrientation) -> bool {
        if self.tx.is_closed() {
            return false;
        }
        self.tx.send_modify(|published| {
            published.sequence += 1;
            published.sample = sample.sanitized();
        });
        true
    }
}

/// Consumer side of the sample handoff.
#[derive(Debug)]
pub struct SampleFeed {
    rx: watch::Receiver<Published>,
    seen_sequence: u64,
    total_samples: u64,
    heartbeat_samples: u64,
    closed: bool,
}

impl SampleFeed {
    /// Log a debug heartbeat every `samples` published samples (0 disables it).
    pub fn with_heartbeat(mut self, samples: u64) -> Self {
        self.heartbeat_samples = samples;
        self
    }

    /// Ingest the newest published sample into `tracker` and return how many
    /// samples were published since the previous drain. Superseded samples
    /// are never seen by the tracker. Never waits.
    pub fn drain_into(&mut self, tracker: &mut OrientationTracker) -> usize {
        let published = *self.rx.borrow_and_update();
        let arrived = published.sequence - self.seen_sequence;
        if arrived > 0 {
            self.seen_sequence = published.sequence;
            tracker.ingest_sample(published.sample);

            let before = self.total_samples;
            self.total_samples += arrived;
            if self.heartbeat_samples > 0
                && self.total_samples / self.heartbeat_samples != before / self.heartbeat_samples
            {
                tracing::debug!(total_samples = self.total_samples, "Orientation samples ingested");
            }
        }

        if !self.closed && self.rx.has_changed().is_err() {
            tracing::info!(total_samples = self.total_samples, "Orientation sample source closed");
            self.closed = true;
        }
        arrived as usize
    }

    /// Samples published over the feed's lifetime, counted at drain time.
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Whether every sender is gone. Updated by [`drain_into`](Self::drain_into).
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_applies_latest_sample() {
        let (tx, mut feed) = sample_channel();
        let mut tracker = OrientationTracker::new();

        assert_eq!(feed.drain_into(&mut tracker), 0);
        assert!(!tracker.is_available());

        tx.send(RawOrientation::EMPTY);
        tx.send(RawOrientation::from_degrees(10.0, 0.0, 0.0));
        tx.send(RawOrientation::from_degrees(20.0, 5.0, -5.0));

        assert_eq!(feed.drain_into(&mut tracker), 3);
        assert_eq!(tracker.raw(), RawOrientation::from_degrees(20.0, 5.0, -5.0));
        assert_eq!(feed.total_samples(), 3);
        assert!(!feed.is_closed());
    }

    #[test]
    fn closed_after_senders_dropped() {
        let (tx, mut feed) = sample_channel();
        let mut tracker = OrientationTracker::new();
        let tx2 = tx.clone();

        tx2.send(RawOrientation::from_degrees(1.0, 2.0, 3.0));
        drop(tx);
        drop(tx2);

        // The last sample is still delivered when the close is observed.
        assert_eq!(feed.drain_into(&mut tracker), 1);
        assert!(feed.is_closed());
        assert!(tracker.is_available());
    }

    #[test]
    fn undrained_samples_are_superseded() {
        let (tx, mut feed) = sample_channel();
        let mut tracker = OrientationTracker::new();

        for i in 0..10_000 {
            assert!(tx.send(RawOrientation::from_degrees(i as f64 % 360.0, 0.0, 0.0)));
        }
        // Only the newest value is held; the count still reflects every sample.
        assert_eq!(feed.drain_into(&mut tracker), 10_000);
        assert_eq!(tracker.raw().alpha, Some(9_999.0 % 360.0));
        assert_eq!(feed.drain_into(&mut tracker), 0);
        assert_eq!(feed.total_samples(), 10_000);
    }

    #[test]
    fn non_finite_samples_are_cleaned_on_send() {
        let (tx, mut feed) = sample_channel();
        let mut tracker = OrientationTracker::new();

        tx.send(RawOrientation {
            alpha: Some(f64::NAN),
            beta: Some(1.0),
            gamma: None,
        });
        assert_eq!(feed.drain_into(&mut tracker), 1);
        assert!(!tracker.is_available());
    }

    #[test]
    fn send_fails_without_feed() {
        let (tx, feed) = sample_channel();
        drop(feed);
        assert!(!tx.send(RawOrientation::EMPTY));
    }

    #[tokio::test]
    async fn samples_cross_tasks() {
        let (tx, mut feed) = sample_channel();
        let mut tracker = OrientationTracker::new();

        tokio::spawn(async move {
            for i in 0..100 {
                tx.send(RawOrientation::from_degrees(i as f64, 0.0, 0.0));
            }
        })
        .await
        .unwrap();

        assert_eq!(feed.drain_into(&mut tracker), 100);
        assert_eq!(tracker.raw().alpha, Some(99.0));
        assert!(tracker.compute_rotation(0.0).is_some());
    }
}
