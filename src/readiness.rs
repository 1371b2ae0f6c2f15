//! Readiness signals for the page's loading overlay.
//!
//! Two independent signals can lift the overlay: a fixed fallback timeout and
//! the media counter. Neither overrides the other; the overlay goes away as
//! soon as either one is ready. Times are offsets from page mount.

use std::time::Duration;

pub const FALLBACK_TIMEOUT: Duration = Duration::from_millis(8000);
pub const MEDIA_SETTLE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackTimeout {
    deadline: Duration,
}

impl FallbackTimeout {
    pub fn new(timeout: Duration) -> Self {
        Self { deadline: timeout }
    }

    pub fn is_ready(&self, now: Duration) -> bool {
        now >= self.deadline
    }
}

impl Default for FallbackTimeout {
    fn default() -> Self {
        Self::new(FALLBACK_TIMEOUT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOutcome {
    Loaded,
    Failed,
}

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
pub const HAVE_CURRENT_DATA: u16 = 2;
/// `HTMLMediaElement.NETWORK_NO_SOURCE`
pub const NETWORK_NO_SOURCE: u16 = 3;

impl MediaOutcome {
    /// Outcome of an image that may have settled before any listener was
    /// attached. `None` while it is still loading.
    pub fn of_image(complete: bool, natural_width: u32) -> Option<Self> {
        match (complete, natural_width) {
            (false, _) => None,
            (true, 0) => Some(MediaOutcome::Failed),
            (true, _) => Some(MediaOutcome::Loaded),
        }
    }

    /// Same for a video, from its `readyState` and `networkState`.
    pub fn of_video(ready_state: u16, network_state: u16) -> Option<Self> {
        if network_state == NETWORK_NO_SOURCE {
            Some(MediaOutcome::Failed)
        } else if ready_state >= HAVE_CURRENT_DATA {
            Some(MediaOutcome::Loaded)
        } else {
            None
        }
    }
}

/// Counts media `load`/`error` events against the number expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReadiness {
    expected: usize,
    loaded: usize,
    failed: usize,
    settle: Duration,
    all_reported_at: Option<Duration>,
}

impl MediaReadiness {
    pub fn new(expected: usize, settle: Duration) -> Self {
        Self {
            expected,
            loaded: 0,
            failed: 0,
            settle,
            all_reported_at: (expected == 0).then_some(Duration::ZERO),
        }
    }

    /// Records one media outcome. Reports past the expected total are ignored.
    pub fn record(&mut self, outcome: MediaOutcome, now: Duration) -> bool {
        if self.reported() >= self.expected {
            log::debug!("ignoring extra media report: {outcome:?}");
            return false;
        }
        match outcome {
            MediaOutcome::Loaded => self.loaded += 1,
            MediaOutcome::Failed => self.failed += 1,
        }
        if self.reported() == self.expected {
            self.all_reported_at = Some(now);
        }
        true
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn reported(&self) -> usize {
        self.loaded + self.failed
    }

    /// Share of expected media that has reported, in whole percent.
    pub fn percent(&self) -> u8 {
        if self.expected == 0 {
            return 100;
        }
        (self.reported() as f64 * 100.0 / self.expected as f64).round() as u8
    }

    pub fn ready_at(&self) -> Option<Duration> {
        self.all_reported_at.map(|at| at + self.settle)
    }

    pub fn is_ready(&self, now: Duration) -> bool {
        self.ready_at().is_some_and(|at| now >= at)
    }
}

/// Which signal lifted the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadySignal {
    Media,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayGate {
    pub fallback: FallbackTimeout,
    pub media: MediaReadiness,
}

impl OverlayGate {
    pub fn new(expected_media: usize) -> Self {
        Self {
            fallback: FallbackTimeout::default(),
            media: MediaReadiness::new(expected_media, MEDIA_SETTLE_DELAY),
        }
    }

    /// The first signal that is ready at `now`, media checked first.
    pub fn ready(&self, now: Duration) -> Option<ReadySignal> {
        if self.media.is_ready(now) {
            Some(ReadySignal::Media)
        } else if self.fallback.is_ready(now) {
            Some(ReadySignal::Timeout)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fallback_timeout() {
        let timeout = FallbackTimeout::default();
        assert!(!timeout.is_ready(ms(7_999)));
        assert!(timeout.is_ready(ms(8_000)));
    }

    #[test]
    fn test_media_ready_after_settle() {
        let mut media = MediaReadiness::new(3, MEDIA_SETTLE_DELAY);
        assert!(media.record(MediaOutcome::Loaded, ms(100)));
        assert!(media.record(MediaOutcome::Failed, ms(200)));
        assert_eq!(media.percent(), 67);
        assert!(!media.is_ready(ms(5_000)));

        assert!(media.record(MediaOutcome::Loaded, ms(300)));
        assert_eq!(media.percent(), 100);
        assert_eq!(media.ready_at(), Some(ms(1_300)));
        assert!(!media.is_ready(ms(1_299)));
        assert!(media.is_ready(ms(1_300)));
        assert_eq!(media.loaded(), 2);
        assert_eq!(media.failed(), 1);
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        let mut media = MediaReadiness::new(3, MEDIA_SETTLE_DELAY);
        media.record(MediaOutcome::Loaded, ms(0));
        assert_eq!(media.percent(), 33);
        media.record(MediaOutcome::Loaded, ms(0));
        assert_eq!(media.percent(), 67);
    }

    #[test]
    fn test_settled_image() {
        assert_eq!(MediaOutcome::of_image(false, 0), None);
        assert_eq!(MediaOutcome::of_image(false, 640), None);
        assert_eq!(MediaOutcome::of_image(true, 640), Some(MediaOutcome::Loaded));
        // a complete image without dimensions is a broken one
        assert_eq!(MediaOutcome::of_image(true, 0), Some(MediaOutcome::Failed));
    }

    #[test]
    fn test_settled_video() {
        assert_eq!(MediaOutcome::of_video(0, 2), None);
        assert_eq!(MediaOutcome::of_video(1, 2), None);
        assert_eq!(MediaOutcome::of_video(2, 1), Some(MediaOutcome::Loaded));
        assert_eq!(MediaOutcome::of_video(4, 1), Some(MediaOutcome::Loaded));
        assert_eq!(MediaOutcome::of_video(0, NETWORK_NO_SOURCE), Some(MediaOutcome::Failed));
    }

    #[test]
    fn test_media_settled_before_hydration_completes_the_count() {
        let mut gate = OverlayGate::new(3);
        // everything settled before the listeners were attached
        for outcome in [
            MediaOutcome::of_image(true, 800),
            MediaOutcome::of_image(true, 0),
            MediaOutcome::of_video(4, 1),
        ]
        .into_iter()
        .flatten()
        {
            gate.media.record(outcome, ms(200));
        }
        assert_eq!(gate.media.reported(), 3);
        assert_eq!(gate.ready(ms(1_200)), Some(ReadySignal::Media));
    }

    #[test]
    fn test_extra_reports_ignored() {
        let mut media = MediaReadiness::new(1, MEDIA_SETTLE_DELAY);
        assert!(media.record(MediaOutcome::Loaded, ms(10)));
        assert!(!media.record(MediaOutcome::Loaded, ms(20)));
        assert_eq!(media.reported(), 1);
        assert_eq!(media.ready_at(), Some(ms(1_010)));
    }

    #[test]
    fn test_no_expected_media() {
        let media = MediaReadiness::new(0, MEDIA_SETTLE_DELAY);
        assert_eq!(media.percent(), 100);
        assert!(media.is_ready(ms(1_000)));
    }

    #[test]
    fn test_gate_signals_are_independent() {
        let mut gate = OverlayGate::new(2);
        assert_eq!(gate.ready(ms(7_999)), None);
        assert_eq!(gate.ready(ms(8_000)), Some(ReadySignal::Timeout));

        gate.media.record(MediaOutcome::Loaded, ms(100));
        gate.media.record(MediaOutcome::Loaded, ms(500));
        assert_eq!(gate.ready(ms(1_499)), None);
        assert_eq!(gate.ready(ms(1_500)), Some(ReadySignal::Media));
    }
}
