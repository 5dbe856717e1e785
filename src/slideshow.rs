//! Slideshow navigation state.
//!
//! [`SlideshowController`] tracks whether the slideshow is open, which photo
//! is current, and whether autoplay is running. It never looks at the photos
//! themselves; every operation takes the current collection length.
//!
//! Autoplay is modelled as a cancellable scheduled task. Starting it hands
//! out an [`AutoPlayToken`]; the host's timer calls [`SlideshowController::fire`]
//! with that token. Stopping, closing or restarting invalidates the token, so
//! a timer that fires late never advances the slideshow. Hosts driven by a
//! frame loop can call [`SlideshowController::poll`] instead.

use std::time::Duration;
use web_time::Instant;

use crate::constants::DEFAULT_AUTOPLAY_INTERVAL_MS;

/// Open/closed state of the slideshow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideshowState {
    #[default]
    Closed,
    Open {
        /// Always within `[0, len)` of the collection
        current_index: usize,
    },
}

/// Handle identifying one autoplay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoPlayToken(u64);

#[derive(Debug, Clone, Copy)]
struct AutoPlay {
    token: AutoPlayToken,
    last_advance: Instant,
}

/// Navigation and autoplay state for the slideshow.
#[derive(Debug)]
pub struct SlideshowController {
    state: SlideshowState,
    autoplay: Option<AutoPlay>,
    interval: Duration,
    next_token: u64,
}

impl SlideshowController {
    /// Create a closed slideshow with the default autoplay interval.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(DEFAULT_AUTOPLAY_INTERVAL_MS))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            state: SlideshowState::Closed,
            autoplay: None,
            interval,
            next_token: 1,
        }
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SlideshowState::Open { .. })
    }

    /// Index of the current photo while open.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SlideshowState::Open { current_index } => Some(current_index),
            SlideshowState::Closed => None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Open the slideshow at `start_index`, clamped into the collection.
    /// Does nothing for an empty collection.
    pub fn open(&mut self, start_index: usize, len: usize) -> bool {
        if len == 0 {
            log::debug!("Slideshow: nothing to show");
            return false;
        }
        let current_index = start_index.min(len - 1);
        self.state = SlideshowState::Open { current_index };
        log::debug!("Slideshow: opened at {}/{}", current_index + 1, len);
        true
    }

    /// Stop autoplay and close.
    pub fn close(&mut self) {
        self.stop_autoplay();
        if self.is_open() {
            log::debug!("Slideshow: closed");
        }
        self.state = SlideshowState::Closed;
    }

    /// Advance to the next photo, wrapping around.
    pub fn next(&mut self, len: usize) -> bool {
        self.step(len, |index| (index + 1) % len)
    }

    /// Go back to the previous photo, wrapping around.
    pub fn previous(&mut self, len: usize) -> bool {
        self.step(len, |index| if index == 0 { len - 1 } else { index - 1 })
    }

    fn step(&mut self, len: usize, advance: impl FnOnce(usize) -> usize) -> bool {
        if len <= 1 {
            return false;
        }
        let SlideshowState::Open { current_index } = self.state else {
            return false;
        };
        self.state = SlideshowState::Open {
            current_index: advance(current_index.min(len - 1)),
        };
        true
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize, len: usize) -> bool {
        if !self.is_open() || index >= len {
            return false;
        }
        self.state = SlideshowState::Open {
            current_index: index,
        };
        true
    }

    // ------------------------------------------------------------------------
    // Autoplay
    // ------------------------------------------------------------------------

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Token of the running autoplay, if any.
    pub fn autoplay_token(&self) -> Option<AutoPlayToken> {
        self.autoplay.map(|a| a.token)
    }

    /// Start autoplay. Returns the new token, or `None` when autoplay is
    /// already running, the slideshow is closed, or there is at most one photo.
    pub fn start_autoplay(&mut self, len: usize) -> Option<AutoPlayToken> {
        self.start_autoplay_at(len, Instant::now())
    }

    /// [`Self::start_autoplay`] with an explicit start time for [`Self::poll`].
    pub fn start_autoplay_at(&mut self, len: usize, now: Instant) -> Option<AutoPlayToken> {
        if len <= 1 || self.autoplay.is_some() || !self.is_open() {
            return None;
        }

        let token = AutoPlayToken(self.next_token);
        self.next_token += 1;
        self.autoplay = Some(AutoPlay {
            token,
            last_advance: now,
        });
        log::debug!("Slideshow: autoplay started ({:?})", token);
        Some(token)
    }

    /// Stop autoplay. Safe to call when not playing.
    pub fn stop_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay.take() {
            log::debug!("Slideshow: autoplay stopped ({:?})", autoplay.token);
        }
    }

    /// Start or stop autoplay. Returns whether autoplay is running afterwards.
    pub fn toggle_autoplay(&mut self, len: usize) -> bool {
        if self.is_autoplaying() {
            self.stop_autoplay();
        } else {
            self.start_autoplay(len);
        }
        self.is_autoplaying()
    }

    /// Timer callback: advance if `token` belongs to the running autoplay.
    pub fn fire(&mut self, token: AutoPlayToken, len: usize) -> bool {
        match self.autoplay {
            Some(ref mut autoplay) if autoplay.token == token => {
                autoplay.last_advance = Instant::now();
            }
            _ => return false,
        }
        self.next(len)
    }

    /// Frame-loop driver: advance once if a full interval elapsed since the
    /// last automatic advance.
    pub fn poll(&mut self, now: Instant, len: usize) -> bool {
        let interval = self.interval;
        match self.autoplay {
            Some(ref mut autoplay)
                if now.saturating_duration_since(autoplay.last_advance) >= interval =>
            {
                autoplay.last_advance = now;
            }
            _ => return false,
        }
        self.next(len)
    }

    // ------------------------------------------------------------------------
    // Collection changes
    // ------------------------------------------------------------------------

    /// Keep the current photo in view after a photo was added at the front.
    pub fn on_inserted_front(&mut self, new_len: usize) {
        if let SlideshowState::Open { current_index } = self.state {
            self.state = SlideshowState::Open {
                current_index: (current_index + 1).min(new_len.saturating_sub(1)),
            };
        }
    }

    /// Re-clamp after photos were removed.
    ///
    /// `removed` holds the indices the photos had before removal. If the
    /// current photo survived, the index follows it; if it was removed, the
    /// index moves to the closest surviving photo before it (or 0). An empty
    /// collection closes the slideshow.
    pub fn on_removed(&mut self, removed: &[usize], new_len: usize) {
        let SlideshowState::Open { current_index } = self.state else {
            return;
        };

        if new_len == 0 {
            self.close();
            return;
        }

        let removed_before = removed.iter().filter(|&&i| i < current_index).count();
        let survivors_before = current_index - removed_before;
        let index = if removed.contains(&current_index) {
            survivors_before.saturating_sub(1)
        } else {
            survivors_before
        };

        self.state = SlideshowState::Open {
            current_index: index.min(new_len - 1),
        };

        if new_len <= 1 {
            self.stop_autoplay();
        }
    }

    /// Progress text like `"3/15"` while open.
    pub fn position(&self, len: usize) -> Option<String> {
        self.current_index()
            .map(|index| format!("{}/{}", index + 1, len))
    }

    /// Whether navigation controls (arrows, dots) apply to a collection of `len`.
    pub fn shows_navigation(len: usize) -> bool {
        len > 1
    }
}

impl Default for SlideshowController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_at(index: usize, len: usize) -> SlideshowController {
        let mut slideshow = SlideshowController::new();
        assert!(slideshow.open(index, len));
        slideshow
    }

    #[test]
    fn test_open_empty_is_noop() {
        let mut slideshow = SlideshowController::new();
        assert!(!slideshow.open(0, 0));
        assert_eq!(slideshow.state(), SlideshowState::Closed);
    }

    #[test]
    fn test_open_clamps_start_index() {
        let slideshow = open_at(10, 3);
        assert_eq!(slideshow.current_index(), Some(2));
    }

    #[test]
    fn test_next_wraps_around() {
        let mut slideshow = open_at(0, 3);
        for _ in 0..3 {
            assert!(slideshow.next(3));
        }
        assert_eq!(slideshow.current_index(), Some(0));
    }

    #[test]
    fn test_previous_from_first_goes_to_last() {
        let mut slideshow = open_at(0, 3);
        assert!(slideshow.previous(3));
        assert_eq!(slideshow.current_index(), Some(2));
    }

    #[test]
    fn test_single_photo_navigation_is_noop() {
        let mut slideshow = open_at(0, 1);
        assert!(!slideshow.next(1));
        assert!(!slideshow.previous(1));
        assert_eq!(slideshow.current_index(), Some(0));
    }

    #[test]
    fn test_navigation_when_closed_is_noop() {
        let mut slideshow = SlideshowController::new();
        assert!(!slideshow.next(3));
        assert!(!slideshow.go_to(1, 3));
        assert_eq!(slideshow.current_index(), None);
    }

    #[test]
    fn test_go_to_ignores_out_of_range() {
        let mut slideshow = open_at(0, 3);
        assert!(slideshow.go_to(2, 3));
        assert!(!slideshow.go_to(3, 3));
        assert_eq!(slideshow.current_index(), Some(2));
    }

    #[test]
    fn test_autoplay_requires_more_than_one_photo() {
        let mut slideshow = open_at(0, 1);
        assert_eq!(slideshow.start_autoplay(1), None);
        assert!(!slideshow.is_autoplaying());
    }

    #[test]
    fn test_autoplay_start_twice_keeps_one_timer() {
        let mut slideshow = open_at(0, 3);
        let token = slideshow.start_autoplay(3).unwrap();
        assert_eq!(slideshow.start_autoplay(3), None);
        assert_eq!(slideshow.autoplay_token(), Some(token));
    }

    #[test]
    fn test_fire_advances_with_live_token() {
        let mut slideshow = open_at(0, 3);
        let token = slideshow.start_autoplay(3).unwrap();
        assert!(slideshow.fire(token, 3));
        assert!(slideshow.fire(token, 3));
        assert_eq!(slideshow.current_index(), Some(2));
    }

    #[test]
    fn test_stale_token_never_fires() {
        let mut slideshow = open_at(0, 3);
        let first = slideshow.start_autoplay(3).unwrap();
        slideshow.stop_autoplay();
        let second = slideshow.start_autoplay(3).unwrap();
        assert_ne!(first, second);

        assert!(!slideshow.fire(first, 3));
        assert_eq!(slideshow.current_index(), Some(0));

        slideshow.close();
        assert!(!slideshow.fire(second, 3));
        assert!(!slideshow.is_autoplaying());
    }

    #[test]
    fn test_stop_autoplay_is_idempotent() {
        let mut slideshow = open_at(0, 3);
        slideshow.stop_autoplay();
        slideshow.start_autoplay(3);
        slideshow.stop_autoplay();
        slideshow.stop_autoplay();
        assert!(!slideshow.is_autoplaying());
    }

    #[test]
    fn test_toggle_autoplay() {
        let mut slideshow = open_at(0, 3);
        assert!(slideshow.toggle_autoplay(3));
        assert!(!slideshow.toggle_autoplay(3));
    }

    #[test]
    fn test_poll_advances_once_per_interval() {
        let mut slideshow = SlideshowController::with_interval(Duration::from_millis(3000));
        slideshow.open(0, 3);
        let start = Instant::now();
        slideshow.start_autoplay_at(3, start).unwrap();

        assert!(!slideshow.poll(start + Duration::from_millis(2999), 3));
        assert!(slideshow.poll(start + Duration::from_millis(3000), 3));
        assert!(!slideshow.poll(start + Duration::from_millis(4000), 3));
        assert!(slideshow.poll(start + Duration::from_millis(6000), 3));
        assert_eq!(slideshow.current_index(), Some(2));
    }

    #[test]
    fn test_poll_after_close_does_nothing() {
        let mut slideshow = open_at(0, 3);
        let start = Instant::now();
        slideshow.start_autoplay_at(3, start).unwrap();
        slideshow.close();
        assert!(!slideshow.poll(start + Duration::from_secs(10), 3));
    }

    #[test]
    fn test_removing_current_last_photo_moves_back() {
        let mut slideshow = open_at(2, 3);
        slideshow.on_removed(&[2], 2);
        assert_eq!(slideshow.current_index(), Some(1));
    }

    #[test]
    fn test_removing_current_first_photo_stays_at_zero() {
        let mut slideshow = open_at(0, 3);
        slideshow.on_removed(&[0], 2);
        assert_eq!(slideshow.current_index(), Some(0));
    }

    #[test]
    fn test_removing_earlier_photo_follows_current() {
        let mut slideshow = open_at(3, 5);
        slideshow.on_removed(&[0, 4], 3);
        assert_eq!(slideshow.current_index(), Some(2));
    }

    #[test]
    fn test_removing_last_remaining_photo_closes() {
        let mut slideshow = open_at(0, 1);
        slideshow.on_removed(&[0], 0);
        assert_eq!(slideshow.state(), SlideshowState::Closed);
    }

    #[test]
    fn test_shrinking_to_one_photo_stops_autoplay() {
        let mut slideshow = open_at(1, 2);
        slideshow.start_autoplay(2).unwrap();
        slideshow.on_removed(&[1], 1);
        assert_eq!(slideshow.current_index(), Some(0));
        assert!(!slideshow.is_autoplaying());
    }

    #[test]
    fn test_insert_front_keeps_current_photo() {
        let mut slideshow = open_at(1, 3);
        slideshow.on_inserted_front(4);
        assert_eq!(slideshow.current_index(), Some(2));
    }

    #[test]
    fn test_position() {
        let slideshow = open_at(2, 15);
        assert_eq!(slideshow.position(15).as_deref(), Some("3/15"));
        assert_eq!(SlideshowController::new().position(15), None);
    }

    #[test]
    fn test_navigation_needs_two_photos() {
        assert!(!SlideshowController::shows_navigation(0));
        assert!(!SlideshowController::shows_navigation(1));
        assert!(SlideshowController::shows_navigation(2));
    }
}
