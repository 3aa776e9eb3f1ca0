//! Clock-driven simulated video.

use std::time::Duration;

use tokio::time::Instant;

use crate::step::session::{FrameMetadata, PlaybackSession, SessionError};

/// Tolerance when converting a position to a frame index.
const FRAME_INDEX_EPSILON: f64 = 1e-9;

/// A virtual video at a constant frame rate.
///
/// Playback time advances with the tokio clock (scaled by the playback
/// rate), so tests running on a paused runtime are deterministic.
#[derive(Debug)]
pub struct SimulatedSession {
    frame_rate: f64,
    duration: Option<f64>,
    /// Position at the moment playback last started or was rebased
    anchor_position: f64,
    /// Set while playing
    playing_since: Option<Instant>,
    rate: f64,
    muted: bool,
    frame_callbacks: bool,
    autoplay_blocked: bool,
    drop_every: Option<u64>,
    last_frame: Option<u64>,
    clock_origin: Instant,
}

impl SimulatedSession {
    /// A paused session at position 0.
    pub fn new(frame_rate: f64, duration_secs: f64) -> Self {
        Self {
            frame_rate,
            duration: Some(duration_secs),
            anchor_position: 0.0,
            playing_since: None,
            rate: 1.0,
            muted: false,
            frame_callbacks: true,
            autoplay_blocked: false,
            drop_every: None,
            last_frame: None,
            clock_origin: Instant::now(),
        }
    }

    /// Simulate a host without frame presentation callbacks.
    pub fn without_frame_callbacks(mut self) -> Self {
        self.frame_callbacks = false;
        self
    }

    /// Make `play()` fail, as an autoplay policy would.
    pub fn with_autoplay_blocked(mut self) -> Self {
        self.autoplay_blocked = true;
        self
    }

    /// Skip every `n`th frame (n >= 2) to simulate dropped frames.
    pub fn with_dropped_frames(mut self, every: u64) -> Self {
        self.drop_every = (every >= 2).then_some(every);
        self
    }

    /// Nominal frame rate of the simulated media.
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Nominal frame duration.
    pub fn frame_duration(&self) -> f64 {
        1.0 / self.frame_rate
    }

    /// Start over as if a new source had been loaded: paused at 0.
    pub fn reload(&mut self) {
        self.anchor_position = 0.0;
        self.playing_since = None;
        self.last_frame = None;
    }

    /// Whether playback has reached the end of the media.
    pub fn has_ended(&self) -> bool {
        match self.duration {
            Some(duration) => self.position() >= duration,
            None => false,
        }
    }

    fn clamp(&self, seconds: f64) -> f64 {
        let upper = self.duration.unwrap_or(f64::MAX);
        seconds.clamp(0.0, upper)
    }

    /// Fold elapsed playing time into the anchor.
    fn rebase(&mut self) {
        self.anchor_position = self.position();
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn next_frame_index(&self, position: f64) -> u64 {
        let mut index = (position * self.frame_rate + FRAME_INDEX_EPSILON).floor() as u64 + 1;
        if let Some(last) = self.last_frame {
            index = index.max(last + 1);
        }
        if let Some(every) = self.drop_every {
            if index % every == 0 {
                index += 1;
            }
        }
        index
    }
}

impl PlaybackSession for SimulatedSession {
    fn position(&self) -> f64 {
        match self.playing_since {
            Some(since) => {
                self.clamp(self.anchor_position + since.elapsed().as_secs_f64() * self.rate)
            }
            None => self.anchor_position,
        }
    }

    fn set_position(&mut self, seconds: f64) {
        self.anchor_position = self.clamp(seconds);
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
        self.last_frame = None;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.playing_since.is_none()
    }

    fn pause(&mut self) {
        self.anchor_position = self.position();
        self.playing_since = None;
        self.last_frame = None;
    }

    async fn play(&mut self) -> Result<(), SessionError> {
        if self.autoplay_blocked {
            return Err(SessionError::PlaybackRejected(
                "autoplay is blocked for this session".to_string(),
            ));
        }
        if self.duration.is_none() {
            return Err(SessionError::NotLoaded);
        }
        if self.playing_since.is_none() {
            if self.has_ended() {
                self.anchor_position = 0.0;
            }
            self.playing_since = Some(Instant::now());
        }
        Ok(())
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rebase();
        self.rate = rate;
    }

    fn supports_frame_callbacks(&self) -> bool {
        self.frame_callbacks
    }

    async fn next_frame(&mut self) -> Option<FrameMetadata> {
        if self.is_paused() {
            return std::future::pending().await;
        }
        let position = self.position();
        let index = self.next_frame_index(position);
        let media_time = index as f64 / self.frame_rate;
        if self.duration.is_some_and(|d| media_time > d) {
            return None;
        }

        // A frame too far away for a Duration never arrives
        let wait = ((media_time - position) / self.rate).max(0.0);
        let wait = Duration::try_from_secs_f64(wait).ok()?;
        tokio::time::sleep(wait).await;

        self.last_frame = Some(index);
        Some(FrameMetadata {
            presented_at: self.clock_origin.elapsed().as_secs_f64(),
            media_time,
        })
    }
}
