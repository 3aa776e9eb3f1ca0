//! Scripted frame source.

use std::collections::VecDeque;

use crate::step::session::{FrameMetadata, PlaybackSession, SessionError};

/// A session whose frame notifications come from a fixed script.
///
/// Frames are only delivered while playing. Once the script is exhausted
/// `next_frame` never resolves, the same way a stalled player behaves.
#[derive(Debug, Clone)]
pub struct ScriptedSession {
    media_times: VecDeque<f64>,
    position: f64,
    duration: Option<f64>,
    paused: bool,
    muted: bool,
    rate: f64,
    reject_play: bool,
    /// Mute flag and rate at each frame request made while playing
    frame_requests: Vec<(bool, f64)>,
}

impl ScriptedSession {
    /// Replay the given frame media times in order.
    pub fn from_media_times<I: IntoIterator<Item = f64>>(media_times: I) -> Self {
        Self {
            media_times: media_times.into_iter().collect(),
            position: 0.0,
            duration: Some(60.0),
            paused: true,
            muted: false,
            rate: 1.0,
            reject_play: false,
            frame_requests: Vec::new(),
        }
    }

    /// Replay frames separated by `deltas`, starting at media time 0.
    pub fn from_deltas(deltas: &[f64]) -> Self {
        let mut media_time = 0.0;
        let mut media_times = Vec::with_capacity(deltas.len() + 1);
        media_times.push(media_time);
        for delta in deltas {
            media_time += delta;
            media_times.push(media_time);
        }
        Self::from_media_times(media_times)
    }

    pub fn with_duration(mut self, duration: Option<f64>) -> Self {
        self.duration = duration;
        self
    }

    /// Make `play()` fail.
    pub fn with_play_rejected(mut self) -> Self {
        self.reject_play = true;
        self
    }

    /// Frames not yet delivered.
    pub fn remaining(&self) -> usize {
        self.media_times.len()
    }

    /// `(muted, rate)` as seen by every `next_frame` call made while playing.
    pub fn frame_requests(&self) -> &[(bool, f64)] {
        &self.frame_requests
    }
}

impl PlaybackSession for ScriptedSession {
    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    async fn play(&mut self) -> Result<(), SessionError> {
        if self.reject_play {
            return Err(SessionError::PlaybackRejected(
                "play() rejected by script".to_string(),
            ));
        }
        self.paused = false;
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
        self.rate = rate;
    }

    fn supports_frame_callbacks(&self) -> bool {
        true
    }

    async fn next_frame(&mut self) -> Option<FrameMetadata> {
        if self.paused {
            return std::future::pending().await;
        }
        self.frame_requests.push((self.muted, self.rate));
        match self.media_times.pop_front() {
            Some(media_time) => {
                self.position = media_time;
                Some(FrameMetadata {
                    presented_at: media_time,
                    media_time,
                })
            }
            None => std::future::pending().await,
        }
    }
}
