//! The playback session contract.
//!
//! The stepping core never owns the media element. It reads and writes
//! playback state through [`PlaybackSession`], implemented by whatever owns
//! the actual player.

/// Metadata delivered with a frame presentation notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetadata {
    /// Host clock time the frame was presented at (seconds)
    pub presented_at: f64,
    /// Media timeline position of the presented frame (seconds)
    pub media_time: f64,
}

/// Errors a session may report back to the stepping core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Playback start rejected: {0}")]
    PlaybackRejected(String),

    #[error("No media loaded")]
    NotLoaded,
}

/// A media element the stepping core can drive.
///
/// Implementations are expected to be single-threaded: the core only calls
/// them from one task and never holds two borrows at once.
#[allow(async_fn_in_trait)]
pub trait PlaybackSession {
    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Move playback to `seconds`.
    fn set_position(&mut self, seconds: f64);

    /// Media duration, `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    fn is_paused(&self) -> bool;

    fn pause(&mut self);

    /// Resume playback. Hosts may refuse (e.g. autoplay policy).
    async fn play(&mut self) -> Result<(), SessionError>;

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    /// Whether [`next_frame`](Self::next_frame) can deliver notifications.
    ///
    /// When false, calibration is skipped entirely.
    fn supports_frame_callbacks(&self) -> bool;

    /// Wait for the next presented frame.
    ///
    /// Returns `None` when no further frames will be delivered (e.g. the end
    /// of the media was reached). May stay pending indefinitely while
    /// playback is paused; callers bound the wait with a timeout.
    async fn next_frame(&mut self) -> Option<FrameMetadata>;

    /// Known duration that is finite and positive.
    fn loaded_duration(&self) -> Option<f64> {
        self.duration().filter(|d| d.is_finite() && *d > 0.0)
    }
}
