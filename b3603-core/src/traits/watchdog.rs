//! Watchdog trait

/// Hardware watchdog
pub trait Watchdog {
    /// Restart the watchdog countdown
    fn feed(&mut self);
}
