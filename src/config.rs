use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Header switches to its compact style past this offset (px).
pub const SCROLL_THRESHOLD: f64 = 50.0;
/// Sections become active this many px before their top reaches the viewport top.
pub const SECTION_LEAD: f64 = 100.0;
/// Fixed header height subtracted when scrolling to an anchor.
pub const HEADER_OFFSET: f64 = 80.0;

pub const PARALLAX_MIN_WIDTH: f64 = 768.0;
pub const PARALLAX_FACTOR: f64 = 0.3;

pub const NOTIFICATION_LIFETIME_MS: u32 = 5_000;
pub const NOTIFICATION_TEARDOWN_MS: u32 = 300;

pub const SUBMIT_DELAY_MS: u32 = 1_500;

pub const GALLERY_SHOW_DELAY_MS: u32 = 10;
pub const GALLERY_HIDE_DELAY_MS: u32 = 300;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_STAGGER_S: f64 = 0.1;

pub const COUNTER_STEPS: u32 = 50;
pub const COUNTER_DURATION_MS: u32 = 2_000;
pub const COUNTER_TRIGGER_RATIO: f64 = 0.5;
