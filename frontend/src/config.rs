use log::Level;

pub const SITE_NAME: &str = "Code Vimarsh";

/// Stand-in for a network round trip before a submission is stored.
pub const SUBMIT_DELAY_MS: u32 = 1_000;

/// How long the success message stays up before the form closes itself.
pub const SUCCESS_DISPLAY_MS: u32 = 2_000;

/// Navbar switches to its solid style past this scroll offset.
pub const NAV_SCROLL_THRESHOLD: f64 = 40.0;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty while running under `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
