use std::time::Duration;

/// The highest number on a single-zero roulette wheel.
pub const MAX_OUTCOME: u8 = 36;

/// The number of slots on the wheel (0 through 36).
pub const WHEEL_SIZE: usize = MAX_OUTCOME as usize + 1;

/// The numbers painted red on a European wheel. Every other non-zero number is black.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// How many numbers the hot and cold lists hold.
pub const HOT_COLD_COUNT: usize = 5;

/// The default number of recent outcomes kept per feed.
pub const HISTORY_BOUND: usize = 5;

/// How often the latest-only source is polled.
pub const LATEST_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How often the full-snapshot source is polled.
pub const FULL_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long a single poll may take before it counts as a failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The sentinel the upstream strategy engine uses for "no trigger number".
pub const NO_TRIGGER: i64 = -1;

/// The base URL of the roletas proxy when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3002/api";

/// Path segments of the full-snapshot listing, relative to the API base.
pub const FULL_PATH: &[&str] = &["roletas"];

/// Path segments of the latest-only listing, relative to the API base.
pub const LATEST_PATH: &[&str] = &["roletas", "latest"];

/// Path segments of the health check, relative to the API base.
pub const HEALTH_PATH: &[&str] = &["health"];

/// Label shown in place of a win rate when no rounds have been settled.
pub const NOT_AVAILABLE: &str = "N/A";
