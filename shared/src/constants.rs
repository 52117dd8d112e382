pub const API_BASE_URL: &str = "http://127.0.0.1:3000";

pub const LOTTERIES_ENDPOINT: &str = "/api/lottery/lotteries";
pub const ENTRIES_ENDPOINT: &str = "/api/lottery/entries";
pub const ENTER_ENDPOINT: &str = "/api/lottery/enter";
pub const SESSION_ENDPOINT: &str = "/api/auth/session";
pub const TIME_ENDPOINT: &str = "/api/time";

pub const CURRENT_LOTTERY_ID: &str = "spring2021";
pub const SESSION_COOKIE: &str = "lottery_session";

/// Period of the corrected-time re-evaluation, in wall-clock milliseconds.
pub const TICK_INTERVAL_MS: u32 = 200;

pub const LOGIN_PROMPT: &str = "Login to sign up for the lottery.";
pub const NO_LOTTERY_MESSAGE: &str = "No lottery is currently scheduled. Check back soon!";
pub const INVALID_EMAIL_ERROR: &str = "Please enter a valid email address";
pub const INVALID_LOTTERY_ID_ERROR: &str = "Lottery ids are lowercase letters followed by a four digit year";
