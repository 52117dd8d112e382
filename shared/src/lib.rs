pub mod clock;
pub mod constants;
pub mod lottery;
pub mod validation;
pub mod view_state;

pub use clock::{ClockSkew, CorrectedSample, LotteryWindow, TickScope, TimeSource, WindowEstimator, WindowTracker};
pub use lottery::{Entry, EntryMetadata, Lottery, LotteryError, SyncedLottery};
pub use view_state::{FetchGuard, FetchState, Session, SessionState, SessionUser, ViewState};
