pub mod use_corrected_time;
pub mod use_lottery_data;
pub mod use_session;

pub use use_corrected_time::*;
pub use use_lottery_data::*;
pub use use_session::*;
