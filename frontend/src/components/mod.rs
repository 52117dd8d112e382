pub mod countdown;
pub mod entry_card;
pub mod entry_submission;
pub mod header;
pub mod loader;
pub mod login_prompt;
pub mod lottery_form;

pub use countdown::Countdown;
pub use entry_card::EntryCard;
pub use entry_submission::EntrySubmission;
pub use header::Header;
pub use loader::Loader;
pub use login_prompt::LoginPrompt;
pub use lottery_form::LotteryForm;
