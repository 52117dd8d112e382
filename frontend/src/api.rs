use std::fmt;

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use shared::constants::{ENTER_ENDPOINT, ENTRIES_ENDPOINT, LOTTERIES_ENDPOINT, SESSION_ENDPOINT};
use shared::lottery::single_record;
use shared::{Entry, EntryMetadata, Lottery, LotteryError, Session, SyncedLottery, TimeSource};
use web_sys::RequestCredentials;

use crate::config::api_url;

/// `Date.now()` of the browser.
pub struct BrowserClock;

impl TimeSource for BrowserClock {
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(gloo_net::Error),
    Status(u16),
    Lottery(LotteryError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network error: {}", e),
            Self::Status(code) => write!(f, "server responded with {}", code),
            Self::Lottery(e) => write!(f, "{}", e),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Network(err)
    }
}

impl From<LotteryError> for ApiError {
    fn from(err: LotteryError) -> Self {
        Self::Lottery(err)
    }
}

async fn hit<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .credentials(RequestCredentials::Include)
        .send()
        .await?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response.json::<T>().await?)
}

pub async fn fetch_session() -> Result<Session, ApiError> {
    hit(Request::get(&api_url(SESSION_ENDPOINT))).await
}

pub async fn sign_in(email: &str) -> Result<Session, ApiError> {
    let response = Request::post(&api_url(SESSION_ENDPOINT))
        .credentials(RequestCredentials::Include)
        .json(&json!({ "email": email }))?
        .send()
        .await?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response.json::<Session>().await?)
}

pub async fn sign_out() -> Result<Session, ApiError> {
    hit(Request::delete(&api_url(SESSION_ENDPOINT))).await
}

pub async fn fetch_entry(lottery_id: &str, email: &str) -> Result<Option<Entry>, ApiError> {
    let entries: Vec<Entry> = hit(
        Request::get(&api_url(ENTRIES_ENDPOINT)).query([("lotteryId", lottery_id), ("email", email)]),
    )
    .await?;
    Ok(single_record(entries)?)
}

/// Fetches the lottery and estimates the clock correction from the round trip.
pub async fn fetch_lottery(lottery_id: &str) -> Result<Option<SyncedLottery>, ApiError> {
    let started = BrowserClock.now_millis();
    let lotteries: Vec<Lottery> =
        hit(Request::get(&api_url(LOTTERIES_ENDPOINT)).query([("lotteryId", lottery_id)])).await?;
    let synced = single_record(lotteries)?
        .map(|lottery| lottery.synchronize(started, BrowserClock.now_millis()))
        .transpose()?;
    Ok(synced)
}

pub async fn enter_lottery(lottery_id: &str, metadata: &EntryMetadata) -> Result<Entry, ApiError> {
    let metadata = metadata.to_json()?;
    hit(Request::get(&api_url(ENTER_ENDPOINT))
        .query([("id", lottery_id), ("entryMetadata", metadata.as_str())]))
    .await
}
