//! Online top-10 leaderboard.
//!
//! Requests run on a background thread and report through a channel. The
//! game polls each [`LeaderboardRequest`] once per frame and only ever swaps
//! in a complete table, so a half-received reply is never on screen.
//!
//! Wire format of a top-10 reply:
//! `SERVER_<name>_COL_<score>_COL_<rank>_ROW_<name>_COL_...`

use bevy::prelude::*;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, TryRecvError, channel},
};
use std::time::Duration;
use thiserror::Error;

use crate::config::LeaderboardConfig;

pub const LEADERBOARD_ROWS: usize = 10;

const HEADER: &str = "SERVER_";
const ROW_SEPARATOR: &str = "_ROW_";
const COLUMN_SEPARATOR: &str = "_COL_";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: String,
    pub name: String,
    pub score: i64,
}

impl LeaderboardRow {
    /// Shown before anything has been received.
    fn placeholder() -> Self {
        Self {
            rank: " ".to_string(),
            name: " ".to_string(),
            score: 0,
        }
    }

    /// A slot the server left empty.
    fn blank() -> Self {
        Self {
            score: 1,
            ..Self::placeholder()
        }
    }

    fn parse(record: &str) -> Option<Self> {
        let columns: Vec<&str> = record.split(COLUMN_SEPARATOR).collect();
        let [name, score, rank] = columns.as_slice() else {
            return None;
        };
        Some(Self {
            rank: rank.to_string(),
            name: name.trim().to_string(),
            score: score.trim().parse().ok()?,
        })
    }
}

/// A complete snapshot of the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardTable {
    rows: Vec<LeaderboardRow>,
    loaded: bool,
}

impl Default for LeaderboardTable {
    fn default() -> Self {
        Self {
            rows: vec![LeaderboardRow::placeholder(); LEADERBOARD_ROWS],
            loaded: false,
        }
    }
}

impl LeaderboardTable {
    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    /// Whether this table came from the server.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

/// Decode a top-10 reply. `None` if the payload lacks the server header.
pub fn parse_top10(payload: &str) -> Option<LeaderboardTable> {
    let body = payload.trim().strip_prefix(HEADER)?;
    let mut records = body.split(ROW_SEPARATOR);

    let rows = (0..LEADERBOARD_ROWS)
        .map(|_| {
            records
                .next()
                .filter(|record| !record.trim().is_empty())
                .and_then(LeaderboardRow::parse)
                .unwrap_or_else(LeaderboardRow::blank)
        })
        .collect();

    Some(LeaderboardTable { rows, loaded: true })
}

pub fn encode_submit(name: &str, score: u32) -> String {
    format!("Name={}&Score={}", urlencoding::encode(name), score)
}

pub fn encode_fetch() -> String {
    "Format=TOP10".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("leaderboard request failed: {0}")]
    Transport(String),
    #[error("leaderboard server answered with status {0}")]
    Status(u16),
    #[error("leaderboard server did not answer in time")]
    Timeout,
    #[error("leaderboard request was dropped")]
    Disconnected,
    #[error("leaderboard reply was not understood")]
    InvalidPayload,
}

/// Sends one form-encoded POST and returns the response body.
pub trait LeaderboardTransport: Send + Sync + 'static {
    fn post(&self, url: &str, body: &str, timeout: Duration) -> Result<String, LeaderboardError>;
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransport;

#[cfg(not(target_arch = "wasm32"))]
impl LeaderboardTransport for HttpTransport {
    fn post(&self, url: &str, body: &str, timeout: Duration) -> Result<String, LeaderboardError> {
        let response = ureq::post(url)
            .timeout(timeout)
            .set("Content-Type", "application/x-www-form-urlencoded")
            .send_string(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => LeaderboardError::Status(code),
                other => LeaderboardError::Transport(other.to_string()),
            })?;
        response
            .into_string()
            .map_err(|e| LeaderboardError::Transport(e.to_string()))
    }
}

/// Web builds have no blocking HTTP client; every request fails at once.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

#[cfg(target_arch = "wasm32")]
impl LeaderboardTransport for OfflineTransport {
    fn post(&self, _url: &str, _body: &str, _timeout: Duration) -> Result<String, LeaderboardError> {
        Err(LeaderboardError::Transport(
            "not available in the web build".to_string(),
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Fetch,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaderboardReply {
    Table(LeaderboardTable),
    Submitted,
}

type ReplyResult = Result<LeaderboardReply, LeaderboardError>;

/// A request in flight. Dropping it abandons the reply.
pub struct LeaderboardRequest {
    kind: RequestKind,
    // Mutex only so the owner can live in a `Sync` resource.
    receiver: Mutex<Receiver<ReplyResult>>,
    remaining: f32,
}

impl LeaderboardRequest {
    fn spawn(
        kind: RequestKind,
        timeout: Duration,
        job: impl FnOnce() -> ReplyResult + Send + 'static,
    ) -> Self {
        let (sender, receiver) = channel();

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let _ = sender.send(job());
        });
        #[cfg(target_arch = "wasm32")]
        let _ = sender.send(job());

        Self {
            kind,
            receiver: Mutex::new(receiver),
            remaining: timeout.as_secs_f32(),
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Check for a reply, spending `dt` seconds of the deadline.
    /// Returns `Some` exactly once the request is finished.
    pub fn poll(&mut self, dt: f32) -> Option<ReplyResult> {
        let receiver = match self.receiver.get_mut() {
            Ok(receiver) => receiver,
            Err(poisoned) => poisoned.into_inner(),
        };
        match receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Disconnected) => Some(Err(LeaderboardError::Disconnected)),
            Err(TryRecvError::Empty) => {
                self.remaining -= dt;
                (self.remaining <= 0.0).then_some(Err(LeaderboardError::Timeout))
            }
        }
    }
}

/// Issues leaderboard requests against the configured endpoints.
#[derive(Clone)]
pub struct LeaderboardClient {
    transport: Arc<dyn LeaderboardTransport>,
    fetch_url: String,
    submit_url: String,
    timeout: Duration,
}

impl LeaderboardClient {
    pub fn new(config: &LeaderboardConfig, transport: Arc<dyn LeaderboardTransport>) -> Self {
        Self {
            transport,
            fetch_url: config.fetch_url.clone(),
            submit_url: config.submit_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// A client on the platform's default transport.
    pub fn from_config(config: &LeaderboardConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let transport = Arc::new(HttpTransport);
        #[cfg(target_arch = "wasm32")]
        let transport = Arc::new(OfflineTransport);
        Self::new(config, transport)
    }

    pub fn fetch(&self) -> LeaderboardRequest {
        info!("Fetching leaderboard from {}", self.fetch_url);
        let transport = Arc::clone(&self.transport);
        let url = self.fetch_url.clone();
        let timeout = self.timeout;
        LeaderboardRequest::spawn(RequestKind::Fetch, timeout, move || {
            let body = transport.post(&url, &encode_fetch(), timeout)?;
            parse_top10(&body)
                .map(LeaderboardReply::Table)
                .ok_or(LeaderboardError::InvalidPayload)
        })
    }

    pub fn submit(&self, name: &str, score: u32) -> LeaderboardRequest {
        info!("Submitting score {} for '{}'", score, name);
        let transport = Arc::clone(&self.transport);
        let url = self.submit_url.clone();
        let body = encode_submit(name, score);
        let timeout = self.timeout;
        LeaderboardRequest::spawn(RequestKind::Submit, timeout, move || {
            transport.post(&url, &body, timeout)?;
            Ok(LeaderboardReply::Submitted)
        })
    }
}
