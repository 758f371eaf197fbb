//! Profile and points service boundary
//!
//! The games only need two things from the platform backend: the
//! current cumulative points (to evaluate unlocks) and a way to submit
//! a finished session's earnings. Upstream response shapes vary across
//! backend versions, so parsing is defensive: any missing or malformed
//! counter defaults to zero instead of failing a render.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors from the remote points service. None of these are fatal to a
/// session; the local score stays authoritative.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(u16),
}

/// Cumulative profile counters, as the dashboard consumes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub total_points: u64,
    pub experience: u64,
    pub level: u32,
}

impl ProfileSnapshot {
    /// Parse a profile response, tolerating the shapes different
    /// backend versions produce: counters at the top level, under
    /// `user`, `data`, or `profile`, in camelCase or snake_case.
    /// Anything missing defaults to zero.
    pub fn from_value(value: &Value) -> ProfileSnapshot {
        let root = ["user", "data", "profile"]
            .iter()
            .find_map(|key| {
                let nested = value.get(key)?;
                nested.is_object().then_some(nested)
            })
            .unwrap_or(value);

        let total_points = read_u64(root, &["totalPoints", "total_points", "points"]);
        let experience = read_u64(root, &["experience", "xp"]);
        let level = read_u64(root, &["level"]) as u32;

        ProfileSnapshot {
            total_points,
            experience,
            level,
        }
    }
}

fn read_u64(value: &Value, keys: &[&str]) -> u64 {
    for key in keys {
        if let Some(n) = value.get(key).and_then(Value::as_u64) {
            return n;
        }
    }
    0
}

/// Updated counters returned by a successful points submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsReceipt {
    pub total_points: u64,
    pub experience: u64,
    pub level: u32,
}

impl PointsReceipt {
    fn from_value(value: &Value) -> PointsReceipt {
        let snapshot = ProfileSnapshot::from_value(value);
        PointsReceipt {
            total_points: snapshot.total_points,
            experience: snapshot.experience,
            level: snapshot.level,
        }
    }
}

/// The platform backend as the games see it.
pub trait PointsService {
    /// Read the current cumulative profile.
    fn fetch_profile(&self) -> Result<ProfileSnapshot, ServiceError>;

    /// Submit a completed session's earnings. Called exactly once per
    /// finished session.
    fn submit_points(&self, earned: u32, game_id: &str) -> Result<PointsReceipt, ServiceError>;
}

/// Whether a game or achievement with a points requirement is unlocked.
/// Monotonic in `current_points`.
pub fn is_unlocked(current_points: u64, required_points: u64) -> bool {
    current_points >= required_points
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    #[serde(rename = "pointsEarned")]
    points_earned: u32,
    #[serde(rename = "gameId")]
    game_id: &'a str,
}

/// Blocking HTTP client for the platform backend.
pub struct HttpPointsService {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpPointsService {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpPointsService {
            base_url: base_url.into(),
            auth_token: None,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn request(&self, builder: reqwest::blocking::RequestBuilder) -> Result<Value, ServiceError> {
        let builder = match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        Ok(response.json()?)
    }
}

impl PointsService for HttpPointsService {
    fn fetch_profile(&self) -> Result<ProfileSnapshot, ServiceError> {
        let url = format!("{}/profile", self.base_url);
        let value = self.request(self.client.get(&url))?;
        Ok(ProfileSnapshot::from_value(&value))
    }

    fn submit_points(&self, earned: u32, game_id: &str) -> Result<PointsReceipt, ServiceError> {
        let url = format!("{}/points", self.base_url);
        let body = SubmitBody {
            points_earned: earned,
            game_id,
        };
        let value = self.request(self.client.post(&url).json(&body))?;
        Ok(PointsReceipt::from_value(&value))
    }
}
