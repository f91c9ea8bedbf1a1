use serde::{Deserialize, Serialize};
use time::Duration;

use crate::database::models::UserId;
use crate::timestamp::{self, Timestamp};

pub mod crypt;
pub use crypt::Key;

#[derive(Serialize, Deserialize, Debug)]
pub struct Token {
	#[serde(with = "crate::timestamp::unix")]
	expires_at: Timestamp,
	pub user_id: UserId,
}

const SESSION_LIFETIME: Duration = Duration::days(1);

impl Token {
	pub fn new(user_id: UserId) -> Self {
		Self {
			user_id,
			expires_at: timestamp::now() + SESSION_LIFETIME,
		}
	}

	pub fn is_expired(&self) -> bool {
		timestamp::is_in_past(&self.expires_at)
	}
}

pub static COOKIE_NAME: &str = "session";
