pub type Timestamp = time::OffsetDateTime;

pub fn now() -> Timestamp {
	Timestamp::now_utc()
}

pub fn is_in_past(timestamp: &Timestamp) -> bool {
	*timestamp < now()
}

/// for `#[serde(with)]`; seconds since the Unix epoch
pub mod unix {
	pub use time::serde::timestamp::{deserialize, serialize};
}

/// `2024-03-05`-style rendering for listing pages
pub fn display_date(timestamp: &Timestamp) -> impl std::fmt::Display {
	timestamp.date()
}
