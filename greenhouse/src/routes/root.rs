use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::{auth, pagination, percent, set_none_if_empty};

#[derive(sqlx::FromRow)]
struct StartupRow {
	id: models::StartupId,
	name: String,
	tagline: String,
	image_url: Option<String>,
	views: i64,
	founder: Option<models::UserId>,
	founder_name: Option<String>,
}

struct Founder {
	id: models::UserId,
	username: String,
}

struct StartupCard {
	id: models::StartupId,
	name: String,
	tagline: String,
	image_url: Option<String>,
	views: i64,
	founder: Option<Founder>,
}

impl From<StartupRow> for StartupCard {
	fn from(row: StartupRow) -> Self {
		Self {
			id: row.id,
			name: row.name,
			tagline: row.tagline,
			image_url: row.image_url,
			views: row.views,
			founder: row
				.founder
				.zip(row.founder_name)
				.map(|(id, username)| Founder { id, username }),
		}
	}
}

#[derive(askama::Template)]
#[template(path = "index.html")]
struct Template {
	self_user: Option<models::User>,
	startups: Vec<StartupCard>,
	q: Option<String>,
	tag: Option<String>,
	pagination: Option<pagination::Template>,
}
crate::helpers::impl_into_response!(Template);

#[derive(serde::Deserialize)]
pub struct Query {
	q: Option<String>,
	tag: Option<String>,
}

pub async fn get_handler(
	auth::Maybe(self_user): auth::Maybe,
	extract::Query(Query { mut q, mut tag }): extract::Query<Query>,
	extract::Query(pagination): extract::Query<pagination::Query>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let database = &*database;

	set_none_if_empty(&mut q);
	set_none_if_empty(&mut tag);

	let search = q.as_deref().map(like_pattern);

	let num_startups: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM startups WHERE ($1::text IS NULL OR name ILIKE $1 OR tagline ILIKE $1) AND ($2::text IS NULL OR id IN (SELECT startup FROM startup_tags JOIN tags ON tags.id = startup_tags.tag WHERE tags.name = $2))",
	)
	.bind(search.as_deref())
	.bind(tag.as_deref())
	.fetch_one(database)
	.await
	.map_err(error::Sqlx)?;

	let num_pages = pagination::num_pages(num_startups, pagination.page_size());
	if pagination.page() > std::cmp::max(num_pages, 1) {
		return Err(error::EntityNotFound("page").into());
	}

	let startups: Vec<StartupRow> = sqlx::query_as(
		"SELECT startups.id, startups.name, startups.tagline, startups.image_url, startups.views, startups.founder, users.username AS founder_name FROM startups LEFT JOIN users ON startups.founder = users.id WHERE ($1::text IS NULL OR startups.name ILIKE $1 OR startups.tagline ILIKE $1) AND ($2::text IS NULL OR startups.id IN (SELECT startup FROM startup_tags JOIN tags ON tags.id = startup_tags.tag WHERE tags.name = $2)) ORDER BY startups.created_time DESC, startups.id DESC OFFSET $3 LIMIT $4",
	)
	.bind(search.as_deref())
	.bind(tag.as_deref())
	.bind(pagination.offset())
	.bind(pagination.limit())
	.fetch_all(database)
	.await
	.map_err(error::Sqlx)?;

	let base_url = browse_url(q.as_deref(), tag.as_deref(), pagination.page_size);

	Ok(Template {
		self_user,
		startups: startups.into_iter().map(StartupCard::from).collect(),
		q,
		tag,
		pagination: pagination::Template::from_query(pagination, num_pages, &base_url),
	})
}

fn like_pattern(q: &str) -> String {
	let escaped = q
		.replace('\\', "\\\\")
		.replace('%', "\\%")
		.replace('_', "\\_");
	format!("%{escaped}%")
}

fn browse_url(q: Option<&str>, tag: Option<&str>, page_size: Option<i64>) -> String {
	use std::fmt::Write as _;

	let mut url = String::from("/");
	let mut separator = '?';
	for (key, value) in [("q", q), ("tag", tag)] {
		if let Some(value) = value {
			write!(url, "{separator}{key}={}", percent::encode(value.as_bytes())).unwrap();
			separator = '&';
		}
	}
	if let Some(page_size) = page_size {
		write!(url, "{separator}page_size={page_size}").unwrap();
	}
	url
}

pub fn configure() -> Router {
	Router::new().route("/", axum::routing::get(get_handler))
}

#[cfg(test)]
mod test {
	use super::{browse_url, like_pattern};

	#[test]
	fn browse_urls() {
		assert_eq!(browse_url(None, None, None), "/");
		assert_eq!(browse_url(Some("pet food"), None, None), "/?q=pet%20food");
		assert_eq!(browse_url(None, Some("ai"), Some(50)), "/?tag=ai&page_size=50");
	}

	#[test]
	fn like_patterns_are_escaped() {
		assert_eq!(like_pattern("50%_done"), "%50\\%\\_done%");
	}
}
