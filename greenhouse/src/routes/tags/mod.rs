use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::{auth, percent};

mod edit;

#[derive(sqlx::FromRow)]
struct TagRow {
	id: models::TagId,
	name: String,
	description: Option<String>,
	num_startups: i64,
}

struct TagEntry {
	id: models::TagId,
	name: String,
	href: String,
	description: Option<String>,
	num_startups: i64,
}

struct InitialGroup {
	initial: char,
	tags: Vec<TagEntry>,
}

#[derive(askama::Template)]
#[template(path = "tags/index.html")]
struct Template {
	self_user: Option<models::User>,
	groups: Vec<InitialGroup>,
	can_edit: bool,
}
crate::helpers::impl_into_response!(Template);

pub async fn get_handler(
	auth::Maybe(self_user): auth::Maybe,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	use futures::TryStreamExt as _;

	let database = &*database;

	let mut by_initial: BTreeMap<char, Vec<TagEntry>> = BTreeMap::new();
	let mut stream = sqlx::query_as::<_, TagRow>(
		"SELECT tags.id, tags.name, tags.description, (SELECT count(*) FROM startup_tags WHERE tag = tags.id) AS num_startups FROM tags ORDER BY tags.name",
	)
	.fetch(database);
	while let Some(tag) = stream.try_next().await.map_err(error::Sqlx)? {
		let initial = tag
			.name
			.chars()
			.next()
			.map_or('#', |letter| letter.to_ascii_uppercase());
		by_initial.entry(initial).or_insert(Vec::new()).push(TagEntry {
			id: tag.id,
			href: format!("/?tag={}", percent::encode(tag.name.as_bytes())),
			name: tag.name,
			description: tag.description,
			num_startups: tag.num_startups,
		});
	}

	let can_edit = self_user
		.as_ref()
		.map_or(false, |user| user.role >= models::UserRole::Admin);

	Ok(Template {
		self_user,
		groups: by_initial
			.into_iter()
			.map(|(initial, tags)| InitialGroup { initial, tags })
			.collect(),
		can_edit,
	})
}

pub fn configure() -> Router {
	Router::new()
		.route("/", axum::routing::get(get_handler))
		.nest("/:tag_id", edit::configure())
}
