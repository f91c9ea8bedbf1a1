use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::{auth, pagination};

#[derive(sqlx::FromRow)]
struct StartupCard {
	id: models::StartupId,
	name: String,
	tagline: String,
	image_url: Option<String>,
	views: i64,
}

#[derive(askama::Template)]
#[template(path = "users/page.html")]
struct Template {
	self_user: Option<models::User>,
	requested_user: models::User,
	joined: String,
	startups: Vec<StartupCard>,
	num_startups: i64,
	pagination: Option<pagination::Template>,
}
crate::helpers::impl_into_response!(Template);

pub async fn get_handler(
	auth::Maybe(self_user): auth::Maybe,
	extract::Path((user_id,)): extract::Path<(models::UserId,)>,
	extract::Query(pagination): extract::Query<pagination::Query>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let database = &*database;

	let requested_user = models::User::by_id(database, user_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("user"))?;

	let num_startups: i64 =
		sqlx::query_scalar("SELECT count(*) FROM startups WHERE founder = $1")
			.bind(user_id)
			.fetch_one(database)
			.await
			.map_err(error::Sqlx)?;

	let num_pages = pagination::num_pages(num_startups, pagination.page_size());
	if pagination.page() > std::cmp::max(num_pages, 1) {
		return Err(error::EntityNotFound("page").into());
	}

	let startups = sqlx::query_as(
		"SELECT id, name, tagline, image_url, views FROM startups WHERE founder = $1 ORDER BY created_time DESC, id DESC OFFSET $2 LIMIT $3",
	)
	.bind(user_id)
	.bind(pagination.offset())
	.bind(pagination.limit())
	.fetch_all(database)
	.await
	.map_err(error::Sqlx)?;

	let base_url = match pagination.page_size {
		Some(page_size) => format!("/users/{user_id}?page_size={page_size}"),
		None => format!("/users/{user_id}"),
	};

	Ok(Template {
		self_user,
		joined: crate::timestamp::display_date(&requested_user.created_time).to_string(),
		requested_user,
		startups,
		num_startups,
		pagination: pagination::Template::from_query(pagination, num_pages, &base_url),
	})
}

pub fn configure() -> Router {
	Router::new().route("/:user_id", axum::routing::get(get_handler))
}
