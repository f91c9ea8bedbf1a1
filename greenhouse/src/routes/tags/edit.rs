use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::{auth, set_none_if_empty};

#[derive(askama::Template)]
#[template(path = "tags/edit.html")]
struct Template {
	updated: bool,
	self_user: models::User,
	requested_tag: models::Tag,
}
crate::helpers::impl_into_response!(Template);

pub async fn get_handler(
	auth::Admin(self_user): auth::Admin,
	extract::Path((tag_id,)): extract::Path<(models::TagId,)>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let requested_tag = models::Tag::by_id(&*database, tag_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("tag"))?;

	Ok(Template {
		updated: false,
		self_user,
		requested_tag,
	})
}

#[derive(Debug, serde::Deserialize)]
pub struct PostRequest {
	name: String,
	description: Option<String>,
}

pub async fn post_handler(
	auth::Admin(self_user): auth::Admin,
	extract::Path((tag_id,)): extract::Path<(models::TagId,)>,
	extract::Form(mut request): extract::Form<PostRequest>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let database = &*database;

	set_none_if_empty(&mut request.description);
	let name = request.name.trim().to_lowercase();
	if name.is_empty() {
		return Err(error::BadRequest("a tag cannot have an empty name".into()).into());
	}

	sqlx::query("UPDATE tags SET name = $2, description = $3 WHERE id = $1")
		.bind(tag_id)
		.bind(&name)
		.bind(&request.description)
		.execute(database)
		.await
		.map_err(error::Sqlx)?;

	let requested_tag = models::Tag::by_id(database, tag_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("tag"))?;

	Ok(Template {
		updated: true,
		self_user,
		requested_tag,
	})
}

pub fn configure() -> Router {
	Router::new().route("/", axum::routing::get(get_handler).post(post_handler))
}
