use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse, Redirect, Response};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::{auth, set_none_if_empty};

#[derive(askama::Template)]
#[template(path = "startups/new.html")]
struct Template {
	self_user: models::User,
	error: Option<String>,
}
crate::helpers::impl_into_response!(Template);

pub async fn get_handler(auth::Founder(self_user): auth::Founder) -> impl IntoResponse {
	Template {
		self_user,
		error: None,
	}
}

#[derive(Debug, serde::Deserialize)]
pub struct PostRequest {
	name: String,
	tagline: String,
	pitch: Option<String>,
	image_url: Option<String>,
	tags: Option<String>,
}

pub async fn post_handler(
	auth::Founder(self_user): auth::Founder,
	extract::Form(mut request): extract::Form<PostRequest>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<Response, ErrorResponse> {
	macro_rules! err {
		($($tok:tt)+) => {
			Ok(
				Template {
					self_user,
					error: Some(format!($($tok)+)),
				}
				.into_response(),
			)
		};
	}

	let database = &*database;

	set_none_if_empty(&mut request.pitch);
	set_none_if_empty(&mut request.image_url);
	set_none_if_empty(&mut request.tags);

	if request.name.trim().is_empty() {
		return err!("A startup needs a name");
	}
	if request.tagline.trim().is_empty() {
		return err!("A startup needs a tagline");
	}

	let startup = models::startup::Create {
		name: request.name,
		tagline: request.tagline,
		pitch: request.pitch,
		image_url: request.image_url,
		founder: self_user.id,
	}
	.insert(database)
	.await
	.map_err(error::Sqlx)?;

	let tags = models::tag::parse_names(request.tags.as_deref().unwrap_or(""));
	if !tags.is_empty() {
		models::Tag::set_for_startup(database, startup.id, &tags, Some(self_user.id))
			.await
			.map_err(error::Sqlx)?;
	}

	Ok(Redirect::to(&format!("/startups/{}?created", startup.id)).into_response())
}

pub fn configure() -> Router {
	Router::new().route("/", axum::routing::get(get_handler).post(post_handler))
}
