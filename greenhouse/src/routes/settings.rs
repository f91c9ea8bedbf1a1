use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::{auth, set_none_if_empty};

#[derive(askama::Template)]
#[template(path = "settings.html")]
struct Template {
	updated: bool,
	self_user: models::User,
}
crate::helpers::impl_into_response!(Template);

pub async fn get_handler(auth::Auth(self_user): auth::Auth) -> impl IntoResponse {
	Template {
		updated: false,
		self_user,
	}
}

#[derive(Debug, serde::Deserialize)]
pub struct PostRequest {
	email: Option<String>,
	bio: Option<String>,
	password: Option<String>,
}

pub async fn post_handler(
	auth::Auth(mut self_user): auth::Auth,
	extract::Form(mut request): extract::Form<PostRequest>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let database = &*database;

	set_none_if_empty(&mut request.email);
	set_none_if_empty(&mut request.bio);
	set_none_if_empty(&mut request.password);

	self_user
		.set_email(database, request.email)
		.await
		.map_err(error::Sqlx)?;
	self_user
		.set_bio(database, request.bio)
		.await
		.map_err(error::Sqlx)?;
	if let Some(password) = request.password {
		self_user
			.set_password(
				database,
				models::UserPassword::hash(&password).map_err(|_| error::PasswordHash)?,
			)
			.await
			.map_err(error::Sqlx)?;
	}

	Ok(Template {
		updated: true,
		self_user,
	})
}

pub fn configure() -> Router {
	Router::new().route("/", axum::routing::get(get_handler).post(post_handler))
}
