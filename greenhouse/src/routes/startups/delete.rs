use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse, Redirect, Response};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::auth;

pub async fn post_handler(
	auth::Auth(self_user): auth::Auth,
	extract::Path((startup_id,)): extract::Path<(models::StartupId,)>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<Response, ErrorResponse> {
	let database = &*database;

	let startup = models::Startup::by_id(database, startup_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("startup"))?;
	if !super::id::may_edit(&self_user, &startup) {
		return Err(error::Forbidden.into());
	}

	if !models::Startup::delete(database, startup_id)
		.await
		.map_err(error::Sqlx)?
	{
		return Err(error::EntityNotFound("startup").into());
	}

	Ok(Redirect::to("/").into_response())
}

pub fn configure() -> Router {
	Router::new().route("/delete", axum::routing::post(post_handler))
}
