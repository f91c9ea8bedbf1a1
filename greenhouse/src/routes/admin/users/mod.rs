use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::auth::Admin;
use crate::helpers::pagination;

mod edit;

struct UserRow {
	id: models::UserId,
	username: String,
	email: Option<String>,
	role: models::UserRole,
	created: String,
	last_login: Option<String>,
}

impl From<models::User> for UserRow {
	fn from(user: models::User) -> Self {
		Self {
			id: user.id,
			username: user.username,
			email: user.email,
			role: user.role,
			created: crate::timestamp::display_date(&user.created_time).to_string(),
			last_login: user
				.last_login
				.map(|last_login| crate::timestamp::display_date(&last_login).to_string()),
		}
	}
}

#[derive(askama::Template)]
#[template(path = "admin/users/index.html")]
struct Template {
	self_user: models::User,
	users: Vec<UserRow>,
	pagination: Option<pagination::Template>,
}
crate::helpers::impl_into_response!(Template);

pub async fn get_handler(
	Admin(self_user): Admin,
	extract::Query(pagination): extract::Query<pagination::Query>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let database = &*database;

	let num_users = models::User::count(database).await.map_err(error::Sqlx)?;
	let num_pages = pagination::num_pages(num_users, pagination.page_size());
	if pagination.page() > std::cmp::max(num_pages, 1) {
		return Err(error::EntityNotFound("page").into());
	}

	let users = models::User::page(database, pagination.offset(), pagination.limit())
		.await
		.map_err(error::Sqlx)?;

	let base_url = match pagination.page_size {
		Some(page_size) => format!("/admin/users?page_size={page_size}"),
		None => "/admin/users".to_owned(),
	};

	Ok(Template {
		self_user,
		users: users.into_iter().map(UserRow::from).collect(),
		pagination: pagination::Template::from_query(pagination, num_pages, &base_url),
	})
}

pub fn configure() -> Router {
	Router::new()
		.route("/", axum::routing::get(get_handler))
		.nest("/:user_id", edit::configure())
}
