use std::sync::Arc;

use axum::response::{ErrorResponse, IntoResponse};
use axum::{extract, Router};

use crate::database::{models, Database};
use crate::error;
use crate::helpers::{auth, percent, set_none_if_empty};

#[derive(Clone, Copy)]
enum Action {
	Created,
	Updated,
}

impl Action {
	fn as_message(self) -> &'static str {
		match self {
			Self::Created => "Your startup is now listed",
			Self::Updated => "Updated the listing",
		}
	}
}

struct FounderRef {
	id: models::UserId,
	username: String,
}

struct TagChip {
	name: String,
	href: String,
}

struct StartupView {
	id: models::StartupId,
	name: String,
	tagline: String,
	pitch: Option<String>,
	image_url: Option<String>,
	views: i64,
	created: String,
	founder: Option<FounderRef>,
	tags: Vec<TagChip>,
	tags_joined: String,
	can_edit: bool,
}

#[derive(askama::Template)]
#[template(path = "startups/page.html")]
struct Template {
	self_user: Option<models::User>,
	startup: StartupView,
	notice: Option<&'static str>,
}
crate::helpers::impl_into_response!(Template);

pub(super) fn may_edit(user: &models::User, startup: &models::Startup) -> bool {
	user.role >= models::UserRole::Admin || startup.founder == Some(user.id)
}

async fn build_view(
	database: &Database,
	startup: models::Startup,
	self_user: Option<&models::User>,
) -> sqlx::Result<StartupView> {
	let founder = match startup.founder {
		Some(id) => sqlx::query_scalar("SELECT username FROM users WHERE id = $1")
			.bind(id)
			.fetch_optional(database)
			.await?
			.map(|username| FounderRef { id, username }),
		None => None,
	};
	let tags = models::Tag::for_startup(database, startup.id).await?;
	let tags_joined = tags
		.iter()
		.map(|tag| tag.name.as_str())
		.collect::<Vec<_>>()
		.join(", ");
	let can_edit = self_user.map_or(false, |user| may_edit(user, &startup));

	Ok(StartupView {
		id: startup.id,
		name: startup.name,
		tagline: startup.tagline,
		pitch: startup.pitch,
		image_url: startup.image_url,
		views: startup.views,
		created: crate::timestamp::display_date(&startup.created_time).to_string(),
		founder,
		tags: tags
			.into_iter()
			.map(|tag| TagChip {
				href: format!("/?tag={}", percent::encode(tag.name.as_bytes())),
				name: tag.name,
			})
			.collect(),
		tags_joined,
		can_edit,
	})
}

#[derive(serde::Deserialize)]
pub struct Query {
	pub created: Option<String>,
}

pub async fn get_handler(
	auth::Maybe(self_user): auth::Maybe,
	extract::Path((startup_id,)): extract::Path<(models::StartupId,)>,
	extract::Query(Query { created }): extract::Query<Query>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let database = &*database;

	let startup = models::Startup::visit(database, startup_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("startup"))?;
	let startup = build_view(database, startup, self_user.as_ref())
		.await
		.map_err(error::Sqlx)?;

	Ok(Template {
		self_user,
		startup,
		notice: created.map(|_| Action::Created.as_message()),
	})
}

#[derive(Debug, serde::Deserialize)]
pub struct EditRequest {
	name: String,
	tagline: String,
	pitch: Option<String>,
	image_url: Option<String>,
	tags: Option<String>,
}

pub async fn post_handler(
	auth::Auth(self_user): auth::Auth,
	extract::Path((startup_id,)): extract::Path<(models::StartupId,)>,
	extract::Form(mut request): extract::Form<EditRequest>,
	extract::Extension(database): extract::Extension<Arc<Database>>,
) -> Result<impl IntoResponse, ErrorResponse> {
	let database = &*database;

	let startup = models::Startup::by_id(database, startup_id)
		.await
		.map_err(error::Sqlx)?
		.ok_or(error::EntityNotFound("startup"))?;
	if !may_edit(&self_user, &startup) {
		return Err(error::Forbidden.into());
	}

	set_none_if_empty(&mut request.pitch);
	set_none_if_empty(&mut request.image_url);
	set_none_if_empty(&mut request.tags);
	if request.name.trim().is_empty() || request.tagline.trim().is_empty() {
		return Err(error::BadRequest("the name and tagline cannot be empty".into()).into());
	}

	let startup: models::Startup = sqlx::query_as(
		"UPDATE startups SET name = $2, tagline = $3, pitch = $4, image_url = $5 WHERE id = $1 RETURNING id, name, tagline, pitch, image_url, founder, views, created_time",
	)
	.bind(startup_id)
	.bind(&request.name)
	.bind(&request.tagline)
	.bind(&request.pitch)
	.bind(&request.image_url)
	.fetch_optional(database)
	.await
	.map_err(error::Sqlx)?
	.ok_or(error::EntityNotFound("startup"))?;

	models::Tag::set_for_startup(
		database,
		startup.id,
		&models::tag::parse_names(request.tags.as_deref().unwrap_or("")),
		Some(self_user.id),
	)
	.await
	.map_err(error::Sqlx)?;

	let startup = build_view(database, startup, Some(&self_user))
		.await
		.map_err(error::Sqlx)?;

	Ok(Template {
		self_user: Some(self_user),
		startup,
		notice: Some(Action::Updated.as_message()),
	})
}

pub fn configure() -> Router {
	Router::new().route("/", axum::routing::get(get_handler).post(post_handler))
}
