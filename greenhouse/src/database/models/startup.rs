use super::user;
use crate::timestamp::Timestamp;

pub type Id = super::BigId;

#[derive(sqlx::FromRow)]
pub struct Startup {
	pub id: Id,
	pub name: String,
	pub tagline: String,
	pub pitch: Option<String>,
	pub image_url: Option<String>,
	pub founder: Option<user::Id>,
	pub views: i64,
	pub created_time: Timestamp,
}

impl Startup {
	pub async fn by_id(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		id: Id,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as(
			"SELECT id, name, tagline, pitch, image_url, founder, views, created_time FROM startups WHERE id = $1",
		)
		.bind(id)
		.fetch_optional(database)
		.await
	}

	/// Fetches a startup for display, counting the visit.
	pub async fn visit(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		id: Id,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as(
			"UPDATE startups SET views = views + 1 WHERE id = $1 RETURNING id, name, tagline, pitch, image_url, founder, views, created_time",
		)
		.bind(id)
		.fetch_optional(database)
		.await
	}

	pub async fn delete(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		id: Id,
	) -> sqlx::Result<bool> {
		sqlx::query("DELETE FROM startups WHERE id = $1")
			.bind(id)
			.execute(database)
			.await
			.map(|result| result.rows_affected() > 0)
	}
}

/// The insertable subset of a startup row.
pub struct Create {
	pub name: String,
	pub tagline: String,
	pub pitch: Option<String>,
	pub image_url: Option<String>,
	pub founder: user::Id,
}

impl Create {
	pub async fn insert(
		self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
	) -> sqlx::Result<Startup> {
		sqlx::query_as(
			"INSERT INTO startups (name, tagline, pitch, image_url, founder) VALUES ($1, $2, $3, $4, $5) RETURNING id, name, tagline, pitch, image_url, founder, views, created_time",
		)
		.bind(&self.name)
		.bind(&self.tagline)
		.bind(&self.pitch)
		.bind(&self.image_url)
		.bind(self.founder)
		.fetch_one(database)
		.await
	}
}
