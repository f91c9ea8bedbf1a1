use super::{UserPassword, UserRole};
use crate::timestamp::Timestamp;

pub type Id = super::Id;

#[derive(sqlx::FromRow)]
pub struct User {
	pub id: Id,
	pub username: String,
	pub password: UserPassword,
	pub email: Option<String>,
	pub bio: Option<String>,
	pub role: UserRole,
	pub created_time: Timestamp,
	pub last_login: Option<Timestamp>,
}

impl User {
	pub async fn by_id(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		id: Id,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as(
			"SELECT id, username, password, email, bio, role, created_time, last_login FROM users WHERE id = $1",
		)
		.bind(id)
		.fetch_optional(database)
		.await
	}

	pub async fn by_username(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		username: &str,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as(
			"SELECT id, username, password, email, bio, role, created_time, last_login FROM users WHERE username = $1",
		)
		.bind(username)
		.fetch_optional(database)
		.await
	}

	pub async fn count(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
	) -> sqlx::Result<i64> {
		sqlx::query_scalar("SELECT count(*) FROM users")
			.fetch_one(database)
			.await
	}

	/// A page of users ordered by id, for the admin table.
	pub async fn page(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		offset: i64,
		limit: i64,
	) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as(
			"SELECT id, username, password, email, bio, role, created_time, last_login FROM users ORDER BY id OFFSET $1 LIMIT $2",
		)
		.bind(offset)
		.bind(limit)
		.fetch_all(database)
		.await
	}

	pub async fn set_username(
		&mut self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		username: String,
	) -> sqlx::Result<()> {
		sqlx::query("UPDATE users SET username = $2 WHERE id = $1")
			.bind(self.id)
			.bind(&username)
			.execute(database)
			.await?;
		self.username = username;
		Ok(())
	}

	pub async fn set_password(
		&mut self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		password: UserPassword,
	) -> sqlx::Result<()> {
		sqlx::query("UPDATE users SET password = $2 WHERE id = $1")
			.bind(self.id)
			.bind(&password)
			.execute(database)
			.await?;
		self.password = password;
		Ok(())
	}

	pub async fn set_email(
		&mut self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		email: Option<String>,
	) -> sqlx::Result<()> {
		sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
			.bind(self.id)
			.bind(&email)
			.execute(database)
			.await?;
		self.email = email;
		Ok(())
	}

	pub async fn set_bio(
		&mut self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		bio: Option<String>,
	) -> sqlx::Result<()> {
		sqlx::query("UPDATE users SET bio = $2 WHERE id = $1")
			.bind(self.id)
			.bind(&bio)
			.execute(database)
			.await?;
		self.bio = bio;
		Ok(())
	}

	pub async fn set_role(
		&mut self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		role: UserRole,
	) -> sqlx::Result<()> {
		sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
			.bind(self.id)
			.bind(role)
			.execute(database)
			.await?;
		self.role = role;
		Ok(())
	}

	pub async fn set_last_login(
		&mut self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		last_login: Option<Timestamp>,
	) -> sqlx::Result<()> {
		sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
			.bind(self.id)
			.bind(last_login)
			.execute(database)
			.await?;
		self.last_login = last_login;
		Ok(())
	}
}

/// The insertable subset of a user row; everything else is defaulted by the schema.
pub struct Create {
	pub username: String,
	pub password: UserPassword,
	pub email: Option<String>,
}

impl Create {
	pub async fn insert(
		self,
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
	) -> sqlx::Result<User> {
		sqlx::query_as(
			"INSERT INTO users (username, password, email) VALUES ($1, $2, $3) RETURNING id, username, password, email, bio, role, created_time, last_login",
		)
		.bind(&self.username)
		.bind(&self.password)
		.bind(&self.email)
		.fetch_one(database)
		.await
	}
}
