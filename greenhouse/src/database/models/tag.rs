use smallvec::SmallVec;

use super::{startup, user};
use crate::database::Database;
use crate::timestamp::Timestamp;

pub type Id = super::Id;

#[derive(sqlx::FromRow)]
pub struct Tag {
	pub id: Id,
	pub name: String,
	pub description: Option<String>,
	pub created_by: Option<user::Id>,
	pub created_time: Timestamp,
}

impl Tag {
	pub async fn by_id(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		id: Id,
	) -> sqlx::Result<Option<Self>> {
		sqlx::query_as(
			"SELECT id, name, description, created_by, created_time FROM tags WHERE id = $1",
		)
		.bind(id)
		.fetch_optional(database)
		.await
	}

	pub async fn for_startup(
		database: impl sqlx::Executor<'_, Database = sqlx::Postgres>,
		startup: startup::Id,
	) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as(
			"SELECT tags.id, tags.name, tags.description, tags.created_by, tags.created_time FROM tags JOIN startup_tags ON startup_tags.tag = tags.id WHERE startup_tags.startup = $1 ORDER BY tags.name",
		)
		.bind(startup)
		.fetch_all(database)
		.await
	}

	/// Replaces the tag set of a startup, creating tags that don't exist yet.
	pub async fn set_for_startup(
		database: &Database,
		startup: startup::Id,
		names: &[String],
		created_by: Option<user::Id>,
	) -> sqlx::Result<()> {
		let mut transaction = database.begin().await?;
		sqlx::query("DELETE FROM startup_tags WHERE startup = $1")
			.bind(startup)
			.execute(&mut transaction)
			.await?;
		for name in names {
			// the no-op DO UPDATE makes RETURNING yield a row for existing tags too
			let tag: Id = sqlx::query_scalar(
				"INSERT INTO tags (name, created_by) VALUES ($1, $2) ON CONFLICT (name) DO UPDATE SET name = excluded.name RETURNING id",
			)
			.bind(name)
			.bind(created_by)
			.fetch_one(&mut transaction)
			.await?;
			sqlx::query("INSERT INTO startup_tags (startup, tag) VALUES ($1, $2)")
				.bind(startup)
				.bind(tag)
				.execute(&mut transaction)
				.await?;
		}
		transaction.commit().await
	}
}

/// Normalizes a comma-separated tag list from a form field: trimmed,
/// lowercased, empties and repeats removed, order kept otherwise.
pub fn parse_names(raw: &str) -> SmallVec<[String; 8]> {
	let mut names = SmallVec::new();
	for name in raw.split(',') {
		let name = name.trim().to_lowercase();
		if name.is_empty() || names.contains(&name) {
			continue;
		}
		names.push(name);
	}
	names
}

#[cfg(test)]
mod test {
	use super::parse_names;

	#[test]
	fn parse() {
		assert_eq!(
			parse_names(" AI, fintech,ai , machine learning,, ").as_slice(),
			["ai", "fintech", "machine learning"]
		);
		assert!(parse_names("").is_empty());
		assert!(parse_names(" , ,").is_empty());
	}
}
