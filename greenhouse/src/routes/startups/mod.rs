use axum::Router;

mod delete;
mod id;
mod new;

pub fn configure() -> Router {
	Router::new()
		.nest("/new", new::configure())
		.nest("/:startup_id", id::configure().merge(delete::configure()))
}
