use axum::Router;

mod users;

pub fn configure() -> Router {
	let mut app = Router::new();
	super::sub!(app; users);
	app
}
