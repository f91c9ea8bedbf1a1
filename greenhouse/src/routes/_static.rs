use axum::response::IntoResponse;
use axum::routing::get_service;
use axum::Router;
use tower_http::services::ServeDir;

use crate::error;

async fn handle_error(err: std::io::Error) -> impl IntoResponse {
	error::Io("serving a static asset", err)
}

pub fn configure() -> Router {
	Router::new().nest(
		"/static",
		get_service(ServeDir::new("static")).handle_error(handle_error),
	)
}
