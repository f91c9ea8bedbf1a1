use std::borrow::Cow;

use axum::response::{IntoResponse, Response};

mod template;
pub use template::default_handler;
pub use template::error_response;

#[derive(Debug, thiserror::Error)]
#[error("SQL error: {0}")]
pub struct Sqlx(#[source] pub sqlx::Error);

#[derive(Debug, thiserror::Error)]
#[error("{0} not found")]
pub struct EntityNotFound(pub &'static str);

#[derive(Debug, thiserror::Error)]
#[error("password hash error")]
pub struct PasswordHash;

#[derive(Debug, thiserror::Error)]
#[error("error while encrypting: {0}")]
pub struct Encrypt(#[source] pub crate::token::crypt::EncryptError);

#[derive(Debug, thiserror::Error)]
#[error("IO error while {0}: {1}")]
pub struct Io(pub &'static str, #[source] pub std::io::Error);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BadRequest(pub Cow<'static, str>);

#[derive(Debug, thiserror::Error)]
#[error("you do not have permission to do that")]
pub struct Forbidden;

macro_rules! impl_response {
	($struct_name:ident, $status:ident) => {
		impl axum::response::IntoResponse for $struct_name {
			fn into_response(self) -> axum::response::Response {
				crate::error::error_response(&self, http::StatusCode::$status)
			}
		}
	};
}
pub(crate) use impl_response;

impl_response!(Sqlx, INTERNAL_SERVER_ERROR);
impl_response!(EntityNotFound, NOT_FOUND);
impl_response!(PasswordHash, INTERNAL_SERVER_ERROR);
impl_response!(Encrypt, INTERNAL_SERVER_ERROR);
impl_response!(BadRequest, BAD_REQUEST);
impl_response!(Forbidden, FORBIDDEN);

impl IntoResponse for Io {
	fn into_response(self) -> Response {
		use std::io::ErrorKind;

		use http::StatusCode;

		let status_code = match self.1.kind() {
			ErrorKind::NotFound => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};
		crate::error::error_response(&self, status_code)
	}
}
