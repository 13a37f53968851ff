use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::Bid;
use crate::views;

#[derive(Error, Debug)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("configuration error: {0}")]
	Config(String),

	#[error("{}", .0.body_text())]
	Form(#[from] FormRejection),

	#[error("{field} must be a whole number, got {value:?}")]
	InvalidNumber { field: &'static str, value: String },

	#[error("no book with id {0}")]
	NotFound(Bid),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Error::Form(rejection) => rejection.status(),
			Error::InvalidNumber { .. } => StatusCode::BAD_REQUEST,
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// What the visitor gets to read. Server-side failures stay in the log.
	pub fn user_message(&self) -> String {
		match self {
			Error::Form(_) | Error::InvalidNumber { .. } | Error::NotFound(_) => self.to_string(),
			_ => "Something went wrong on our side.".to_string(),
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, "request rejected");
		}
		(status, views::error_page(status, &self.user_message())).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn maps_errors_to_status() {
		let bad = Error::InvalidNumber { field: "pages", value: "x".into() };
		assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
		assert_eq!(Error::NotFound(3).status(), StatusCode::NOT_FOUND);
		assert_eq!(
			Error::Config("nope".into()).status(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}

	#[test]
	fn hides_server_details() {
		let err = Error::Database(sqlx::Error::RowNotFound);
		assert!(!err.user_message().contains("database"));
		assert!(Error::NotFound(7).user_message().contains('7'));
	}

	#[tokio::test]
	async fn renders_error_page() {
		let resp = Error::NotFound(42).into_response();
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
		let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
		let body = String::from_utf8(body.to_vec()).unwrap();
		assert!(body.contains("no book with id 42"));
	}
}
