use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
	Form,
	Router,
	extract::{rejection::FormRejection, Path, State},
	http::{header, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use maud::Markup;
use tower_cookies::{CookieManagerLayer, Cookies, Key};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::flash;
use crate::repo::BookRepository;
use crate::types::{Bid, BookForm, BookOrder};
use crate::views::{self, READING_GOAL};

#[derive(Clone)]
pub struct AppState {
	pub books: Arc<dyn BookRepository>,
	pub key: Key,
}

impl AppState {
	pub fn new(books: Arc<dyn BookRepository>, key: Key) -> Self {
		AppState { books, key }
	}
}

pub fn router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
	Router::new()
		.route("/", get(dashboard))
		.route("/add", get(add_form).post(add_book))
		.route("/delete", get(delete_selection))
		.route("/delete/:id", post(delete_book))
		.route("/update", get(update_selection))
		.route("/update/:id", get(update_form).post(update_book))
		.nest_service("/static", ServeDir::new(static_dir.as_ref()))
		.layer(CookieManagerLayer::new())
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

// 302, so a refresh after the redirect does not resubmit the form
fn back_to_dashboard() -> Response {
	(StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

fn today() -> String {
	chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

async fn dashboard(State(stt): State<AppState>, cookies: Cookies) -> Result<Markup> {
	let books = stt.books.list(BookOrder::Recent).await?;
	let highest_rated = stt.books.list(BookOrder::TopRated).await?;
	let total_books = books.len();

	let flashes = flash::take(&cookies, &stt.key);
	Ok(views::dashboard(&flashes, &books, &highest_rated, total_books, READING_GOAL))
}

async fn add_form(State(stt): State<AppState>, cookies: Cookies) -> Markup {
	let flashes = flash::take(&cookies, &stt.key);
	views::add_book(&flashes, &today())
}

async fn add_book(
	State(stt): State<AppState>,
	cookies: Cookies,
	form: std::result::Result<Form<BookForm>, FormRejection>,
) -> Result<Response> {
	let Form(form) = form?;
	let book = form.parse()?;
	let id = stt.books.insert(&book).await?;
	tracing::info!(id, title = %book.title, "book added");

	flash::push(&cookies, &stt.key, "Book added");
	Ok(back_to_dashboard())
}

async fn delete_selection(State(stt): State<AppState>, cookies: Cookies) -> Result<Markup> {
	let books = stt.books.list(BookOrder::Title).await?;
	let flashes = flash::take(&cookies, &stt.key);
	Ok(views::delete_selection(&flashes, &books))
}

async fn delete_book(
	State(stt): State<AppState>,
	cookies: Cookies,
	Path(id): Path<Bid>,
) -> Result<Response> {
	if stt.books.delete(id).await? {
		tracing::info!(id, "book deleted");
	} else {
		tracing::warn!(id, "delete matched no book");
	}

	flash::push(&cookies, &stt.key, "Book deleted");
	Ok(back_to_dashboard())
}

async fn update_selection(State(stt): State<AppState>, cookies: Cookies) -> Result<Markup> {
	let books = stt.books.list(BookOrder::Title).await?;
	let flashes = flash::take(&cookies, &stt.key);
	Ok(views::update_selection(&flashes, &books))
}

async fn update_form(
	State(stt): State<AppState>,
	cookies: Cookies,
	Path(id): Path<Bid>,
) -> Result<Markup> {
	let book = stt.books.get(id).await?.ok_or(Error::NotFound(id))?;
	let flashes = flash::take(&cookies, &stt.key);
	Ok(views::update_book(&flashes, &book))
}

async fn update_book(
	State(stt): State<AppState>,
	cookies: Cookies,
	Path(id): Path<Bid>,
	form: std::result::Result<Form<BookForm>, FormRejection>,
) -> Result<Response> {
	let Form(form) = form?;
	let book = form.parse()?;
	if stt.books.update(id, &book).await? {
		tracing::info!(id, title = %book.title, "book updated");
	} else {
		tracing::warn!(id, "update matched no book");
	}

	flash::push(&cookies, &stt.key, "Library updated");
	Ok(back_to_dashboard())
}
