use serde::Deserialize;
use sqlx::FromRow;

use crate::error::{Error, Result};

pub type Bid = i64;

/// A completed book, as stored in the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
	pub id: Bid,
	pub title: String,
	pub author: String,
	pub pages: i64,
	pub rating: i64,
	pub date_completed: String,
}

/// Every column of a book except its id; used for both insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
	pub title: String,
	pub author: String,
	pub pages: i64,
	pub rating: i64,
	pub date_completed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookOrder {
	/// newest first
	Recent,
	/// ten best rated
	TopRated,
	/// alphabetical
	Title,
}

impl BookOrder {
	pub const TOP_RATED_LIMIT: i64 = 10;
}

/// Raw add/update form. Numbers stay as text until `parse`, so a bad
/// value becomes an `Error::InvalidNumber` instead of an extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct BookForm {
	pub title: String,
	pub author: String,
	pub pages: String,
	pub rating: String,
	pub date_completed: String,
}

impl BookForm {
	pub fn parse(self) -> Result<NewBook> {
		let pages = parse_int("pages", &self.pages)?;
		let rating = parse_int("rating", &self.rating)?;
		Ok(NewBook {
			title: self.title,
			author: self.author,
			pages,
			rating,
			date_completed: self.date_completed,
		})
	}
}

/// Whole number with optional sign; single underscores may group digits ("1_000").
fn parse_int(field: &'static str, value: &str) -> Result<i64> {
	let invalid = || Error::InvalidNumber { field, value: value.to_owned() };

	let trimmed = value.trim();
	let digits = trimmed.trim_start_matches(['+', '-']);
	if trimmed.len() - digits.len() > 1
		|| digits.starts_with('_')
		|| digits.ends_with('_')
		|| digits.contains("__")
	{
		return Err(invalid());
	}
	trimmed.replace('_', "").parse::<i64>().map_err(|_| invalid())
}

impl From<&Book> for BookForm {
	fn from(book: &Book) -> Self {
		BookForm {
			title: book.title.clone(),
			author: book.author.clone(),
			pages: book.pages.to_string(),
			rating: book.rating.to_string(),
			date_completed: book.date_completed.clone(),
		}
	}
}
