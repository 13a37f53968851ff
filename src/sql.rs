use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::Result;
use crate::repo::BookRepository;
use crate::types::{Bid, Book, BookOrder, NewBook};

pub const TABLE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS books (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	title TEXT NOT NULL,
	author TEXT NOT NULL,
	pages INTEGER NOT NULL,
	rating INTEGER NOT NULL,
	date_completed TEXT NOT NULL
);
"#;

const SELECT_RECENT: &str = r#"
SELECT id, title, author, pages, rating, date_completed
FROM books
ORDER BY id DESC
"#;

const SELECT_TOP_RATED: &str = r#"
SELECT id, title, author, pages, rating, date_completed
FROM books
ORDER BY rating DESC
LIMIT ?
"#;

const SELECT_BY_TITLE: &str = r#"
SELECT id, title, author, pages, rating, date_completed
FROM books
ORDER BY title
"#;

/// `BookRepository` backed by a SQLite file.
#[derive(Clone, Debug)]
pub struct SqliteBooks {
	pool: SqlitePool,
}

impl SqliteBooks {
	/// Open (creating it if missing) the database at `url`, e.g. `sqlite://books.db`.
	pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
		let options = SqliteConnectOptions::from_str(url)?
			.create_if_missing(true);

		let pool = SqlitePoolOptions::new()
			.max_connections(max_connections)
			.acquire_timeout(Duration::from_secs(3))
			.connect_with(options).await?;

		Ok(SqliteBooks { pool })
	}
}

#[async_trait]
impl BookRepository for SqliteBooks {
	async fn initialize(&self) -> Result<()> {
		sqlx::query(TABLE_SCHEMA).execute(&self.pool).await?;
		Ok(())
	}

	async fn list(&self, order: BookOrder) -> Result<Vec<Book>> {
		let books = match order {
			BookOrder::Recent => {
				sqlx::query_as::<_, Book>(SELECT_RECENT)
					.fetch_all(&self.pool).await?
			},
			BookOrder::TopRated => {
				sqlx::query_as::<_, Book>(SELECT_TOP_RATED)
					.bind(BookOrder::TOP_RATED_LIMIT)
					.fetch_all(&self.pool).await?
			},
			BookOrder::Title => {
				sqlx::query_as::<_, Book>(SELECT_BY_TITLE)
					.fetch_all(&self.pool).await?
			},
		};
		Ok(books)
	}

	async fn get(&self, id: Bid) -> Result<Option<Book>> {
		let book = sqlx::query_as::<_, Book>(
			"SELECT id, title, author, pages, rating, date_completed FROM books WHERE id = ?"
		)
			.bind(id)
			.fetch_optional(&self.pool).await?;
		Ok(book)
	}

	async fn insert(&self, book: &NewBook) -> Result<Bid> {
		let done = sqlx::query(r#"
INSERT INTO books
	(title, author, pages, rating, date_completed)
VALUES
	(?, ?, ?, ?, ?)
		"#)
			.bind(&book.title)
			.bind(&book.author)
			.bind(book.pages)
			.bind(book.rating)
			.bind(&book.date_completed)
			.execute(&self.pool).await?;
		Ok(done.last_insert_rowid())
	}

	async fn update(&self, id: Bid, book: &NewBook) -> Result<bool> {
		let done = sqlx::query(r#"
UPDATE books SET
	title = ?, author = ?, pages = ?, rating = ?, date_completed = ?
WHERE
	id = ?
		"#)
			.bind(&book.title)
			.bind(&book.author)
			.bind(book.pages)
			.bind(book.rating)
			.bind(&book.date_completed)
			.bind(id)
			.execute(&self.pool).await?;
		Ok(done.rows_affected() > 0)
	}

	async fn delete(&self, id: Bid) -> Result<bool> {
		let done = sqlx::query("DELETE FROM books WHERE id = ?")
			.bind(id)
			.execute(&self.pool).await?;
		Ok(done.rows_affected() > 0)
	}
}
