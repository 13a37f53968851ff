use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Bid, Book, BookOrder, NewBook};

/// Storage contract for the library. Handlers only see this trait, so the
/// engine behind it can change without touching them.
#[async_trait]
pub trait BookRepository: Send + Sync {
	/// Create the table if it does not exist yet. Safe to call on every start.
	async fn initialize(&self) -> Result<()>;

	async fn list(&self, order: BookOrder) -> Result<Vec<Book>>;

	async fn get(&self, id: Bid) -> Result<Option<Book>>;

	/// Returns the id assigned to the new row.
	async fn insert(&self, book: &NewBook) -> Result<Bid>;

	/// Overwrite all five fields. `false` when no row has this id.
	async fn update(&self, id: Bid, book: &NewBook) -> Result<bool>;

	/// `false` when no row has this id.
	async fn delete(&self, id: Bid) -> Result<bool>;
}
