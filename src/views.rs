use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

use crate::types::{Book, BookForm};

pub const READING_GOAL: usize = 24;

fn page(title: &str, flashes: &[String], content: Markup) -> Markup {
	html! {
		(DOCTYPE)
		html lang="en" {
			head {
				meta charset="utf-8";
				meta name="viewport" content="width=device-width, initial-scale=1";
				title { (title) }
				link rel="stylesheet" href="/static/style.css";
			}
			body {
				nav {
					a href="/" { "Dashboard" }
					a href="/add" { "Add Book" }
					a href="/update" { "Update Book" }
					a href="/delete" { "Delete Book" }
				}
				@if !flashes.is_empty() {
					ul class="flashes" {
						@for message in flashes {
							li { (message) }
						}
					}
				}
				main { (content) }
			}
		}
	}
}

fn book_table(books: &[Book]) -> Markup {
	html! {
		table {
			thead { tr {
				th { "Title" }
				th { "Author" }
				th { "Pages" }
				th { "Rating" }
				th { "Date Completed" }
			} }
			tbody {
				@for book in books {
					tr {
						td { (book.title) }
						td { (book.author) }
						td { (book.pages) }
						td { (book.rating) }
						td { (book.date_completed) }
					}
				}
			}
		}
	}
}

/// Percentage of the reading goal reached, capped at 100.
pub fn goal_progress(total_books: usize, reading_goal: usize) -> usize {
	if reading_goal == 0 {
		return 100;
	}
	(total_books * 100 / reading_goal).min(100)
}

pub fn dashboard(
	flashes: &[String],
	books: &[Book],
	highest_rated: &[Book],
	total_books: usize,
	reading_goal: usize,
) -> Markup {
	let progress = goal_progress(total_books, reading_goal);
	page("My Digital Library", flashes, html! {
		h1 { "My Digital Library" }
		section class="stats" {
			p { "Books read: " span id="total-books" { (total_books) } }
			p { "Reading goal: " span id="reading-goal" { (reading_goal) } }
			progress max="100" value=(progress) { (progress) "%" }
		}
		section {
			h2 { "All Books" }
			@if books.is_empty() {
				p { "No books yet. " a href="/add" { "Add your first one." } }
			} @else {
				(book_table(books))
			}
		}
		section {
			h2 { "Highest Rated" }
			(book_table(highest_rated))
		}
	})
}

fn book_fields(values: &BookForm) -> Markup {
	html! {
		label for="title" { "Title:" }
		input id="title" name="title" type="text" required value=(values.title);
		label for="author" { "Author:" }
		input id="author" name="author" type="text" required value=(values.author);
		label for="pages" { "Pages:" }
		input id="pages" name="pages" type="number" required value=(values.pages);
		label for="rating" { "Rating:" }
		input id="rating" name="rating" type="number" required value=(values.rating);
		label for="date_completed" { "Date Completed:" }
		input id="date_completed" name="date_completed" type="date" required value=(values.date_completed);
	}
}

pub fn add_book(flashes: &[String], today: &str) -> Markup {
	let blank = BookForm {
		title: String::new(),
		author: String::new(),
		pages: String::new(),
		rating: String::new(),
		date_completed: today.to_string(),
	};
	page("Add New Book", flashes, html! {
		h1 { "Add New Book" }
		form method="POST" action="/add" {
			(book_fields(&blank))
			button type="submit" { "Add Book" }
		}
	})
}

pub fn delete_selection(flashes: &[String], books: &[Book]) -> Markup {
	page("Delete Book", flashes, html! {
		h1 { "Delete Book" }
		@if books.is_empty() {
			p { "Nothing to delete." }
		}
		ul class="picker" {
			@for book in books {
				li {
					span { (book.title) " by " (book.author) }
					form method="POST" action={ "/delete/" (book.id) } {
						button type="submit" { "Delete" }
					}
				}
			}
		}
	})
}

pub fn update_selection(flashes: &[String], books: &[Book]) -> Markup {
	page("Update Book", flashes, html! {
		h1 { "Update Book" }
		@if books.is_empty() {
			p { "Nothing to update." }
		}
		ul class="picker" {
			@for book in books {
				li {
					a href={ "/update/" (book.id) } { (book.title) }
					" by " (book.author)
				}
			}
		}
	})
}

pub fn update_book(flashes: &[String], book: &Book) -> Markup {
	page("Update Book", flashes, html! {
		h1 { "Update Book" }
		form method="POST" action={ "/update/" (book.id) } {
			(book_fields(&BookForm::from(book)))
			button type="submit" { "Save Changes" }
		}
	})
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
	let reason = status.canonical_reason().unwrap_or("Error");
	page(reason, &[], html! {
		h1 { (status.as_u16()) " " (reason) }
		p { (message) }
		a href="/" { "Back to the dashboard" }
	})
}
