//! Book domain methods on Repository
//!
//! Writes are single statements whose affected-row count tells the caller
//! whether the row existed, so no separate existence query is needed.

use super::Repository;
use crate::{error::AppResult, models::Book};

const BOOK_COLUMNS: &str = "isbn, title, author, short_description, page_count, release_date";

impl Repository {
    /// Whether a book with this ISBN is stored
    pub async fn books_exists(&self, isbn: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Books WHERE isbn = ?")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Get book by ISBN
    pub async fn books_get_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM Books WHERE isbn = ?",
            BOOK_COLUMNS
        ))
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// List every book in insertion order
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM Books ORDER BY rowid",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a book; `false` when the ISBN is already taken
    pub async fn books_create(&self, book: &Book) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO Books (isbn, title, author, short_description, page_count, release_date)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (isbn) DO NOTHING
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.short_description)
        .bind(book.page_count)
        .bind(book.release_date)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace every non-key field; `false` when no such ISBN is stored
    pub async fn books_update(&self, book: &Book) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE Books
            SET title = ?, author = ?, short_description = ?, page_count = ?, release_date = ?
            WHERE isbn = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.short_description)
        .bind(book.page_count)
        .bind(book.release_date)
        .bind(&book.isbn)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete book; `false` when no such ISBN is stored
    pub async fn books_delete(&self, isbn: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM Books WHERE isbn = ?")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
