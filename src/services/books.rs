//! Book catalog service

use crate::{error::AppResult, models::Book, repository::Repository};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Store connectivity check for the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await?;
        Ok(())
    }

    pub async fn exists(&self, isbn: &str) -> AppResult<bool> {
        self.repository.books_exists(isbn).await
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        self.repository.books_get_by_isbn(isbn).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    /// Books whose title contains `term`, ignoring case.
    ///
    /// Folding is done here rather than with SQL `LIKE`, which only folds ASCII.
    pub async fn search_by_title(&self, term: &str) -> AppResult<Vec<Book>> {
        let needle = term.to_lowercase();
        let books = self.repository.books_list().await?;
        let matches: Vec<Book> = books
            .into_iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .collect();
        tracing::debug!("Title search '{}' matched {} book(s)", term, matches.len());
        Ok(matches)
    }

    /// Insert `book`; `false` if its ISBN is already stored
    pub async fn create(&self, book: &Book) -> AppResult<bool> {
        let created = self.repository.books_create(book).await?;
        if created {
            tracing::info!("Created book isbn={}", book.isbn);
        } else {
            tracing::debug!("Create rejected, isbn={} already exists", book.isbn);
        }
        Ok(created)
    }

    /// Overwrite every non-key field; `false` if the ISBN is unknown
    pub async fn update(&self, book: &Book) -> AppResult<bool> {
        let updated = self.repository.books_update(book).await?;
        if updated {
            tracing::info!("Updated book isbn={}", book.isbn);
        } else {
            tracing::debug!("Update rejected, isbn={} not found", book.isbn);
        }
        Ok(updated)
    }

    /// Remove the book; `false` if the ISBN is unknown
    pub async fn delete(&self, isbn: &str) -> AppResult<bool> {
        let deleted = self.repository.books_delete(isbn).await?;
        if deleted {
            tracing::info!("Deleted book isbn={}", isbn);
        } else {
            tracing::debug!("Delete rejected, isbn={} not found", isbn);
        }
        Ok(deleted)
    }
}
