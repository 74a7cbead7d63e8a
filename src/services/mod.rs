//! Business logic services

pub mod books;
pub mod validator;

use crate::repository::Repository;

/// Container for all services, built once at start-up
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub validator: validator::BookValidator,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BookService::new(repository),
            validator: validator::BookValidator::new(),
        }
    }
}
