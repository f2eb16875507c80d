//! Defines the category store trait.

use crate::{
    models::{Category, DatabaseID, NewCategory},
    Error,
};

/// Handles the persistence of categories.
///
/// Categories are global: they are shared between all users.
pub trait CategoryStore {
    /// Persist a new category and return the stored row.
    ///
    /// # Errors
    /// Returns an [Error::DuplicateName] if the name is already taken.
    fn create(&mut self, new_category: NewCategory) -> Result<Category, Error>;

    /// Retrieve the category with `id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to an existing
    /// category.
    fn get(&self, id: DatabaseID) -> Result<Category, Error>;

    /// Retrieve all categories in the order they were stored.
    fn get_all(&self) -> Result<Vec<Category>, Error>;

    /// Replace the category with `id` with the data in `category`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to an existing
    /// category.
    fn update(&mut self, id: DatabaseID, category: NewCategory) -> Result<Category, Error>;

    /// Delete the category with `id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to an existing
    /// category.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
