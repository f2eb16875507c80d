use serde::{Deserialize, Serialize};

use crate::{models::DatabaseID, Error};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: String) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyName)
        } else {
            Ok(Self(name))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the non-empty invariant is violated it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A classification label applied to transactions and budgets, e.g.,
/// 'Groceries', 'Eating Out', 'Wages'.
///
/// Category names are unique across the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: DatabaseID,
    name: CategoryName,
    description: String,
}

impl Category {
    /// Create a new category.
    ///
    /// Note that this does *not* add the category to the application database.
    pub fn new(id: DatabaseID, name: CategoryName, description: String) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// The ID of the category.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The name of the category.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// The free-text description of the category.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Data for creating a new category.
#[derive(Debug)]
pub struct NewCategory {
    /// The name of the category. Must be unique.
    pub name: CategoryName,
    /// An optional free-text description.
    pub description: String,
}
