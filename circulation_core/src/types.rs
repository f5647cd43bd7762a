//! Core domain types for the circulation desk.
//!
//! This module defines the things the desk moves around:
//! - Catalog items (physical copies of a book)
//! - Members (patrons holding a library card)

use serde::Serialize;
use std::fmt;

/// A calendar day on the desk's internal clock
pub type Day = u32;

// ============================================================================
// Catalog Items
// ============================================================================

/// One physical copy of a book
///
/// Copies sharing a title and author are the same logical book: they compare
/// equal and render identically, so any one of them can satisfy a request.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogItem {
    title: String,
    author: String,
    due_date: Option<Day>,
}

impl CatalogItem {
    /// Create a copy that is on the shelf
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            due_date: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// The day this copy is due back, or `None` while it is on the shelf
    pub fn due_date(&self) -> Option<Day> {
        self.due_date
    }

    /// Mark the copy as lent out until `due`
    ///
    /// The desk only calls this on copies it has just taken off the shelf.
    pub fn check_out(&mut self, due: Day) {
        self.due_date = Some(due);
    }

    pub fn check_in(&mut self) {
        self.due_date = None;
    }

    /// Whether the copy was due before `today`
    pub fn is_overdue(&self, today: Day) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }
}

impl PartialEq for CatalogItem {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.author == other.author
    }
}

impl Eq for CatalogItem {}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, by {}", self.title, self.author)
    }
}

// ============================================================================
// Members
// ============================================================================

/// A patron holding a library card, and the copies they currently hold
#[derive(Clone, Debug)]
pub struct Member {
    name: String,
    held: Vec<CatalogItem>,
}

impl Member {
    /// A new card holder with nothing checked out
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            held: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copies held, in the order they were taken
    pub fn held(&self) -> &[CatalogItem] {
        &self.held
    }

    pub fn take(&mut self, item: CatalogItem) {
        self.held.push(item);
    }

    /// Hand back the first held copy equal to `item`
    ///
    /// Returns `None` when no such copy is held; the desk never asks for one
    /// it has not just looked up.
    pub fn give_back(&mut self, item: &CatalogItem) -> Option<CatalogItem> {
        let position = self.held.iter().position(|held| held == item)?;
        Some(self.held.remove(position))
    }

    /// Held copies that were due before `today`
    pub fn overdue(&self, today: Day) -> impl Iterator<Item = &CatalogItem> {
        self.held.iter().filter(move |item| item.is_overdue(today))
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
