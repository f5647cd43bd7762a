//! Loading the library's initial book collection.
//!
//! A collection file holds one `("Title", "Author")` pair per line, each line
//! becoming one physical copy on the shelf. A small built-in collection is
//! available for running the desk without a file.

use crate::types::CatalogItem;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::path::Path;

/// Cached sample collection - built once and cloned out on demand
static SAMPLE_COLLECTION: Lazy<Vec<CatalogItem>> = Lazy::new(build_sample_collection);

/// Get a copy of the built-in sample collection
pub fn sample_collection() -> Vec<CatalogItem> {
    SAMPLE_COLLECTION.clone()
}

fn build_sample_collection() -> Vec<CatalogItem> {
    [
        ("20,000 Leagues Under the Seas", "Jules Verne"),
        ("Around the World in Eighty Days", "Jules Verne"),
        ("Contact", "Carl Sagan"),
        ("Contact", "Carl Sagan"),
        ("Cosmos", "Carl Sagan"),
        ("The Left Hand of Darkness", "Ursula K. Le Guin"),
        ("A Wizard of Earthsea", "Ursula K. Le Guin"),
        ("Pride and Prejudice", "Jane Austen"),
        ("Emma", "Jane Austen"),
        ("The Time Machine", "H. G. Wells"),
        ("The War of the Worlds", "H. G. Wells"),
        ("Frankenstein", "Mary Shelley"),
    ]
    .into_iter()
    .map(|(title, author)| CatalogItem::new(title, author))
    .collect()
}

/// Read a collection file into shelf order
pub fn load_collection(path: &Path) -> Result<Vec<CatalogItem>> {
    let contents = std::fs::read_to_string(path)?;
    let items = parse_collection(&contents)?;
    tracing::info!("Loaded {} books from {:?}", items.len(), path);
    Ok(items)
}

/// Parse collection text, one copy per non-blank line
pub fn parse_collection(contents: &str) -> Result<Vec<CatalogItem>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_pair(line).map_err(|message| Error::Collection {
                line: index + 1,
                message,
            })
        })
        .collect()
}

/// Parse one `("Title", "Author")` literal
fn parse_pair(line: &str) -> std::result::Result<CatalogItem, String> {
    let inner = line
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| "expected a parenthesized (title, author) pair".to_string())?;

    let mut chars = inner.chars().peekable();
    let title = parse_quoted(&mut chars)?;
    skip_whitespace(&mut chars);
    if chars.next() != Some(',') {
        return Err("expected a comma after the title".into());
    }
    let author = parse_quoted(&mut chars)?;
    skip_whitespace(&mut chars);
    // A trailing comma is legal in a tuple literal
    if chars.peek() == Some(&',') {
        chars.next();
        skip_whitespace(&mut chars);
    }
    if let Some(extra) = chars.next() {
        return Err(format!("unexpected '{}' after the author", extra));
    }

    Ok(CatalogItem::new(title, author))
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

/// Read a single- or double-quoted string, honoring backslash escapes
fn parse_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> std::result::Result<String, String> {
    skip_whitespace(chars);
    let quote = match chars.next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err("expected a quoted string".into()),
    };

    let mut value = String::new();
    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(c) => value.push(c),
                None => return Err("unterminated escape".into()),
            },
            Some(c) if c == quote => return Ok(value),
            Some(c) => value.push(c),
            None => return Err("unterminated string".into()),
        }
    }
}
