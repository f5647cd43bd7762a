//! Numbered-list rendering shared by search results, held books and
//! overdue reports.

/// How many entries are printed before the rest are summarized
pub const LIST_LIMIT: usize = 10;

/// Text returned for an empty list
pub const EMPTY_LIST: &str = "No books found.";

/// Render `items` as a 1-indexed list, one tab-indented line per entry
///
/// Only the first [`LIST_LIMIT`] entries are shown; anything beyond that is
/// folded into a single `...and k more.` line.
///
/// # Example
/// ```
/// use circulation_core::create_numbered_list;
///
/// let list = create_numbered_list(&["Apple", "Orange", "Kiwi"]);
/// assert_eq!(list, "\t1. Apple\n\t2. Orange\n\t3. Kiwi\n");
/// ```
pub fn create_numbered_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let mut list = String::new();
    for (index, item) in items.iter().take(LIST_LIMIT).enumerate() {
        list.push_str(&format!("\t{}. {}\n", index + 1, item.as_ref()));
    }
    if items.len() > LIST_LIMIT {
        list.push_str(&format!("\t...and {} more.\n", items.len() - LIST_LIMIT));
    }
    list
}
