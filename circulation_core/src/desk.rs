//! The circulation desk: the library's state machine.
//!
//! The desk owns the shelf, the roster of card holders, the clock and the
//! patron currently being served. Every operation appends librarian-facing
//! text to an outgoing buffer which the dispatcher drains after each command.
//!
//! Two numbered listings link commands together:
//! - `search` produces the listing that `check_out` numbers refer to
//! - `serve` produces the listing that `check_in` numbers refer to
//!
//! Each listing is replaced wholesale by the next run of its producer and
//! dropped when the library closes.

use crate::listing::create_numbered_list;
use crate::types::{CatalogItem, Day, Member};
use crate::{Clock, Command, Error, Policy, Result};
use std::collections::BTreeMap;

/// Fixed usage text returned by `help()`
pub const HELP_TEXT: &str = "
help()
     Repeat this list of commands.
open()
     Opens the library for business; do this once each morning.

list_overdue_books()
     Prints out information about books due yesterday.

issue_card(\"name_of_patron\")
     Allows the named person the use of the library.

serve(\"name_of_patron\")
     Sets this patron to be the current patron being served.

search(\"string\")
     Searches for any book or author containing this string
     and displays a numbered list of results.

check_out(books...)
     Checks out books (by number) to the current patron.

check_in(books...)
     Accepts returned books (by number) from the current patron.

close()
     Closes the library at the end of the day.

quit()
     Closes the library for good. Hope you never have to use this!";

/// Whether the dispatcher should keep reading commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Numbered display strings from the last `search`, consumed by `check_out`
#[derive(Clone, Debug, Default)]
struct SearchResults(Vec<String>);

/// Numbered display strings from the last `serve`, consumed by `check_in`
#[derive(Clone, Debug, Default)]
struct HeldListing(Vec<String>);

/// The circulation desk
#[derive(Debug)]
pub struct Library {
    clock: Clock,
    policy: Policy,
    is_open: bool,
    shelf: Vec<CatalogItem>,
    roster: BTreeMap<String, Member>,
    active_member: Option<String>,
    last_search_results: Option<SearchResults>,
    last_serve_held: Option<HeldListing>,
    response: String,
}

impl Library {
    /// A closed library with `collection` on the shelf and default rules
    pub fn new(collection: Vec<CatalogItem>) -> Self {
        Self::with_policy(collection, Clock::new(), Policy::default())
    }

    /// A closed library using the given clock and circulation rules
    pub fn with_policy(collection: Vec<CatalogItem>, clock: Clock, policy: Policy) -> Self {
        tracing::debug!("Desk created with {} books on the shelf", collection.len());
        Self {
            clock,
            policy,
            is_open: false,
            shelf: collection,
            roster: BTreeMap::new(),
            active_member: None,
            last_search_results: None,
            last_serve_held: None,
            response: String::new(),
        }
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn today(&self) -> Day {
        self.clock.current()
    }

    /// Copies currently available, in shelf order
    pub fn shelf(&self) -> &[CatalogItem] {
        &self.shelf
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.roster.get(name)
    }

    /// Card holders, ordered by name
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.roster.values()
    }

    /// The patron currently being served
    pub fn active_member(&self) -> Option<&Member> {
        self.active_member
            .as_deref()
            .and_then(|name| self.roster.get(name))
    }

    /// Display strings from the most recent search, if still current
    pub fn search_results(&self) -> Option<&[String]> {
        self.last_search_results.as_ref().map(|r| r.0.as_slice())
    }

    /// Display strings listed by the most recent `serve`, if still current
    pub fn served_listing(&self) -> Option<&[String]> {
        self.last_serve_held.as_ref().map(|l| l.0.as_slice())
    }

    /// Text accumulated since the last drain
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Hand the accumulated text to the caller and clear the buffer
    pub fn take_response(&mut self) -> String {
        std::mem::take(&mut self.response)
    }

    // ========================================================================
    // Opening and closing
    // ========================================================================

    /// Start a new business day
    pub fn open(&mut self) {
        if self.is_open {
            self.talk("The library is already open");
            return;
        }
        self.clock.advance();
        self.is_open = true;
        tracing::info!("Library opened on day {}", self.clock.current());
        self.talk(format!("Today is day {}", self.clock.current()));
    }

    /// End the business day, sending the current patron away
    pub fn close(&mut self) {
        if !self.is_open {
            self.talk("The library is not open");
            return;
        }
        self.active_member = None;
        self.last_search_results = None;
        self.last_serve_held = None;
        self.is_open = false;
        tracing::info!("Library closed on day {}", self.clock.current());
        self.talk("Good night");
    }

    pub fn quit(&mut self) {
        self.talk("The library is now closed for renovations");
    }

    pub fn help(&mut self) {
        self.talk(HELP_TEXT);
    }

    // ========================================================================
    // Patrons
    // ========================================================================

    /// Give `name` a library card and start serving them
    pub fn issue_card(&mut self, name: &str) -> Result<()> {
        self.require_open()?;
        if self.roster.contains_key(name) {
            self.talk(format!("{} already has a library card.", name));
        } else {
            self.roster.insert(name.to_string(), Member::new(name));
            tracing::info!("Issued library card to {}", name);
            self.talk(format!("Library card issued to {}.", name));
        }
        self.serve(name)
    }

    /// Make `name` the patron that check-outs and check-ins apply to
    ///
    /// Lists the books the patron holds; that listing is what `check_in`
    /// numbers refer to.
    pub fn serve(&mut self, name: &str) -> Result<()> {
        self.require_open()?;
        let Some(member) = self.roster.get(name) else {
            self.talk(format!("{} does not have a library card.", name));
            return Ok(());
        };

        let held: Vec<String> = member.held().iter().map(ToString::to_string).collect();
        self.active_member = Some(name.to_string());
        self.talk(format!("Now serving {}.", name));

        if held.is_empty() {
            self.last_serve_held = None;
        } else {
            self.talk(format!("{} has these books:", name));
            self.talk(create_numbered_list(&held));
            tracing::debug!("Listed {} held books for {}", held.len(), name);
            self.last_serve_held = Some(HeldListing(held));
        }
        Ok(())
    }

    // ========================================================================
    // Searching and lending
    // ========================================================================

    /// Find shelf books whose title or author contains `query`
    ///
    /// Titles match case-insensitively, authors match exactly. Copies of the
    /// same book are listed once, in shelf order.
    pub fn search(&mut self, query: &str) -> Result<()> {
        self.require_open()?;
        if query.chars().count() < self.policy.min_search_length {
            return Err(Error::InvalidInput(format!(
                "Search string must contain at least {}.",
                spell_count(self.policy.min_search_length, "character")
            )));
        }

        let lowered = query.to_lowercase();
        let mut found: Vec<String> = Vec::new();
        for book in &self.shelf {
            if book.title().to_lowercase().contains(&lowered) || book.author().contains(query) {
                let display = book.to_string();
                if !found.contains(&display) {
                    found.push(display);
                }
            }
        }
        tracing::debug!("Search for {:?} found {} books", query, found.len());

        if found.is_empty() {
            self.talk("No books found");
        } else {
            self.talk(create_numbered_list(&found));
        }
        self.last_search_results = Some(SearchResults(found));
        Ok(())
    }

    /// Lend books from the last search listing to the current patron
    ///
    /// Books are handled in the order given. A number outside the listing, or
    /// reaching the patron's limit, stops the batch; books already lent stay
    /// lent. A book whose every copy has gone since the search is reported
    /// and skipped.
    pub fn check_out(&mut self, numbers: &[usize]) -> Result<()> {
        self.require_open()?;
        let name = self.active_member.clone().ok_or(Error::NoActiveMember)?;
        let due = self
            .clock
            .current()
            .saturating_add(self.policy.loan_period_days);
        let results = self.last_search_results.clone().unwrap_or_default();

        let mut lent = 0;
        for &number in numbers {
            if self.held_count(&name) >= self.policy.max_books_per_member {
                self.talk(format!(
                    "Sorry, {} already has {} books checked out.",
                    name, self.policy.max_books_per_member
                ));
                return Ok(());
            }
            let Some(wanted) = number.checked_sub(1).and_then(|i| results.0.get(i)) else {
                self.talk(format!("The library does not have book {}.", number));
                return Ok(());
            };

            match self.shelf.iter().position(|book| book.to_string() == *wanted) {
                Some(position) => {
                    let mut book = self.shelf.remove(position);
                    book.check_out(due);
                    tracing::info!("Checked out {} to {}, due day {}", book, name, due);
                    if let Some(member) = self.roster.get_mut(&name) {
                        member.take(book);
                    }
                    lent += 1;
                }
                None => self.talk(format!("Book {} is borrowed.", number)),
            }
        }

        self.talk(format!("{} books have been checked out to {}.", lent, name));
        let held: Vec<String> = self
            .roster
            .get(&name)
            .map(|member| member.held().iter().map(|b| b.title().to_string()).collect())
            .unwrap_or_default();
        for title in held {
            self.talk(format!("{}, checked out to {}.", title, name));
        }
        Ok(())
    }

    /// Take back books, numbered as in the last `serve` listing
    ///
    /// Every number is checked before anything moves: one bad number rejects
    /// the whole call and the patron keeps all their books.
    pub fn check_in(&mut self, numbers: &[usize]) -> Result<()> {
        self.require_open()?;
        let name = self.active_member.clone().ok_or(Error::NoActiveMember)?;
        let listing = self.last_serve_held.clone().ok_or(Error::NoActiveMember)?;

        let held_count = self.held_count(&name);
        let mut wanted = Vec::with_capacity(numbers.len());
        for &number in numbers {
            let entry = (1..=held_count)
                .contains(&number)
                .then(|| listing.0.get(number - 1))
                .flatten()
                .ok_or(Error::InvalidReference { number })?;
            wanted.push(entry.clone());
        }

        let mut returned = 0;
        for label in wanted {
            let Some(member) = self.roster.get_mut(&name) else {
                break;
            };
            let Some(copy) = member
                .held()
                .iter()
                .find(|book| book.to_string() == label)
                .cloned()
            else {
                tracing::debug!("{} no longer holds {}", name, label);
                continue;
            };
            if let Some(mut book) = member.give_back(&copy) {
                book.check_in();
                tracing::info!("{} returned {}", name, book);
                self.shelf.push(book);
                returned += 1;
            }
        }

        self.talk(format!("{} has returned {} books.", name, returned));
        Ok(())
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Report every patron holding books due before today
    pub fn list_overdue_books(&mut self) -> Result<()> {
        self.require_open()?;
        let report = self.overdue_report();
        self.talk(report);
        Ok(())
    }

    /// Overdue titles grouped by patron, or the all-clear message
    pub fn overdue_report(&self) -> String {
        let today = self.clock.current();
        let mut report = String::new();
        for member in self.roster.values() {
            let titles: Vec<&str> = member.overdue(today).map(CatalogItem::title).collect();
            if !titles.is_empty() {
                report.push_str(&format!("{}:\n", member));
                report.push_str(&create_numbered_list(&titles));
            }
        }
        if report.is_empty() {
            report.push_str("No books are overdue");
        }
        report
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Run one parsed command against the desk
    pub fn execute(&mut self, command: &Command) -> Result<Flow> {
        match command {
            Command::Open => self.open(),
            Command::Close => self.close(),
            Command::IssueCard(name) => self.issue_card(name)?,
            Command::Serve(name) => self.serve(name)?,
            Command::Search(query) => self.search(query)?,
            Command::CheckOut(numbers) => self.check_out(numbers)?,
            Command::CheckIn(numbers) => self.check_in(numbers)?,
            Command::ListOverdueBooks => self.list_overdue_books()?,
            Command::Help => self.help(),
            Command::Quit => {
                self.quit();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn require_open(&self) -> Result<()> {
        if self.is_open {
            Ok(())
        } else {
            Err(Error::IllegalState)
        }
    }

    fn held_count(&self, name: &str) -> usize {
        self.roster.get(name).map_or(0, |member| member.held().len())
    }

    /// Queue a message line for the dispatcher
    fn talk(&mut self, message: impl AsRef<str>) {
        self.response.push_str(message.as_ref());
        self.response.push('\n');
    }
}

/// "one character", "four characters", "12 characters"
fn spell_count(n: usize, noun: &str) -> String {
    const WORDS: [&str; 10] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    let count = WORDS.get(n).map_or_else(|| n.to_string(), |w| w.to_string());
    if n == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
