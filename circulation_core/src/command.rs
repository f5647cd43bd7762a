//! Parsing librarian command lines.
//!
//! Commands are written as calls: `open()`, `issue_card("Amy")`,
//! `check_out(1, 3)`. String arguments may use single or double quotes.

use crate::{Error, Result};
use std::str::FromStr;

/// A single librarian request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    IssueCard(String),
    Serve(String),
    Search(String),
    CheckOut(Vec<usize>),
    CheckIn(Vec<usize>),
    ListOverdueBooks,
    Help,
    Quit,
}

/// A parsed call argument
#[derive(Debug)]
enum Arg {
    Text(String),
    Number(usize),
}

impl Command {
    /// Parse one line of librarian input
    pub fn parse(line: &str) -> Result<Self> {
        let unknown = || Error::UnknownCommand(line.trim().to_string());

        let trimmed = line.trim();
        let (name, rest) = trimmed.split_once('(').ok_or_else(unknown)?;
        let body = rest.strip_suffix(')').ok_or_else(unknown)?;
        let args = split_args(body).ok_or_else(unknown)?;

        let command = match (name.trim(), args.as_slice()) {
            ("open", []) => Command::Open,
            ("close", []) => Command::Close,
            ("help", []) => Command::Help,
            ("quit", []) => Command::Quit,
            ("list_overdue_books", []) => Command::ListOverdueBooks,
            ("issue_card", [Arg::Text(name)]) => Command::IssueCard(name.clone()),
            ("serve", [Arg::Text(name)]) => Command::Serve(name.clone()),
            ("search", [Arg::Text(text)]) => Command::Search(text.clone()),
            ("check_out", numbers) => Command::CheckOut(numbers_only(numbers).ok_or_else(unknown)?),
            ("check_in", numbers) => Command::CheckIn(numbers_only(numbers).ok_or_else(unknown)?),
            _ => return Err(unknown()),
        };

        tracing::debug!("Parsed command {:?}", command);
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn numbers_only(args: &[Arg]) -> Option<Vec<usize>> {
    args.iter()
        .map(|arg| match arg {
            Arg::Number(n) => Some(*n),
            Arg::Text(_) => None,
        })
        .collect()
}

/// Split a comma-separated argument list; `None` on any malformed argument
fn split_args(body: &str) -> Option<Vec<Arg>> {
    let mut args = Vec::new();
    let mut chars = body.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(&first) = chars.peek() else {
            break;
        };

        let arg = if first == '"' || first == '\'' {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next()? {
                    '\\' => text.push(chars.next()?),
                    c if c == first => break,
                    c => text.push(c),
                }
            }
            Arg::Text(text)
        } else {
            let mut digits = String::new();
            while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
                digits.push(c);
            }
            Arg::Number(digits.parse().ok()?)
        };
        args.push(arg);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(args)
}
