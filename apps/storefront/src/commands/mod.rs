//! # Storefront Commands
//!
//! The shell reads one command per stdin line and answers with one JSON
//! line on stdout.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing + dispatch)
//! ├── catalog.rs  ◄─── show, search
//! ├── theme.rs    ◄─── theme
//! └── session.rs  ◄─── sign-in, sign-out
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin:  "search mil"                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  parse_command() ──► Command::Search("mil")                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&AppState, command)                                           │
//! │         │   └── catalog::search() ──► storefront.set_search_term()      │
//! │         ▼                                                               │
//! │  Reply::Page(PageView) ──► {"type":"page","page":{...}}                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod session;
pub mod theme;

use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::view::PageView;

/// Usage lines printed by `help`.
pub const HELP: &[&str] = &[
    "show               print the current page",
    "search <text>      filter products by name (empty clears)",
    "theme <id>         switch theme: light, dark, fresh",
    "sign-in            request a sign-in",
    "sign-out           request a sign-out",
    "help               print this list",
    "quit               tear down and exit",
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    /// Search text, kept verbatim after the verb's separating space.
    Search(String),
    /// Raw theme argument; validated by the theme command.
    Theme(String),
    SignIn,
    SignOut,
    Help,
    Quit,
}

/// What a command answers with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Page { page: PageView },
    Help { commands: Vec<&'static str> },
    Quit,
}

/// Parses one input line.
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, ApiError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let trimmed = line.trim_start();
    let (verb, rest) = match trimmed.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "show" => Command::Show,
        "search" => Command::Search(rest.to_string()),
        "theme" => {
            if rest.trim().is_empty() {
                return Err(ApiError::invalid_argument(
                    "theme needs an argument: light, dark, fresh",
                ));
            }
            Command::Theme(rest.to_string())
        }
        "sign-in" | "signin" => Command::SignIn,
        "sign-out" | "signout" => Command::SignOut,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ApiError::unknown_command(other)),
    };

    Ok(Some(command))
}

/// Runs `command` against the app state.
pub async fn dispatch(state: &AppState, command: Command) -> Result<Reply, ApiError> {
    match command {
        Command::Show => catalog::show(state).await,
        Command::Search(term) => catalog::search(state, term).await,
        Command::Theme(raw) => theme::set_theme(state, &raw).await,
        Command::SignIn => session::sign_in(state).await,
        Command::SignOut => session::sign_out(state).await,
        Command::Help => Ok(Reply::Help {
            commands: HELP.to_vec(),
        }),
        Command::Quit => Ok(Reply::Quit),
    }
}

/// Composes the current page.
pub(crate) async fn current_page(state: &AppState) -> Reply {
    let snapshot = state.storefront.snapshot().await;
    Reply::Page {
        page: PageView::compose(&state.store, &snapshot),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_basic_verbs() {
        assert_eq!(parse_command("show").unwrap(), Some(Command::Show));
        assert_eq!(parse_command("HELP").unwrap(), Some(Command::Help));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("sign-in").unwrap(), Some(Command::SignIn));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_search_keeps_text_verbatim() {
        assert_eq!(
            parse_command("search  Milk ").unwrap(),
            Some(Command::Search(" Milk ".to_string()))
        );
        assert_eq!(
            parse_command("search").unwrap(),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_command("dance").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);

        let err = parse_command("theme").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_dispatch_help_and_quit() {
        let state = test_support::ready_state().await;

        match dispatch(&state, Command::Help).await.unwrap() {
            Reply::Help { commands } => assert_eq!(commands.len(), HELP.len()),
            other => panic!("unexpected reply: {:?}", other),
        }
        assert_eq!(dispatch(&state, Command::Quit).await.unwrap(), Reply::Quit);
    }

    #[test]
    fn test_reply_serialization() {
        let json = serde_json::to_value(Reply::Quit).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "quit" }));
    }
}
