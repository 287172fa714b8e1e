//! # Catalog Commands
//!
//! `show` prints the page; `search` updates the search term and prints the
//! filtered page.

use tracing::debug;

use super::{current_page, Reply};
use crate::error::ApiError;
use crate::state::AppState;

/// Prints the current page.
pub async fn show(state: &AppState) -> Result<Reply, ApiError> {
    Ok(current_page(state).await)
}

/// Sets the search term and prints the page it produces.
///
/// While the catalog is still loading the term is kept and applied once the
/// products arrive.
pub async fn search(state: &AppState, term: String) -> Result<Reply, ApiError> {
    debug!(term = %term, "search command");
    state.storefront.set_search_term(term).await?;
    Ok(current_page(state).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::ready_state;
    use crate::error::ErrorCode;

    fn names(reply: &Reply) -> Vec<String> {
        match reply {
            Reply::Page { page } => page.products.iter().map(|p| p.name.clone()).collect(),
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_filters_page() {
        let state = ready_state().await;

        let reply = search(&state, "MIL".to_string()).await.unwrap();
        assert_eq!(names(&reply), vec!["Milk"]);

        let reply = search(&state, String::new()).await.unwrap();
        assert_eq!(names(&reply), vec!["Milk", "Bread"]);
    }

    #[tokio::test]
    async fn test_show_after_teardown_still_renders() {
        let state = ready_state().await;
        state.storefront.teardown().await;

        let reply = show(&state).await.unwrap();
        assert_eq!(names(&reply).len(), 2);

        let err = search(&state, "milk".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotMounted);
    }
}
