//! # Session Commands
//!
//! Forward sign-in and sign-out to the session provider. The page printed
//! afterwards reads presence live, so it reflects whatever the provider did.

use tracing::info;

use super::{current_page, Reply};
use crate::error::ApiError;
use crate::state::AppState;

/// Requests a sign-in.
pub async fn sign_in(state: &AppState) -> Result<Reply, ApiError> {
    state
        .storefront
        .request_sign_in()
        .await
        .map_err(ApiError::session)?;
    info!("Sign-in requested");
    Ok(current_page(state).await)
}

/// Requests a sign-out.
pub async fn sign_out(state: &AppState) -> Result<Reply, ApiError> {
    state
        .storefront
        .request_sign_out()
        .await
        .map_err(ApiError::session)?;
    info!("Sign-out requested");
    Ok(current_page(state).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::ready_state;
    use trafalgar_client::SessionPresence;

    fn presence(reply: &Reply) -> (SessionPresence, &'static str) {
        match reply {
            Reply::Page { page } => (page.session, page.session_action),
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sign_in_then_out() {
        let state = ready_state().await;

        let reply = sign_in(&state).await.unwrap();
        assert_eq!(presence(&reply), (SessionPresence::Present, "Sign Out"));

        let reply = sign_out(&state).await.unwrap();
        assert_eq!(presence(&reply), (SessionPresence::Absent, "Sign In"));
    }
}
