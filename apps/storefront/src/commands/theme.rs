//! # Theme Command
//!
//! Unlike a stored preference, a typed theme id must name a registered
//! theme; anything else is rejected without touching the active theme.

use super::{current_page, Reply};
use crate::error::ApiError;
use crate::state::AppState;
use trafalgar_core::ThemeId;

/// Switches the active theme.
pub async fn set_theme(state: &AppState, raw: &str) -> Result<Reply, ApiError> {
    let theme: ThemeId = raw.parse().map_err(|e| {
        let valid: Vec<&str> = ThemeId::ALL.iter().map(|t| t.as_str()).collect();
        ApiError::invalid_argument(format!("{}. Valid themes: {}", e, valid.join(", ")))
    })?;

    state.storefront.set_theme(theme).await?;
    Ok(current_page(state).await)
}
