//! # Theme Registry
//!
//! Fixed mapping from a theme identifier to its style-class bindings.
//!
//! ## Registry Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Theme Registry                                 │
//! │                                                                         │
//! │   ThemeId (closed set)          REGISTRY (static, indexed by id)        │
//! │   ────────────────────          ──────────────────────────────────      │
//! │   Light  = 0  ───────────────►  [0] background / text / header / ...   │
//! │   Dark   = 1  ───────────────►  [1] background / text / header / ...   │
//! │   Fresh  = 2  ───────────────►  [2] background / text / header / ...   │
//! │                                                                         │
//! │   "neon", "", "Purple"  ──► parse_or_default ──► Light                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Adding a theme means one enum variant plus one table row. The
//! `test_registry_is_total` test fails if the two drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Theme Identifier
// =============================================================================

/// One of the storefront's visual themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ThemeId {
    #[default]
    Light,
    Dark,
    Fresh,
}

impl ThemeId {
    /// Every theme, in registry order.
    pub const ALL: [ThemeId; 3] = [ThemeId::Light, ThemeId::Dark, ThemeId::Fresh];

    /// Number of themes in the closed set.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the identifier as stored in preferences.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Light => "light",
            ThemeId::Dark => "dark",
            ThemeId::Fresh => "fresh",
        }
    }

    /// Parses `raw`, falling back to the default theme for anything unknown.
    ///
    /// ## Example
    /// ```rust
    /// use trafalgar_core::ThemeId;
    ///
    /// assert_eq!(ThemeId::parse_or_default("Dark"), ThemeId::Dark);
    /// assert_eq!(ThemeId::parse_or_default("neon"), ThemeId::Light);
    /// ```
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    /// Returns the style bindings for this theme.
    pub fn style(&self) -> &'static StyleBundle {
        &REGISTRY[self.index()].style
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known theme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    /// Trimmed, case-insensitive match against the closed set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ThemeId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

// =============================================================================
// Style Bundle
// =============================================================================

/// Style-class bindings for the page regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct StyleBundle {
    /// Page background.
    pub background: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Header bar.
    pub header: &'static str,
    /// Footer bar.
    pub footer: &'static str,
    /// Buttons and product cards.
    pub button: &'static str,
}

struct ThemeEntry {
    id: ThemeId,
    style: StyleBundle,
}

static REGISTRY: [ThemeEntry; ThemeId::COUNT] = [
    ThemeEntry {
        id: ThemeId::Light,
        style: StyleBundle {
            background: "bg-white",
            text: "text-black",
            header: "bg-blue-600 text-white",
            footer: "bg-gray-800 text-white",
            button: "bg-blue-500 text-white hover:bg-blue-600",
        },
    },
    ThemeEntry {
        id: ThemeId::Dark,
        style: StyleBundle {
            background: "bg-gray-900",
            text: "text-white",
            header: "bg-gray-800 text-gray-100",
            footer: "bg-gray-700 text-gray-100",
            button: "bg-gray-700 text-white hover:bg-gray-800",
        },
    },
    ThemeEntry {
        id: ThemeId::Fresh,
        style: StyleBundle {
            background: "bg-green-100",
            text: "text-green-900",
            header: "bg-green-500 text-white",
            footer: "bg-green-700 text-white",
            button: "bg-green-500 text-white hover:bg-green-600",
        },
    },
];

// =============================================================================
// Unit Tests
// =============================================================================
