//! # Selection controller
//!
//! Entry point for UI selection events:
//!
//! ```text
//! raw input ─parse─▶ Selection ─resolve─▶ Chain ─apply─▶ OverlayState ─render/embed─▶ markup
//! ```
//!
//! A session is either cleared or showing one chain; a selection event is the
//! only thing that moves it between the two. Errors never leave
//! [`SelectionController::on_select`]: a bad or unknown id clears the
//! highlight and the base graph is served.

use std::str::FromStr;
use std::sync::Arc;

use crate::model::*;
use crate::overlay::{self, OverlayState};
use crate::render::{self, RenderStyle};
use crate::storage::GraphStore;
use crate::resolver::resolve;
use crate::session::Session;
use crate::{Error, Result};

/// A parsed selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Empty input: drop any highlight.
    Clear,
    /// Highlight the chain starting here.
    Node(NodeId),
}

impl Selection {
    /// Parse optional raw input. Absent, empty and whitespace-only input
    /// all mean [`Selection::Clear`].
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        raw.map_or(Ok(Selection::Clear), |s| s.parse())
    }
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Selection::Clear);
        }
        trimmed
            .parse::<NodeId>()
            .map(Selection::Node)
            .map_err(|_| Error::InvalidSelection(trimmed.to_string()))
    }
}

// ============================================================================
// SelectionController
// ============================================================================

/// Runs selections against sessions. Holds no per-session state itself.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    style: RenderStyle,
    verbose: bool,
}

impl SelectionController {
    pub fn new(style: RenderStyle) -> Self {
        Self { style, verbose: false }
    }

    /// Log every selection at `info` instead of `debug`.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Apply a selection and return the overlay now active.
    ///
    /// On error the session's overlay is left as it was.
    pub fn try_select(&self, session: &Session, raw: Option<&str>) -> Result<Arc<OverlayState>> {
        match Selection::parse(raw)? {
            Selection::Clear => Ok(overlay::apply(session, None)),
            Selection::Node(start) => {
                let chain = resolve(session.graph(), start)?;
                if self.verbose {
                    tracing::info!(session = %session.id(), %chain, "selection");
                } else {
                    tracing::debug!(session = %session.id(), %chain, "selection");
                }
                Ok(overlay::apply(session, Some(&chain)))
            }
        }
    }

    /// Handle a selection event and return the markup to display.
    ///
    /// Invalid or unknown selections are logged and treated as a clear.
    pub fn on_select(&self, session: &Session, raw: Option<&str>) -> String {
        let overlay = self.try_select(session, raw).unwrap_or_else(|err| {
            tracing::warn!(session = %session.id(), error = %err, "selection rejected, clearing highlight");
            overlay::apply(session, None)
        });
        self.markup(session.graph(), &overlay)
    }

    /// Markup for the session's current overlay, without changing it.
    pub fn current(&self, session: &Session) -> String {
        self.markup(session.graph(), &session.overlay())
    }

    fn markup(&self, graph: &GraphStore, overlay: &OverlayState) -> String {
        let renderable = render::render(graph, overlay, &self.style);
        render::embed_or_fallback(&renderable, &self.style)
    }
}

// ============================================================================
// Tests
// ============================================================================
