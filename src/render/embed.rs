//! Host-document embedding.
//!
//! The rendered graph ends up nested two levels deep:
//!
//! ```text
//! host page
//!   └─ <iframe srcdoc="  ← attribute context (entity escaped)
//!        <!DOCTYPE html> … <script> var data = {…}; </script>
//!                                     └─ script context (JSON, \u escaped)
//! ```
//!
//! Each context gets its own escaping:
//!
//! - **Script**: JSON from `serde_json`, then `<`, `>`, `&`, U+2028 and
//!   U+2029 rewritten as `\uXXXX`. A label such as `</script>` stays a JSON
//!   string.
//! - **Attribute**: the whole document entity-escaped for `&`, `<`, `>`,
//!   `"` and `'`. The value can never end the `srcdoc` attribute early, and
//!   the browser decodes it back to exactly the document.
//!
//! After escaping, the attribute value is checked again; a raw quote or `<`
//! there fails the call with `Error::RenderEscapeFailure` instead of
//! producing markup.

use serde::Serialize;

use crate::{Error, Result};
use super::{RenderStyle, RenderableGraph};

const VIS_NETWORK_SRC: &str =
    "https://unpkg.com/vis-network@9.1.2/standalone/umd/vis-network.min.js";

const FRAME_ALLOW: &str = "midi; geolocation; microphone; camera; display-capture; encrypted-media;";

const FRAME_SANDBOX: &str = "allow-modals allow-forms allow-scripts allow-same-origin \
    allow-popups allow-top-navigation-by-user-activation allow-downloads";

// ============================================================================
// Escaping
// ============================================================================

/// Entity-escape `raw` for a quoted HTML attribute value (either quote style).
pub fn escape_attribute(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn verify_attribute(escaped: &str) -> Result<()> {
    match escaped.find(['"', '\'', '<']) {
        Some(pos) => Err(Error::RenderEscapeFailure(format!(
            "unescaped {:?} at byte {pos} of attribute value",
            &escaped[pos..=pos],
        ))),
        None => Ok(()),
    }
}

/// Serialize `value` as JSON that is safe inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}

// ============================================================================
// Document and fragment
// ============================================================================

#[derive(Serialize)]
struct NetworkOptions<'a> {
    height: &'a str,
    width: &'static str,
    edges: EdgeOptions,
    physics: PhysicsOptions,
}

#[derive(Serialize)]
struct EdgeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    arrows: Option<&'static str>,
}

#[derive(Serialize)]
struct PhysicsOptions {
    enabled: bool,
}

/// The standalone HTML document that draws `graph`.
pub fn document(graph: &RenderableGraph, style: &RenderStyle) -> Result<String> {
    let data = script_json(graph)?;
    let options = script_json(&NetworkOptions {
        height: &style.canvas_height,
        width: "100%",
        edges: EdgeOptions { arrows: graph.directed.then_some("to") },
        physics: PhysicsOptions { enabled: true },
    })?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="{VIS_NETWORK_SRC}"></script>
<style>#graph {{ width: 100%; border: 1px solid lightgray; }}</style>
</head>
<body>
<div id="graph"></div>
<script>
var data = {data};
var options = {options};
new vis.Network(
  document.getElementById("graph"),
  {{ nodes: new vis.DataSet(data.nodes), edges: new vis.DataSet(data.edges) }},
  options
);
</script>
</body>
</html>"#
    ))
}

fn frame(frame_height: &str, srcdoc: &str) -> String {
    format!(
        r#"<iframe style="width: 100%; height: {frame_height}; border: 0; margin: 0 auto;" name="result" allow="{FRAME_ALLOW}" sandbox="{FRAME_SANDBOX}" allowfullscreen="" allowpaymentrequest="" srcdoc="{srcdoc}"></iframe>"#
    )
}

/// Embed `graph` as an `<iframe srcdoc="…">` fragment.
pub fn embed(graph: &RenderableGraph, style: &RenderStyle) -> Result<String> {
    let srcdoc = escape_attribute(&document(graph, style)?);
    verify_attribute(&srcdoc)?;
    let height = escape_attribute(&style.frame_height);
    verify_attribute(&height)?;
    Ok(frame(&height, &srcdoc))
}

/// The empty frame shown when embedding fails. Carries no caller data.
pub fn fallback_fragment() -> String {
    frame("400px", "")
}

/// [`embed`], degrading to [`fallback_fragment`] on failure.
pub fn embed_or_fallback(graph: &RenderableGraph, style: &RenderStyle) -> String {
    match embed(graph, style) {
        Ok(markup) => markup,
        Err(err) => {
            tracing::warn!(error = %err, "embedding failed, serving empty frame");
            fallback_fragment()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
