//! Front-matter splitting
//!
//! A document may open with a YAML block fenced by `---` lines. This module
//! only separates that block from the body and parses it into an untyped
//! mapping; deciding which fields are required (and what they mean) is the
//! catalog loader's job.

use anyhow::{bail, Context, Result};
use serde_yaml::Mapping;

const FENCE: &str = "---";

/// Split a document into its front-matter mapping and body.
///
/// A document that does not open with a fence has no front matter: the
/// mapping is empty and the body is the whole input. An opening fence
/// without a closing one is an error, since silently treating the YAML
/// block as prose would publish it.
pub fn split(content: &str) -> Result<(Mapping, &str)> {
    let Some(after_open) = content.strip_prefix(FENCE) else {
        return Ok((Mapping::new(), content));
    };

    // The opening fence must stand alone on its line; anything else
    // (say, a `----` horizontal rule) is body text.
    let block = match strip_newline(after_open) {
        Some(rest) => rest,
        None => return Ok((Mapping::new(), content)),
    };

    // The closing fence may come immediately on the next line, leaving an
    // empty block.
    if let Some(after_close) = block.strip_prefix(FENCE) {
        let body = if after_close.is_empty() {
            Some("")
        } else {
            strip_newline(after_close)
        };
        if let Some(body) = body {
            return Ok((Mapping::new(), body));
        }
    }

    let mut from = 0;
    loop {
        let Some(found) = block[from..].find("\n---") else {
            bail!("unterminated front-matter fence");
        };
        let at = from + found;
        let after_close = &block[at + 1 + FENCE.len()..];

        // The closing fence must also stand alone: either end of input
        // or a line break follows.
        let body = if after_close.is_empty() {
            Some("")
        } else {
            strip_newline(after_close)
        };

        if let Some(body) = body {
            let yaml = &block[..at];
            let matter = if yaml.trim().is_empty() {
                Mapping::new()
            } else {
                serde_yaml::from_str(yaml).context("front matter is not a YAML mapping")?
            };
            return Ok((matter, body));
        }

        from = at + 1;
    }
}

/// Consume one line break (`\n` or `\r\n`), if the string starts with one.
fn strip_newline(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}
