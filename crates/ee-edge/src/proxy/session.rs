//! Session affinity extraction.
//!
//! A user browsing the proxied tool lands on pages such as
//! `/proxy/<tool>/s/<id>/...`. When the tool's own scripts then request
//! `/app/...`, the referring page tells us which session to send them back to.

use regex::Regex;
use url::Url;

use ee_common::ProxySessionHint;

/// Finds the session id in referring URLs for one tool
#[derive(Debug, Clone)]
pub struct SessionMatcher {
    tool: String,
    pattern: Regex,
}

impl SessionMatcher {
    pub fn new(tool: &str) -> Result<Self, regex::Error> {
        // [0-9] rather than \d: the id is ASCII only
        let pattern = Regex::new(&format!(
            r"/proxy/{}/s/([0-9]{{5}})(?:/|$)",
            regex::escape(tool)
        ))?;

        Ok(Self {
            tool: tool.to_string(),
            pattern,
        })
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Session from a raw `Referer` value; unparseable values yield `None`
    pub fn from_referer(&self, referer: Option<&str>) -> Option<ProxySessionHint> {
        let url = Url::parse(referer?.trim()).ok()?;
        self.from_path(url.path())
    }

    /// First `/proxy/<tool>/s/<5 digits>` segment of a path
    pub fn from_path(&self, path: &str) -> Option<ProxySessionHint> {
        let captures = self.pattern.captures(path)?;
        ProxySessionHint::parse(captures.get(1)?.as_str())
    }
}
