//! Markup normalisation for flattened note text.
//!
//! The documentation site and the release-notes frontend disagree on a few
//! details of inline HTML. A [`MarkupPipeline`] applies an ordered list of
//! [`RewriteStep`]s, each a pure `&str -> String` transform, and a
//! [`LinkPolicy`] then decides what happens to anchors based on when the note
//! was published.

use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::locale::Locale;

/// Notes published before this date have their anchors stripped; notes on or
/// after it get `REPLINK/` placeholders resolved.
pub static CUTOFF_DATE: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(2024, 5, 8).expect("valid calendar date"));

static ANCHOR_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a\s+([^>]*?)(\s*>)").unwrap());
static ANCHOR_ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<a(?:\s[^>]*)?>(.*?)</a>").unwrap());
static REPLINK_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(<a\s[^>]*?href=")REPLINK/([^"]*")"#).unwrap());

/// A single text rewrite. Steps are order-sensitive; see [`MarkupPipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStep {
    /// `<a https://x">` becomes `<a href="https://x">`; anchors that already
    /// carry `href=` are left alone.
    NormalizeAnchorHref,
    /// `<br>` becomes `<br />`.
    SelfCloseLineBreaks,
    /// Legacy `<makr>` emphasis becomes `<code>`.
    MakrToCode,
    /// Braces hugging `<code>` delimiters are written as entities.
    EscapeCodeBraces,
    /// `<a class` becomes `<a className` for the JSX renderer.
    AnchorClassName,
}

impl RewriteStep {
    pub fn apply(&self, text: &str) -> String {
        match self {
            RewriteStep::NormalizeAnchorHref => normalize_anchor_href(text),
            RewriteStep::SelfCloseLineBreaks => text.replace("<br>", "<br />"),
            RewriteStep::MakrToCode => text.replace("<makr>", "<code>").replace("</makr>", "</code>"),
            RewriteStep::EscapeCodeBraces => text
                .replace("<code>{", "<code>&#123;")
                .replace("}</code>", "&#125;</code>"),
            RewriteStep::AnchorClassName => text.replace("<a class", "<a className"),
        }
    }
}

fn normalize_anchor_href(text: &str) -> String {
    ANCHOR_OPEN_RE
        .replace_all(text, |caps: &Captures| {
            let attributes = caps[1].trim();
            let close = &caps[2];
            if attributes.contains("href=") {
                format!("<a {attributes}{close}")
            } else {
                format!("<a href=\"{attributes}{close}")
            }
        })
        .into_owned()
}

/// Ordered list of rewrite steps applied left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupPipeline {
    steps: Vec<RewriteStep>,
}

impl MarkupPipeline {
    pub fn new(steps: Vec<RewriteStep>) -> Self {
        Self { steps }
    }

    /// Anchor href normalisation and self-closing line breaks.
    pub fn classic() -> Self {
        Self::new(vec![
            RewriteStep::NormalizeAnchorHref,
            RewriteStep::SelfCloseLineBreaks,
        ])
    }

    /// The classic steps followed by the code-tag and attribute-name shims.
    pub fn extended() -> Self {
        Self::new(vec![
            RewriteStep::NormalizeAnchorHref,
            RewriteStep::SelfCloseLineBreaks,
            RewriteStep::MakrToCode,
            RewriteStep::EscapeCodeBraces,
            RewriteStep::AnchorClassName,
        ])
    }

    pub fn steps(&self) -> &[RewriteStep] {
        &self.steps
    }

    pub fn apply(&self, text: &str) -> String {
        self.steps
            .iter()
            .fold(text.to_string(), |acc, step| step.apply(&acc))
    }
}

impl Default for MarkupPipeline {
    fn default() -> Self {
        Self::classic()
    }
}

/// What to do with anchors once the markup has been normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Replace every `<a ...>inner</a>` with `inner`.
    StripAnchors,
    /// Rewrite `href="REPLINK/<path>"` to `href="/<locale>/openapi/<path>"`.
    ResolveRepLinks(Locale),
}

impl LinkPolicy {
    pub fn for_publish_date(published: NaiveDate, locale: Locale) -> Self {
        if published < *CUTOFF_DATE {
            LinkPolicy::StripAnchors
        } else {
            LinkPolicy::ResolveRepLinks(locale)
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            LinkPolicy::StripAnchors => ANCHOR_ELEMENT_RE.replace_all(text, "${1}").into_owned(),
            LinkPolicy::ResolveRepLinks(locale) => {
                let replacement = format!("${{1}}/{}/openapi/${{2}}", locale.as_str());
                REPLINK_HREF_RE
                    .replace_all(text, replacement.as_str())
                    .into_owned()
            }
        }
    }
}

/// Run `pipeline` over `text`, then apply `policy`.
pub fn rewrite(text: &str, pipeline: &MarkupPipeline, policy: LinkPolicy) -> String {
    policy.apply(&pipeline.apply(text))
}
