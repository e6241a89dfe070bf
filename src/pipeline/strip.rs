//! The stripper: an ordered table of regex rewrites that turns Markdown into
//! plain text.
//!
//! ## Why a rule table and not a parser?
//!
//! The goal is readable text, not a faithful document model. A fixed list of
//! fifteen search-and-replace passes removes every marker class we care about
//! (fences, inline code, images, links, emphasis, headings, quotes, rules,
//! tables, list markers) in linear time, with no allocation beyond one string
//! per pass. Each rule is a plain value, so the table is trivially inspectable
//! and the pipeline is a single loop.
//!
//! ## Rule Order
//!
//! Order is load-bearing. Fenced blocks go first so nothing inside them is
//! rewritten; images go before links because `![a](b)` contains `[a](b)`;
//! table dividers go before pipe removal so a divider row collapses to nothing;
//! whitespace normalisation runs last over whatever the markers left behind.
//!
//! ## Single pass
//!
//! Every rule runs exactly once over the text. Nested or overlapping emphasis
//! (`***x***`) therefore resolves only one layer, and pipes inside table cell
//! content are removed like structural ones. The passes must not iterate.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// What a matched span is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// Drop the whole match.
    Remove,
    /// Expand a `regex` replacement template (`$1`, literal text, …).
    Template(&'static str),
    /// Keep the first capture group that took part in the match.
    ///
    /// Used where the `regex` crate's lack of back-references forces one
    /// alternative per delimiter, each with its own inner group.
    FirstCapture,
}

/// One step of the stripping pipeline.
pub struct Rule {
    /// Short identifier, stable across releases (used by `--list-rules`).
    pub name: &'static str,
    pattern: &'static Lazy<Regex>,
    replacement: Replacement,
}

impl Rule {
    /// The compiled pattern behind this rule.
    pub fn pattern(&self) -> &Regex {
        self.pattern
    }

    /// What each match of [`Rule::pattern`] is rewritten to.
    pub fn replacement(&self) -> Replacement {
        self.replacement
    }

    /// Apply this rule once over the whole text.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.replacement {
            Replacement::Remove => self.pattern.replace_all(text, ""),
            Replacement::Template(t) => self.pattern.replace_all(text, t),
            Replacement::FirstCapture => self.pattern.replace_all(text, |caps: &Captures<'_>| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .next()
                    .map_or("", |m| m.as_str())
                    .to_string()
            }),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("replacement", &self.replacement)
            .finish()
    }
}

// ── Patterns ─────────────────────────────────────────────────────────────────

// 1. Fenced code blocks, fence to nearest fence, across lines.
static RE_FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());

// 2. Inline code: keep the content.
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").unwrap());

// 3. Images disappear entirely, alt text included.
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());

// 4. Links: keep the label.
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

// 5. Emphasis. Alternation order mirrors the greedy `{1,2}` delimiter: the
//    doubled form is tried before the single one at each position.
static RE_EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|\*(.*?)\*|__(.*?)__|_(.*?)_").unwrap());

// 6. ATX heading markers.
static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}[ \t]*").unwrap());

// 7. Blockquote markers (one level).
static RE_BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^>[ \t]?").unwrap());

// 8. Horizontal rules become empty lines.
static RE_HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[-*_]{3,}[ \t]*$").unwrap());

// 9. Table divider segments. Adjacent segments share a pipe, so a run of them
//    is consumed as one match and leaves a single `|`.
static RE_TABLE_DIVIDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|(?:[ \t]*-+[ \t]*\|)+").unwrap());

// 10. Remaining pipes plus the horizontal whitespace after them.
static RE_TABLE_PIPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|[ \t]*").unwrap());

// 11. Bullet markers, including an item with nothing after the marker.
static RE_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*+](?:[ \t]+|$)").unwrap());

// 12. Numbered list markers, same shape.
static RE_NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d+\.(?:[ \t]+|$)").unwrap());

// 13. Blank-line runs.
static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

// 14. Horizontal whitespace runs.
static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// The pipeline, in the order it must run. Trimming (step 15) is not a regex
/// and is applied by [`strip`] after the table.
static RULES: [Rule; 14] = [
    Rule {
        name: "fenced-code",
        pattern: &RE_FENCED_CODE,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "inline-code",
        pattern: &RE_INLINE_CODE,
        replacement: Replacement::Template("$1"),
    },
    Rule {
        name: "image",
        pattern: &RE_IMAGE,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "link",
        pattern: &RE_LINK,
        replacement: Replacement::Template("$1"),
    },
    Rule {
        name: "emphasis",
        pattern: &RE_EMPHASIS,
        replacement: Replacement::FirstCapture,
    },
    Rule {
        name: "heading",
        pattern: &RE_HEADING,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "blockquote",
        pattern: &RE_BLOCKQUOTE,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "horizontal-rule",
        pattern: &RE_HORIZONTAL_RULE,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "table-divider",
        pattern: &RE_TABLE_DIVIDER,
        replacement: Replacement::Template("|"),
    },
    Rule {
        name: "table-pipe",
        pattern: &RE_TABLE_PIPE,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "bullet-list",
        pattern: &RE_BULLET,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "numbered-list",
        pattern: &RE_NUMBERED,
        replacement: Replacement::Remove,
    },
    Rule {
        name: "blank-lines",
        pattern: &RE_NEWLINES,
        replacement: Replacement::Template("\n"),
    },
    Rule {
        name: "horizontal-whitespace",
        pattern: &RE_SPACES,
        replacement: Replacement::Template(" "),
    },
];

/// The ordered rewrite rules applied by [`strip`].
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Strip Markdown syntax from `text`, returning plain text.
///
/// Total over all inputs: never panics, never fails. Empty input gives empty
/// output; malformed Markdown is rewritten by whichever rules match and is
/// otherwise left alone.
///
/// ```
/// assert_eq!(mdstrip::strip("# Title\n\nSome **bold** [link](https://x.y)"),
///            "Title\nSome bold link");
/// ```
pub fn strip(text: &str) -> String {
    let mut s = text.to_string();
    for rule in rules() {
        let rewritten = match rule.apply(&s) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(o) => o,
        };
        s = rewritten;
    }
    s.trim().to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────
