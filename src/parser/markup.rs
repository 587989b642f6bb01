/*!
 * Markup stripping rules.
 *
 * Every rule is a named regex with a fixed or decoded replacement. Rules run in table
 * order: structural tags first, entity decoding after, `&amp;` last so that
 * escaped entities are decoded exactly once.
 */

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;

use crate::model::collapse_whitespace;

/// What a rule puts in place of each match
#[derive(Debug)]
enum Replacement {
    Fixed(&'static str),
    Decoded(fn(&Captures) -> String),
}

/// A single named markup-stripping rule
#[derive(Debug)]
pub struct MarkupRule {
    /// Stable identifier, used by tests and debug logging
    pub name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl MarkupRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        MarkupRule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement: Replacement::Fixed(replacement),
        }
    }

    fn decoded(name: &'static str, pattern: &str, decode: fn(&Captures) -> String) -> Self {
        MarkupRule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement: Replacement::Decoded(decode),
        }
    }

    /// Apply this rule alone
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.replacement {
            Replacement::Fixed(fixed) => self.pattern.replace_all(text, NoExpand(fixed)),
            Replacement::Decoded(decode) => self.pattern.replace_all(text, |caps: &Captures| decode(caps)),
        }
    }
}

// Invalid code points are left as written
fn decode_numeric_entity(caps: &Captures) -> String {
    let code = match (caps.get(1), caps.get(2)) {
        (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
        (None, Some(decimal)) => decimal.as_str().parse::<u32>().ok(),
        (None, None) => None,
    };
    match code.and_then(char::from_u32) {
        Some(c) => c.to_string(),
        None => caps[0].to_string(),
    }
}

/// Static table of markup rules, in application order
pub static MARKUP_RULES: Lazy<Vec<MarkupRule>> = Lazy::new(|| {
    vec![
        // ASS/SSA override blocks: {\an8}, {\i1}, {\c&H00FF00&}
        MarkupRule::new("ass_override", r"\{\\[^}]*\}", ""),

        // ASS/SSA hard line breaks and hard spaces
        MarkupRule::new("ass_hard_break", r"\\[Nnh]", " "),

        // Explicit line break tags in SRT/TTML bodies
        MarkupRule::new("break_tag", r"(?i)<br\s*/?>", " "),

        // Inline karaoke-style timestamps from auto captions: <00:00:01.000>
        MarkupRule::new("inline_timestamp", r"<\d{1,2}:\d{2}(?::\d{2})?[.,]\d{1,3}>", ""),

        // HTML-like tags: <i>, </b>, <font color="..">, <c.colorE5E5E5>, <span ..>
        MarkupRule::new("html_tag", r"</?[A-Za-z][^<>]*>", ""),

        // Raw line breaks inside a cue
        MarkupRule::new("line_break", r"\r\n|\r|\n", " "),

        // Numeric character references: &#8217; &#x2019;
        MarkupRule::decoded("entity_numeric", r"&#(?:[xX]([0-9A-Fa-f]{1,6})|([0-9]{1,7}));", decode_numeric_entity),

        // Encoding artifacts: BOM, zero-width characters, soft hyphen
        MarkupRule::new("invisible", "[\u{FEFF}\u{200B}\u{200C}\u{200D}\u{2060}\u{00AD}]", ""),

        MarkupRule::new("entity_nbsp", r"&nbsp;|\u{00A0}", " "),
        MarkupRule::new("entity_lt", r"&lt;", "<"),
        MarkupRule::new("entity_gt", r"&gt;", ">"),
        MarkupRule::new("entity_quot", r"&quot;", "\""),
        MarkupRule::new("entity_apos", r"&#39;|&apos;", "'"),
        MarkupRule::new("entity_amp", r"&amp;", "&"),
    ]
});

/// Look up a rule by name
pub fn rule(name: &str) -> Option<&'static MarkupRule> {
    MARKUP_RULES.iter().find(|rule| rule.name == name)
}

/// Strip all markup and collapse whitespace to single spaces
pub fn strip_markup(text: &str) -> String {
    let mut current = text.to_string();
    for rule in MARKUP_RULES.iter() {
        if let Cow::Owned(replaced) = rule.apply(&current) {
            current = replaced;
        }
    }
    collapse_whitespace(&current)
}
