//! Ordered text rewrites applied to a fixed point.
//!
//! Holdings text is full of numbers that look like years and are not:
//! volume and issue numbers, page counts, reel numbers, series ordinals,
//! barcodes. The cleanup battery blanks them out before any year is read.
//! It is deliberately lossy; a `v.1990` volume numbered by year is dropped
//! along with every other volume number.
//!
//! Volume numbers and days of the month leave a `#` behind rather than
//! vanishing, so `v.1 (1990)-v.10` still reads as a closed range with an
//! unknown end instead of an open one.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Upper bound on repetitions of a single rewrite pass.
pub const MAX_REWRITE_PASSES: usize = 64;

/// Apply `replace` to every match of `pattern` until the text stops changing.
///
/// Returns the rewritten text and whether the cap was hit with the text still
/// changing.
pub(crate) fn rewrite_to_fixed_point<F>(
    name: &str,
    pattern: &Regex,
    text: String,
    mut replace: F,
) -> (String, bool)
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut current = text;
    for _ in 0..MAX_REWRITE_PASSES {
        let next = pattern
            .replace_all(&current, |caps: &Captures<'_>| replace(caps))
            .into_owned();
        if next == current {
            return (current, false);
        }
        current = next;
    }
    let next = pattern
        .replace_all(&current, |caps: &Captures<'_>| replace(caps))
        .into_owned();
    let truncated = next != current;
    if truncated {
        tracing::warn!(
            pass = name,
            cap = MAX_REWRITE_PASSES,
            "rewrite pass stopped before reaching a fixed point"
        );
    }
    (current, truncated)
}

/// A named `(pattern, replacement)` rewrite. The replacement may use `$1`
/// style group references.
#[derive(Debug)]
pub struct RewritePass {
    /// Short name used in log output
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl RewritePass {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        RewritePass {
            name,
            pattern: Regex::new(pattern).expect("cleanup pattern is valid"),
            replacement,
        }
    }

    /// Apply the pass to a fixed point.
    #[must_use]
    pub fn apply(&self, text: String) -> (String, bool) {
        rewrite_to_fixed_point(self.name, &self.pattern, text, |caps| {
            let mut out = String::new();
            caps.expand(self.replacement, &mut out);
            out
        })
    }
}

pub(super) const MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

lazy_static! {
    /// The cleanup battery, in application order.
    pub static ref CLEANUP_PASSES: Vec<RewritePass> = vec![
        RewritePass::new(
            "day after month",
            &format!(r"\b({MONTHS})\.?\s+\d{{1,2}}(?:/\d{{1,2}})?\b"),
            "$1 #",
        ),
        RewritePass::new(
            "day before month",
            &format!(r"\b\d{{1,2}}(?:/\d{{1,2}})?\s+({MONTHS})\b"),
            "# $1",
        ),
        RewritePass::new(
            "parenthetical index note",
            r"(?i)\([^()]*\b(?:index|indexes|indices|suppl|supplement|supplements)\b[^()]*\)",
            " ",
        ),
        RewritePass::new(
            "series ordinal",
            r"(?i)\b\d{1,3}\s*(?:st|nd|rd|th|d|e|er|re|eme|ème)?\.?\s*(?:ser|series|s[eé]rie|folge|reihe)\b\.?",
            " ",
        ),
        RewritePass::new(
            "numbered unit",
            r"(?i)\b(?:v|vol|vols|no|nos|nr|n|pt|pts|t|bd|jahrg|jg|heft|iss|issue|ser|reel|reels|fiche|fiches|box|fasc|sect|sec|copy|cop|p|pp|page|pages)\.?\s*\d+(?:\s*[-/]\s*\d+)*",
            "#",
        ),
        RewritePass::new(
            "counted quantity",
            r"(?i)\b\d+\s*(?:copies|cm|mm|pages|pp|issues|items|leaves|sheets|maps|reels|fiches|microfiches)\b\.?",
            " ",
        ),
        RewritePass::new("long number", r"\d{5,}", " "),
        RewritePass::new("whitespace", r"\s{2,}", " "),
    ];
}

/// Run the whole battery. The flag is set if any pass hit the cap.
#[must_use]
pub fn clean_holdings_text(text: &str) -> (String, bool) {
    CLEANUP_PASSES
        .iter()
        .fold((text.to_string(), false), |(text, truncated), pass| {
            let (text, hit_cap) = pass.apply(text);
            (text, truncated || hit_cap)
        })
}
