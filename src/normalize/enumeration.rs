//! Volume, number and part words folded to MARC caption abbreviations.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// One family of enumeration words that share a caption.
struct EnumerationRule {
    pattern: Regex,
    caption: &'static str,
}

impl EnumerationRule {
    /// `words` may stand alone; `short` (one- or two-letter forms such as
    /// `no` or `v`) are only captions when a number follows.
    fn new(words: &str, short: &str, caption: &'static str) -> Self {
        Self::build(words, short, None, caption)
    }

    /// Like [`EnumerationRule::new`], plus `numbered` words that are also
    /// ordinary prose words (Spanish and Italian `del`) and only count as a
    /// caption before a number of at most three digits.
    fn with_numbered(words: &str, short: &str, numbered: &str, caption: &'static str) -> Self {
        Self::build(words, short, Some(numbered), caption)
    }

    fn build(words: &str, short: &str, numbered: Option<&str>, caption: &'static str) -> Self {
        let mut alternatives = format!(r"(?:{words})\b\.?(?:\s*(\d))?|(?:{short})\b\.?\s*(\d)");
        if let Some(numbered) = numbered {
            alternatives.push_str(&format!(r"|(?:{numbered})\b\.?\s*(\d{{1,3}})\b"));
        }
        let pattern =
            Regex::new(&format!(r"(?i)\b(?:{alternatives})")).expect("valid enumeration regex");
        EnumerationRule { pattern, caption }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let digit = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .or_else(|| caps.get(3))
                    .map_or("", |m| m.as_str());
                format!("{}{digit}", self.caption)
            })
            .into_owned()
    }
}

lazy_static! {
    static ref RULES: Vec<EnumerationRule> = vec![
        EnumerationRule::new(
            "volumes|volume|vols|vol|bände|baende|band|bd|tomes|tome|tomo|jahrgang|jahrg|jg|deel|svazek|årgang|argang|annata",
            "v|t",
            "v.",
        ),
        EnumerationRule::new(
            "numbers|number|numéros|numéro|numeros|numero|número|nummer|heft|hefte|hft|fascicule|fasc|číslo|cislo|issue|iss",
            "nos|no|nr|n",
            "no.",
        ),
        EnumerationRule::with_numbered(
            "parts|part|teil|theil|partie|parte",
            "pts|pt",
            "del",
            "pt.",
        ),
    ];
    static ref MULTISPACE: Regex = Regex::new(r"[ \t]{2,}").expect("valid regex");
    static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r"\s+([,;:)])").expect("valid regex");
}

/// Fold enumeration words to `v.`, `no.` and `pt.` and tidy spacing.
///
/// Full words convert anywhere (`"Band"` → `"v."`); short forms such as `no`
/// or `v` convert only when followed by a number, so prose like "no issues"
/// survives.
///
/// # Examples
///
/// ```
/// use serial_holdings::normalize::normalize_enumeration;
///
/// assert_eq!(normalize_enumeration("Band 12, Heft 3"), "v.12, no.3");
/// assert_eq!(normalize_enumeration("vol. 5 no 2"), "v.5 no.2");
/// assert_eq!(normalize_enumeration("no issues published"), "no issues published");
/// ```
#[must_use]
pub fn normalize_enumeration(text: &str) -> String {
    let mut out = text.to_string();
    for rule in RULES.iter() {
        out = rule.apply(&out);
    }
    let out = MULTISPACE.replace_all(&out, " ");
    SPACE_BEFORE_PUNCT.replace_all(&out, "$1").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_words() {
        assert_eq!(normalize_enumeration("Band"), "v.");
        assert_eq!(normalize_enumeration("Bd. 4"), "v.4");
        assert_eq!(normalize_enumeration("tome 2"), "v.2");
        assert_eq!(normalize_enumeration("Jahrgang 1"), "v.1");
        assert_eq!(normalize_enumeration("v. 21"), "v.21");
    }

    #[test]
    fn test_number_words() {
        assert_eq!(normalize_enumeration("Heft 7"), "no.7");
        assert_eq!(normalize_enumeration("Nr. 12"), "no.12");
        assert_eq!(normalize_enumeration("no 3"), "no.3");
        assert_eq!(normalize_enumeration("numéro 4"), "no.4");
    }

    #[test]
    fn test_part_words() {
        assert_eq!(normalize_enumeration("Teil 2"), "pt.2");
        assert_eq!(normalize_enumeration("pt 2"), "pt.2");
        assert_eq!(normalize_enumeration("del 2"), "pt.2");
    }

    #[test]
    fn test_del_as_prose_untouched() {
        assert_eq!(normalize_enumeration("Boletín del Museo"), "Boletín del Museo");
        assert_eq!(
            normalize_enumeration("Atti del congresso del 1990"),
            "Atti del congresso del 1990"
        );
    }

    #[test]
    fn test_short_forms_need_a_number() {
        assert_eq!(normalize_enumeration("t"), "t");
        assert_eq!(normalize_enumeration("n"), "n");
        assert_eq!(normalize_enumeration("Pt Reyes"), "Pt Reyes");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_enumeration("v.21:no.3 (1988:Mar)-v.25 (1992)");
        assert_eq!(once, "v.21:no.3 (1988:Mar)-v.25 (1992)");
        assert_eq!(normalize_enumeration(&once), once);
    }

    #[test]
    fn test_spacing() {
        assert_eq!(normalize_enumeration("v.1  ,  no.2"), "v.1, no.2");
    }
}
