//! Cleanup and validation of serial identifiers found in MARC records.
//!
//! - OCLC numbers arrive with `ocm`/`ocn` prefixes, `(OCoLC)` markers,
//!   leading zeros and stray punctuation.
//! - ISSNs arrive with or without the dash, sometimes several run together,
//!   sometimes still carrying a subfield marker.
//! - LCCNs arrive with blanks, hyphens and revision suffixes.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OCLC_MARKER: Regex =
        Regex::new(r"(?i)[\(\[]\s*oc(?:o)?lc\s*[\)\]]").expect("valid regex");
    static ref OCLC_PREFIX: Regex = Regex::new(r"(?i)\b(?:ocm|ocn|on)").expect("valid regex");
    static ref SUBFIELD_MARKER: Regex = Regex::new(r"^\s*[$‡|][a-z]\s*").expect("valid regex");
    static ref ISSN_SHAPE: Regex =
        Regex::new(r"(?:^|\D)(\d{4}-?\d{3}[\dXx])(?:\D|$)").expect("valid regex");
}

/// Reduce an OCLC number to its significant digits.
///
/// Strips quotes, `(OCoLC)`/`[OCLC]` markers (any case), `ocm`/`ocn`/`on`
/// prefixes, slashes, every other non-digit, and leading zeros. Returns an
/// empty string when no significant digit is left.
///
/// # Examples
///
/// ```
/// use serial_holdings::identifiers::clean_oclc_number;
///
/// assert_eq!(clean_oclc_number("(OCoLC)ocm00012345"), "12345");
/// assert_eq!(clean_oclc_number("\"ocn987654321\""), "987654321");
/// assert_eq!(clean_oclc_number("none"), "");
/// ```
#[must_use]
pub fn clean_oclc_number(input: &str) -> String {
    let text = input.replace(['"', '\''], "");
    let text = OCLC_MARKER.replace_all(&text, "");
    let text = OCLC_PREFIX.replace_all(&text, "");
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').to_string()
}

/// Normalize an ISSN to `dddd-dddd`, or return an empty string.
///
/// A leading subfield marker (`$a`) is dropped, the first ISSN-shaped run is
/// taken when several are concatenated, short values are left-padded with
/// zeros. Anything longer than eight characters, or with a non-digit before
/// the check character, yields `""`.
///
/// # Examples
///
/// ```
/// use serial_holdings::identifiers::format_issn;
///
/// assert_eq!(format_issn("00280836"), "0028-0836");
/// assert_eq!(format_issn("$a0028-0836"), "0028-0836");
/// assert_eq!(format_issn("1234-567x 2345-6789"), "1234-567X");
/// assert_eq!(format_issn("280836"), "0028-0836");
/// assert_eq!(format_issn("ab12-3456"), "");
/// ```
#[must_use]
pub fn format_issn(input: &str) -> String {
    let text = SUBFIELD_MARKER.replace(input, "");
    let candidate: String = match ISSN_SHAPE.captures(&text) {
        Some(caps) => caps[1].to_string(),
        None => text.chars().filter(|c| !matches!(c, '-' | ' ')).collect(),
    };
    if candidate.is_empty() {
        return String::new();
    }
    let mut clean = candidate.replace('-', "").to_uppercase();
    let len = clean.chars().count();
    if len > 8 {
        return String::new();
    }
    if len < 8 {
        clean = format!("{}{clean}", "0".repeat(8 - len));
    }
    let (body, check) = clean.split_at(7);
    if !body.chars().all(|c| c.is_ascii_digit()) {
        return String::new();
    }
    if !check.chars().all(|c| c.is_ascii_digit() || c == 'X') {
        return String::new();
    }
    format!("{}-{}{check}", &body[..4], &body[4..])
}

/// Check an ISSN's ISO 3297 check digit.
///
/// Weights 8 down to 2 apply to the first seven digits; the check character is
/// `11 - (sum mod 11)`, where 11 becomes `0` and 10 becomes `X`.
///
/// # Examples
///
/// ```
/// use serial_holdings::identifiers::validate_issn_checksum;
///
/// assert!(validate_issn_checksum("0028-0836"));
/// assert!(validate_issn_checksum("2049-3630"));
/// assert!(!validate_issn_checksum("0028-0837"));
/// ```
#[must_use]
pub fn validate_issn_checksum(issn: &str) -> bool {
    let clean = issn.replace('-', "");
    if clean.chars().count() != 8 {
        return false;
    }

    let mut sum = 0;
    for (i, ch) in clean.chars().take(7).enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        sum += digit * (8 - u32::try_from(i).unwrap_or(0));
    }

    let expected = match 11 - (sum % 11) {
        11 => '0',
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('?'),
    };
    clean
        .chars()
        .last()
        .is_some_and(|c| c.to_ascii_uppercase() == expected)
}

/// Normalize an LCCN following the Library of Congress rules: blanks removed,
/// anything from `/` on dropped, and a hyphenated serial part zero-padded to
/// six digits.
///
/// # Examples
///
/// ```
/// use serial_holdings::identifiers::normalize_lccn;
///
/// assert_eq!(normalize_lccn("   85-2 "), "85000002");
/// assert_eq!(normalize_lccn("sn 78-5432 /r86"), "sn78005432");
/// assert_eq!(normalize_lccn("2001000002"), "2001000002");
/// ```
#[must_use]
pub fn normalize_lccn(input: &str) -> String {
    let mut lccn: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(slash) = lccn.find('/') {
        lccn.truncate(slash);
    }
    if let Some((prefix, serial)) = lccn.split_once('-') {
        if !serial.is_empty() && serial.chars().all(|c| c.is_ascii_digit()) {
            return format!("{prefix}{serial:0>6}");
        }
    }
    lccn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_oclc_variants() {
        assert_eq!(clean_oclc_number("ocm01234567"), "1234567");
        assert_eq!(clean_oclc_number("ocn123456789"), "123456789");
        assert_eq!(clean_oclc_number("on1234567890"), "1234567890");
        assert_eq!(clean_oclc_number("(OCoLC)12345"), "12345");
        assert_eq!(clean_oclc_number("(ocolc)12345"), "12345");
        assert_eq!(clean_oclc_number("[OCLC] 00042"), "42");
        assert_eq!(clean_oclc_number("12/34\\5"), "12345");
        assert_eq!(clean_oclc_number(""), "");
        assert_eq!(clean_oclc_number("0000"), "");
    }

    #[test]
    fn test_format_issn() {
        assert_eq!(format_issn("0028-0836"), "0028-0836");
        assert_eq!(format_issn(" 0028 0836 "), "0028-0836");
        assert_eq!(format_issn("123456789"), "");
        assert_eq!(format_issn("1234567X"), "1234-567X");
        assert_eq!(format_issn(""), "");
        assert_eq!(format_issn("12X45678"), "");
    }

    #[test]
    fn test_issn_checksum_examples() {
        assert!(validate_issn_checksum("0317-8471"));
        assert!(validate_issn_checksum("1050-124X"));
        assert!(validate_issn_checksum("1050-124x"));
        assert!(!validate_issn_checksum("1050-1241"));
        assert!(!validate_issn_checksum("0317-847"));
        assert!(!validate_issn_checksum("A317-8471"));
    }

    #[test]
    fn test_formatted_issn_validates() {
        for issn in ["0028-0836", "0317-8471", "1050-124X", "2049-3630"] {
            assert!(validate_issn_checksum(&format_issn(issn)), "{issn}");
        }
    }

    #[test]
    fn test_normalize_lccn() {
        assert_eq!(normalize_lccn("n78-890351"), "n78890351");
        assert_eq!(normalize_lccn("n78-89035"), "n78089035");
        assert_eq!(normalize_lccn("n 78890351 "), "n78890351");
        assert_eq!(normalize_lccn(" 85000002 "), "85000002");
        assert_eq!(normalize_lccn("75-425165//r75"), "75425165");
    }
}
