//! MARC record leader as it appears in mnemonic text.
//!
//! The leader is the 24-character header on the `=LDR` line. In mnemonic files
//! the record length and base address are usually stale or zeroed, and blanks
//! are written as `\`, so parsing here never fails: short leaders are padded
//! and reported as a warning.
//!
//! # Structure
//!
//! - Positions 0-4: Record length
//! - Position 5: Record status
//! - Position 6: Type of record (a = language material, e = map, ...)
//! - Position 7: Bibliographic level (m = monograph, s = serial, ...)
//! - Position 8: Control record type
//! - Position 9: Character coding (space = MARC-8, a = UTF-8)
//! - Positions 12-16: Base address of data
//! - Positions 17-19: Encoding level, cataloging form, multipart level

use crate::warning::{FieldWarning, WarningKind};
use serde::{Deserialize, Serialize};

/// Length of a complete leader.
pub const LEADER_LEN: usize = 24;

/// MARC leader read from an `=LDR` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    raw: String,
}

/// Broad material category from leader/06 and /07, which selects the 008
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    /// Language material, monographic (a/t with bib level a, c, d, m)
    Book,
    /// Continuing resource (a with bib level b, i, s)
    ContinuingResource,
    /// Cartographic material (e, f)
    Map,
    /// Music and sound recordings (c, d, i, j)
    Music,
    /// Projected, graphic and three-dimensional material (g, k, o, r)
    Visual,
    /// Computer file (m)
    ComputerFile,
    /// Mixed materials (p)
    Mixed,
    /// Anything the leader does not identify
    Unknown,
}

impl Leader {
    /// Parse the text after `=LDR  `.
    ///
    /// `\` is read as a blank. Text shorter than 24 characters is padded with
    /// blanks and a [`WarningKind::ShortLeader`] is returned alongside.
    #[must_use]
    pub fn from_mnemonic(text: &str) -> (Self, Option<FieldWarning>) {
        let mut raw: String = text
            .trim_end_matches(['\r', '\n'])
            .chars()
            .take(LEADER_LEN)
            .map(|c| if c == '\\' { ' ' } else { c })
            .collect();
        let len = raw.chars().count();
        let warning = if len < LEADER_LEN {
            raw.extend(std::iter::repeat(' ').take(LEADER_LEN - len));
            Some(FieldWarning::new(
                WarningKind::ShortLeader,
                format!("leader has {len} characters, expected {LEADER_LEN}"),
            ))
        } else {
            None
        };
        (Leader { raw }, warning)
    }

    /// Character at a leader position, blank when out of range.
    #[must_use]
    pub fn position(&self, index: usize) -> char {
        self.raw.chars().nth(index).unwrap_or(' ')
    }

    /// The full 24-character leader.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Record status (position 5).
    #[must_use]
    pub fn record_status(&self) -> char {
        self.position(5)
    }

    /// Type of record (position 6).
    #[must_use]
    pub fn record_type(&self) -> char {
        self.position(6)
    }

    /// Bibliographic level (position 7).
    #[must_use]
    pub fn bibliographic_level(&self) -> char {
        self.position(7)
    }

    /// Encoding level (position 17).
    #[must_use]
    pub fn encoding_level(&self) -> char {
        self.position(17)
    }

    /// Whether the bibliographic level marks a serial or integrating resource.
    #[must_use]
    pub fn is_continuing_resource(&self) -> bool {
        matches!(self.bibliographic_level(), 'b' | 'i' | 's')
    }

    /// Material category for fixed-field offsets.
    #[must_use]
    pub fn material(&self) -> Material {
        match self.record_type() {
            'a' if self.is_continuing_resource() => Material::ContinuingResource,
            'a' | 't' => Material::Book,
            'e' | 'f' => Material::Map,
            'c' | 'd' | 'i' | 'j' => Material::Music,
            'g' | 'k' | 'o' | 'r' => Material::Visual,
            'm' => Material::ComputerFile,
            'p' => Material::Mixed,
            _ => Material::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_from_mnemonic() {
        let (leader, warning) = Leader::from_mnemonic("00000cas a2200000 a 4500");
        assert!(warning.is_none());
        assert_eq!(leader.record_status(), 'c');
        assert_eq!(leader.record_type(), 'a');
        assert_eq!(leader.bibliographic_level(), 's');
        assert_eq!(leader.material(), Material::ContinuingResource);
    }

    #[test]
    fn test_backslash_is_blank() {
        let (leader, _) = Leader::from_mnemonic(r"00000nam\a2200000\a\4500");
        assert_eq!(leader.position(8), ' ');
        assert_eq!(leader.as_str().len(), 24);
        assert_eq!(leader.material(), Material::Book);
    }

    #[test]
    fn test_short_leader_is_padded() {
        let (leader, warning) = Leader::from_mnemonic("00000ce");
        assert_eq!(leader.as_str().chars().count(), 24);
        assert_eq!(leader.record_type(), 'e');
        assert_eq!(leader.bibliographic_level(), ' ');
        assert_eq!(warning.unwrap().kind, WarningKind::ShortLeader);
    }

    #[test]
    fn test_material_table() {
        let cases = [
            ("00000nem a2200000 a 4500", Material::Map),
            ("00000njm a2200000 a 4500", Material::Music),
            ("00000ngm a2200000 a 4500", Material::Visual),
            ("00000nmm a2200000 a 4500", Material::ComputerFile),
            ("00000npc a2200000 a 4500", Material::Mixed),
            ("00000nai a2200000 a 4500", Material::ContinuingResource),
            ("00000ntm a2200000 a 4500", Material::Book),
            ("00000nzm a2200000 a 4500", Material::Unknown),
        ];
        for (text, expected) in cases {
            assert_eq!(Leader::from_mnemonic(text).0.material(), expected, "{text}");
        }
    }
}
