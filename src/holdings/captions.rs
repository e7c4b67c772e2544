//! Caption definitions read from 853/854/855.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pair of caption/data tags a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionGroup {
    /// 853 captions, 863 data
    Basic,
    /// 854 captions, 864 data
    Supplement,
    /// 855 captions, 865 data
    Index,
}

impl CaptionGroup {
    /// Group defined by a caption tag (853-855).
    #[must_use]
    pub fn from_caption_tag(tag: &str) -> Option<Self> {
        match tag {
            "853" => Some(Self::Basic),
            "854" => Some(Self::Supplement),
            "855" => Some(Self::Index),
            _ => None,
        }
    }

    /// Group a data tag (863-865) reads its captions from.
    #[must_use]
    pub fn from_data_tag(tag: &str) -> Option<Self> {
        match tag {
            "863" => Some(Self::Basic),
            "864" => Some(Self::Supplement),
            "865" => Some(Self::Index),
            _ => None,
        }
    }

    /// The 85x tag.
    #[must_use]
    pub const fn caption_tag(&self) -> &'static str {
        match self {
            Self::Basic => "853",
            Self::Supplement => "854",
            Self::Index => "855",
        }
    }

    /// The 86x tag.
    #[must_use]
    pub const fn data_tag(&self) -> &'static str {
        match self {
            Self::Basic => "863",
            Self::Supplement => "864",
            Self::Index => "865",
        }
    }
}

impl fmt::Display for CaptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption_tag())
    }
}

/// Whether a subfield code names a level of enumeration or chronology.
#[must_use]
pub fn is_caption_code(code: char) -> bool {
    ('a'..='m').contains(&code)
}

/// Caption labels keyed by `(group, link)` and then by subfield code.
///
/// Only enumeration (`a`-`h`) and chronology (`i`-`m`) captions are kept;
/// pattern subfields such as `$w` frequency are not captions.
///
/// # Examples
///
/// ```
/// use serial_holdings::holdings::{CaptionGroup, CaptionTable};
///
/// let mut table = CaptionTable::default();
/// table.insert(CaptionGroup::Basic, "1", 'a', "v.");
/// assert_eq!(table.get(CaptionGroup::Basic, "1", 'a'), Some("v."));
/// assert_eq!(table.get(CaptionGroup::Supplement, "1", 'a'), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptionTable {
    captions: IndexMap<(CaptionGroup, String), IndexMap<char, String>>,
}

impl CaptionTable {
    /// Define (or redefine) one caption.
    pub fn insert(&mut self, group: CaptionGroup, link: &str, code: char, label: &str) {
        self.captions
            .entry((group, link.to_string()))
            .or_default()
            .insert(code, label.trim().to_string());
    }

    /// The label for one subfield of one caption set.
    #[must_use]
    pub fn get(&self, group: CaptionGroup, link: &str, code: char) -> Option<&str> {
        self.captions
            .get(&(group, link.to_string()))
            .and_then(|set| set.get(&code))
            .map(String::as_str)
    }

    /// Whether any caption is defined for the set.
    #[must_use]
    pub fn has_link(&self, group: CaptionGroup, link: &str) -> bool {
        self.captions.contains_key(&(group, link.to_string()))
    }

    /// Number of caption sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Forget every caption.
    pub fn clear(&mut self) {
        self.captions.clear();
    }
}
