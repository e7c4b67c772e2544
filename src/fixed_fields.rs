//! Fixed-position data in the 008 and 007 control fields.
//!
//! Positions 00-17 and 35-39 of the 008 mean the same thing for every
//! record. Positions 18-34 depend on the material: for continuing resources
//! 008/18 is frequency, for books it is the first illustration code. The
//! [`layout`] table maps a [`Material`] to the offsets that exist for it.

use crate::leader::Material;

/// Offsets of material-dependent 008 elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFieldLayout {
    /// Form of item
    pub form_of_item: Option<usize>,
    /// Frequency (continuing resources only)
    pub frequency: Option<usize>,
    /// Regularity (continuing resources only)
    pub regularity: Option<usize>,
}

/// 008 layout for a material category.
#[must_use]
pub const fn layout(material: Material) -> FixedFieldLayout {
    match material {
        Material::ContinuingResource => FixedFieldLayout {
            form_of_item: Some(23),
            frequency: Some(18),
            regularity: Some(19),
        },
        Material::Book | Material::Music | Material::Mixed => FixedFieldLayout {
            form_of_item: Some(23),
            frequency: None,
            regularity: None,
        },
        Material::Map | Material::Visual => FixedFieldLayout {
            form_of_item: Some(29),
            frequency: None,
            regularity: None,
        },
        Material::ComputerFile | Material::Unknown => FixedFieldLayout {
            form_of_item: None,
            frequency: None,
            regularity: None,
        },
    }
}

/// Character range of a fixed field, trimmed; empty when the field is short.
#[must_use]
pub fn slice(fixed: &str, start: usize, len: usize) -> String {
    let value: String = fixed.chars().skip(start).take(len).collect();
    if value.chars().count() < len {
        return String::new();
    }
    value.trim().to_string()
}

/// Carrier described by 008 form of item, falling back to 007/00.
///
/// Returns `"print"`, `"microform"`, `"electronic"`, `"braille"`,
/// `"large print"`, or `""` when neither field says anything.
#[must_use]
pub fn carrier(fixed_008: Option<&str>, material: Material, fields_007: &[String]) -> String {
    let from_008 = fixed_008.and_then(|fixed| {
        let offset = layout(material).form_of_item?;
        fixed.chars().nth(offset)
    });
    let word = match from_008 {
        Some('a' | 'b' | 'c') => Some("microform"),
        Some('d') => Some("large print"),
        Some('f') => Some("braille"),
        Some('o' | 'q' | 's') => Some("electronic"),
        Some('r') => Some("print"),
        _ => None,
    };
    if let Some(word) = word {
        return word.to_string();
    }
    let from_007 = fields_007
        .iter()
        .find_map(|f| match f.chars().next() {
            Some('h') => Some("microform"),
            Some('c') => Some("electronic"),
            Some('f') => Some("braille"),
            Some('t') => Some("print"),
            _ => None,
        });
    match (from_007, from_008) {
        (Some(word), _) => word.to_string(),
        // Blank form of item means "none of the above", i.e. ordinary print.
        (None, Some(' ' | '|')) => "print".to_string(),
        _ => String::new(),
    }
}
