//! Legal indicator values for holdings caption and data fields.
//!
//! | field | first indicator | second indicator |
//! |---|---|---|
//! | 853, 854 | compressibility `0`-`3` | caption evaluation `0`-`3` |
//! | 855 | undefined | undefined |
//! | 863-865 | encoding level blank, `3`, `4`, `5` | form of holdings blank, `0`-`4` |

use crate::record::Field;
use crate::warning::{FieldWarning, WarningKind};

/// Validation rule for a single indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorValidation {
    /// Indicator is undefined; blank is required
    Undefined,
    /// Indicator must be one of the specified values
    Values(&'static [char]),
    /// Indicator must be a digit within the specified range
    DigitRange {
        /// Minimum digit value
        min: u8,
        /// Maximum digit value
        max: u8,
    },
}

impl IndicatorValidation {
    /// Check if the given character is valid for this indicator
    #[must_use]
    pub fn is_valid(&self, c: char) -> bool {
        match self {
            IndicatorValidation::Undefined => c == ' ' || c == '#',
            IndicatorValidation::Values(values) => values.contains(&c),
            IndicatorValidation::DigitRange { min, max } => c
                .to_digit(10)
                .is_some_and(|d| d >= u32::from(*min) && d <= u32::from(*max)),
        }
    }
}

/// Validation rules for a field's indicators
#[derive(Debug, Clone, Copy)]
pub struct IndicatorRules {
    /// Tag this rule applies to
    pub tag: &'static str,
    /// Validation for first indicator
    pub indicator1: IndicatorValidation,
    /// Validation for second indicator
    pub indicator2: IndicatorValidation,
}

const CAPTION_RULE: (IndicatorValidation, IndicatorValidation) = (
    IndicatorValidation::DigitRange { min: 0, max: 3 },
    IndicatorValidation::DigitRange { min: 0, max: 3 },
);

const DATA_RULE: (IndicatorValidation, IndicatorValidation) = (
    IndicatorValidation::Values(&[' ', '3', '4', '5']),
    IndicatorValidation::Values(&[' ', '0', '1', '2', '3', '4']),
);

const RULES: [IndicatorRules; 6] = [
    IndicatorRules { tag: "853", indicator1: CAPTION_RULE.0, indicator2: CAPTION_RULE.1 },
    IndicatorRules { tag: "854", indicator1: CAPTION_RULE.0, indicator2: CAPTION_RULE.1 },
    IndicatorRules {
        tag: "855",
        indicator1: IndicatorValidation::Undefined,
        indicator2: IndicatorValidation::Undefined,
    },
    IndicatorRules { tag: "863", indicator1: DATA_RULE.0, indicator2: DATA_RULE.1 },
    IndicatorRules { tag: "864", indicator1: DATA_RULE.0, indicator2: DATA_RULE.1 },
    IndicatorRules { tag: "865", indicator1: DATA_RULE.0, indicator2: DATA_RULE.1 },
];

/// Rules for a holdings tag, if it has any.
#[must_use]
pub fn rules_for(tag: &str) -> Option<&'static IndicatorRules> {
    RULES.iter().find(|r| r.tag == tag)
}

/// Check both indicators of a field, one warning per bad position.
#[must_use]
pub fn validate(field: &Field) -> Vec<FieldWarning> {
    let Some(rules) = rules_for(&field.tag) else {
        return Vec::new();
    };
    [
        (1, field.indicator1, rules.indicator1),
        (2, field.indicator2, rules.indicator2),
    ]
    .into_iter()
    .filter(|(_, value, rule)| !rule.is_valid(*value))
    .map(|(position, value, _)| {
        FieldWarning::new(
            WarningKind::IllegalIndicator,
            format!("field {}: indicator {position} '{value}' is not allowed", field.tag),
        )
    })
    .collect()
}
