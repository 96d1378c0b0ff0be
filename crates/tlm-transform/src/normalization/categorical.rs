//! Categorical token vocabularies.
//!
//! Some telemetry channels report states as short string tokens. Tokens are
//! matched exactly (case-sensitive) and replaced by small integer codes. The
//! same codes are published as `state_<token>` attributes on every dataset
//! whose category names one of the known channels, so readers can decode the
//! stored numbers without this table.

use std::collections::BTreeMap;

/// Token to code table shared by the scalar normalizer and the state
/// attributes.
const TOKEN_CODES: &[(&str, u8)] = &[
    // boolean words
    ("true", 1),
    ("TRUE", 1),
    ("True", 1),
    ("false", 0),
    ("FALSE", 0),
    ("False", 0),
    // driver activity: upper case starts a period, lower case continues it
    ("R", 1), // rest
    ("r", 0),
    ("D", 7), // driving
    ("d", 6),
    ("W", 5), // working
    ("w", 4),
    ("A", 3), // available
    ("a", 2),
    // ignition
    ("ON", 1),
    ("OFF", 0),
];

/// Looks up the numeric code of a categorical token.
pub fn token_code(token: &str) -> Option<u8> {
    TOKEN_CODES
        .iter()
        .find(|(candidate, _)| *candidate == token)
        .map(|(_, code)| *code)
}

/// State attributes injected for categories containing `pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalEncoding {
    /// Substring matched against the record category.
    pub pattern: &'static str,
    /// Tokens published as `state_<token>` attributes.
    pub tokens: &'static [&'static str],
}

impl CategoricalEncoding {
    pub fn matches(&self, category: &str) -> bool {
        category.contains(self.pattern)
    }

    /// `(state_<token>, code)` pairs for this encoding.
    pub fn state_attributes(&self) -> impl Iterator<Item = (String, u8)> + '_ {
        self.tokens
            .iter()
            .filter_map(|token| token_code(token).map(|code| (format!("state_{token}"), code)))
    }
}

/// Known categorical channels.
pub const CATEGORICAL_ENCODINGS: &[CategoricalEncoding] = &[
    CategoricalEncoding {
        pattern: "s3p.activity",
        tokens: &["R", "r", "D", "d", "W", "w", "A", "a"],
    },
    CategoricalEncoding {
        pattern: "s3p.cruiseControlActive",
        tokens: &["TRUE", "OFF"],
    },
    CategoricalEncoding {
        pattern: "s3p.ignition",
        tokens: &["ON", "OFF"],
    },
];

/// Merges the state attributes of every matching encoding into `attributes`.
///
/// Matching is by substring and non-exclusive. Injected keys overwrite
/// existing ones. Returns the number of attributes written.
pub fn apply_state_attributes(category: &str, attributes: &mut BTreeMap<String, u8>) -> usize {
    let mut written = 0;
    for encoding in CATEGORICAL_ENCODINGS
        .iter()
        .filter(|encoding| encoding.matches(category))
    {
        for (key, code) in encoding.state_attributes() {
            attributes.insert(key, code);
            written += 1;
        }
    }
    written
}
