//! Supported locales and `Accept-Language` negotiation

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// BCP 47-ish language range as it appears in `Accept-Language`
static LANGUAGE_RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\*|[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*)$").unwrap());

/// Locales with a message catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Tr];

    /// Primary language subtag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }

    /// Match a language tag by its primary subtag (`tr-TR` -> `Tr`)
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split('-').next()?.trim();

        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(primary))
    }

    /// Pick the best supported locale from an `Accept-Language` header value.
    ///
    /// Entries are ordered by their `q` weight (ties keep header order);
    /// `q=0`, malformed entries and unsupported languages are skipped.
    pub fn negotiate(header: &str) -> Option<Self> {
        let mut ranges: Vec<(&str, f32)> = header
            .split(',')
            .filter_map(parse_language_range)
            .filter(|(_, q)| *q > 0.0)
            .collect();

        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges.into_iter().find_map(|(tag, _)| Self::from_tag(tag))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

fn parse_language_range(entry: &str) -> Option<(&str, f32)> {
    let mut parts = entry.split(';').map(str::trim);
    let tag = parts.next().filter(|t| LANGUAGE_RANGE_PATTERN.is_match(t))?;
    let mut quality = 1.0;

    for param in parts {
        if let Some(value) = param.strip_prefix("q=") {
            quality = value.parse::<f32>().ok().filter(|q| (0.0..=1.0).contains(q))?;
        }
    }

    Some((tag, quality))
}
