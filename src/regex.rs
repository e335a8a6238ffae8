//! Regex backend selection: the full `regex` crate by default, `regex-lite`
//! with the `lite` feature.

#[cfg(feature = "regex")]
pub(crate) use ::regex::Regex;

#[cfg(all(feature = "lite", not(feature = "regex")))]
pub(crate) use ::regex_lite::Regex;
