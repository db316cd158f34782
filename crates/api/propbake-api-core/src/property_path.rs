//! PropertyPath encoding and decoding.
//!
//! A path is the ordered list of structural identifiers (host match names)
//! leading from a layer's root down to one property, joined with `|`:
//!   "ADBE Transform Group|ADBE Opacity"
//!   "ADBE Effect Parade|ADBE Slider Control|ADBE Slider Control-0001"
//!
//! The essential-properties namespace has no structural identifiers, so its
//! entries are addressed by display name behind a fixed marker segment:
//!   "Essential|Slider"
//!
//! Segments are assumed to never contain the delimiter; the host's own
//! identifiers guarantee this and it is not checked on encode. Empty segments
//! are legal and survive a round trip ("a||b" has three segments). The only
//! sequence that does not is a lone empty segment, which encodes to the empty
//! string, the root path.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between path segments.
pub const SEGMENT_DELIMITER: char = '|';

/// Leading segment of paths addressing the essential-properties namespace.
pub const ESSENTIAL_MARKER: &str = "Essential";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty property path")]
    Empty,
    #[error("'{0}' is not an essential property path")]
    NotEssential(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// The root path (no segments). Never resolves to a property by itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Sentinel path `[ESSENTIAL_MARKER, name]` for an essential property.
    pub fn essential(name: impl Into<String>) -> Self {
        Self {
            segments: vec![ESSENTIAL_MARKER.to_string(), name.into()],
        }
    }

    /// Decode a `|`-joined path string. Only the empty string is rejected.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self::from_segments(s.split(SEGMENT_DELIMITER)))
    }

    /// Path of a direct child: this path plus one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Name addressed by a sentinel path, or `None` for structural paths.
    pub fn essential_name(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [marker, name] if marker == ESSENTIAL_MARKER => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_essential(&self) -> bool {
        self.essential_name().is_some()
    }

    /// False only for paths that encode to the empty string.
    pub fn is_encodable(&self) -> bool {
        match self.segments.as_slice() {
            [] => false,
            [only] => !only.is_empty(),
            _ => true,
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.segments {
            if !first {
                write!(f, "{SEGMENT_DELIMITER}")?;
            }
            f.write_str(seg)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for PropertyPath {
    type Err = PathError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyPath::parse(s)
    }
}

// Serde support: serialize as the encoded string
impl Serialize for PropertyPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D>(deserializer: D) -> Result<PropertyPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PropertyPath::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_structural() {
        let p = PropertyPath::parse("ADBE Transform Group|ADBE Opacity").unwrap();
        assert_eq!(
            p.segments().collect::<Vec<_>>(),
            vec!["ADBE Transform Group", "ADBE Opacity"]
        );
        assert_eq!(p.to_string(), "ADBE Transform Group|ADBE Opacity");
        assert!(!p.is_essential());
    }

    #[test]
    fn child_appends_segment() {
        let p = PropertyPath::root()
            .child("ADBE Effect Parade")
            .child("ADBE Slider Control");
        assert_eq!(p.len(), 2);
        assert_eq!(p.last_segment(), Some("ADBE Slider Control"));
        assert_eq!(p.to_string(), "ADBE Effect Parade|ADBE Slider Control");
    }

    #[test]
    fn essential_sentinel_shares_codec() {
        let p = PropertyPath::essential("Slider");
        assert_eq!(p.to_string(), "Essential|Slider");
        let back = PropertyPath::parse("Essential|Slider").unwrap();
        assert_eq!(back, p);
        assert_eq!(back.essential_name(), Some("Slider"));
    }

    #[test]
    fn essential_name_requires_exact_sentinel_shape() {
        assert_eq!(PropertyPath::parse("Essential").unwrap().essential_name(), None);
        assert_eq!(
            PropertyPath::parse("Essential|a|b").unwrap().essential_name(),
            None
        );
        assert_eq!(
            PropertyPath::parse("Other|Slider").unwrap().essential_name(),
            None
        );
    }

    #[test]
    fn parse_rejects_only_empty_string() {
        assert_eq!(PropertyPath::parse(""), Err(PathError::Empty));
        assert_eq!(PropertyPath::parse("a||b").unwrap().len(), 3);
        assert_eq!(
            PropertyPath::parse("a|").unwrap(),
            PropertyPath::from_segments(["a", ""])
        );
        assert_eq!(PropertyPath::parse("|").unwrap().len(), 2);
    }

    #[test]
    fn empty_segments_round_trip() {
        let cases = [
            PropertyPath::root().child("ADBE Effect Parade").child(""),
            PropertyPath::from_segments(["", "ADBE Opacity"]),
            PropertyPath::from_segments(["a", "", "b"]),
            PropertyPath::from_segments(["", ""]),
        ];
        for p in cases {
            assert!(p.is_encodable());
            let back = PropertyPath::parse(&p.to_string()).unwrap();
            assert_eq!(back, p, "{p}");
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(serde_json::from_str::<PropertyPath>(&json).unwrap(), p);
        }
    }

    #[test]
    fn lone_empty_segment_is_not_encodable() {
        assert!(!PropertyPath::root().is_encodable());
        assert!(!PropertyPath::root().child("").is_encodable());
        assert!(PropertyPath::root().child("x").is_encodable());
    }

    #[test]
    fn serde_as_string() {
        let p = PropertyPath::from_segments(["ADBE Transform Group", "ADBE Position"]);
        let s = serde_json::to_string(&p).unwrap();
        assert_eq!(s, "\"ADBE Transform Group|ADBE Position\"");
        let back: PropertyPath = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<PropertyPath>("\"\"").is_err());
    }
}
