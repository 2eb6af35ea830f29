//! The textual PULID type and its parsers.

use std::cmp::Ordering;
use std::time::SystemTime;

use ulid::Ulid;

use crate::base32::{self, DecodeMode};
use crate::generator::{self, UlidGenerator};
use crate::PulidError;

/// Separates the prefix from the sortable part.
pub const DELIMITER: char = ':';

/// A prefixed ULID, stored as its text: `{prefix}:{ulid}`.
///
/// Any string converts into a `Pulid` without validation, the same way a
/// value read back from storage does. Use [`parse`] or [`parse_strict`] (or
/// [`str::parse`], which is strict) when the text must be well formed.
///
/// Ordering is byte-wise on the text, so IDs sharing a prefix sort by
/// creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pulid(String);

impl Pulid {
    /// Creates a new ID for `prefix` at the current time using the active
    /// generator.
    ///
    /// The prefix is not validated. A prefix containing [`DELIMITER`] yields
    /// an ID that [`parse`] cannot read back, because the text splits at the
    /// first delimiter.
    pub fn new(prefix: &str) -> Result<Self, PulidError> {
        let ulid = generator::generate_active(prefix, SystemTime::now())?;
        Ok(Self::from_parts(prefix, ulid))
    }

    /// Creates a new ID for `prefix` at the current time using `generator`.
    pub fn new_with(prefix: &str, generator: &dyn UlidGenerator) -> Result<Self, PulidError> {
        Self::new_at(prefix, SystemTime::now(), generator)
    }

    /// Creates a new ID for `prefix` at `timestamp` using `generator`.
    ///
    /// Fails with [`PulidError::TimestampOverflow`] when `timestamp` is past
    /// the 48-bit millisecond range. As with [`Pulid::new`], a prefix
    /// containing [`DELIMITER`] produces an unparseable ID.
    pub fn new_at(
        prefix: &str,
        timestamp: SystemTime,
        generator: &dyn UlidGenerator,
    ) -> Result<Self, PulidError> {
        let ulid = generator.generate(prefix, timestamp)?;
        Ok(Self::from_parts(prefix, ulid))
    }

    /// Joins a prefix and an already generated ULID.
    ///
    /// The prefix must not contain [`DELIMITER`] for the result to parse.
    #[must_use]
    pub fn from_parts(prefix: &str, ulid: Ulid) -> Self {
        Self(format!("{prefix}{DELIMITER}{ulid}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns true for the empty ID, e.g. one scanned from a null value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits into `(prefix, sortable)`. See [`split`].
    #[must_use]
    pub fn parts(&self) -> (&str, &str) {
        split(&self.0)
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.parts().0
    }

    /// Byte-wise comparison of the full text.
    #[must_use]
    pub fn compare(&self, other: &Pulid) -> Ordering {
        self.0.as_bytes().cmp(other.0.as_bytes())
    }

    /// Parses the stored text leniently. See [`parse`].
    pub fn parse(&self) -> Result<ParsedPulid<'_>, PulidError> {
        parse_with(&self.0, DecodeMode::Lenient).map(ParsedPulid::from)
    }

    /// Parses the stored text, accepting only the canonical alphabet. See
    /// [`parse_strict`].
    pub fn parse_strict(&self) -> Result<ParsedPulid<'_>, PulidError> {
        parse_with(&self.0, DecodeMode::Strict).map(ParsedPulid::from)
    }

    /// Decodes the sortable part leniently.
    pub fn ulid(&self) -> Result<Ulid, PulidError> {
        self.parse().map(|parsed| parsed.ulid)
    }

    /// Returns the embedded timestamp in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> Result<u64, PulidError> {
        self.ulid().map(|ulid| ulid.timestamp_ms())
    }
}

/// A validated view of an ID: its prefix and decoded sortable part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedPulid<'a> {
    pub prefix: &'a str,
    pub ulid: Ulid,
}

impl<'a> From<(&'a str, Ulid)> for ParsedPulid<'a> {
    fn from((prefix, ulid): (&'a str, Ulid)) -> Self {
        Self { prefix, ulid }
    }
}

/// Splits an ID at the first [`DELIMITER`].
///
/// Without a delimiter the prefix is empty and the whole input is returned as
/// the sortable part.
#[must_use]
pub fn split(id: &str) -> (&str, &str) {
    id.split_once(DELIMITER).unwrap_or(("", id))
}

/// Parses an ID, canonicalizing look-alike characters in the sortable part.
///
/// Fails with [`PulidError::MissingPrefix`] when the prefix is empty and with
/// [`PulidError::InvalidLength`] when the sortable part is not 26 characters.
pub fn parse(id: &str) -> Result<(&str, Ulid), PulidError> {
    parse_with(id, DecodeMode::Lenient)
}

/// Parses an ID, accepting only the canonical base32 alphabet.
///
/// Like [`parse`], but look-alikes such as `O` fail with
/// [`PulidError::InvalidCharacter`]. Use this for untrusted input.
pub fn parse_strict(id: &str) -> Result<(&str, Ulid), PulidError> {
    parse_with(id, DecodeMode::Strict)
}

fn parse_with(id: &str, mode: DecodeMode) -> Result<(&str, Ulid), PulidError> {
    let (prefix, sortable) = split(id);
    if prefix.is_empty() {
        return Err(PulidError::MissingPrefix);
    }

    let ulid = base32::decode(sortable, mode)?;
    Ok((prefix, ulid))
}

impl std::fmt::Display for Pulid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Pulid {
    type Err = PulidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_strict(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for Pulid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Pulid {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<Pulid> for String {
    fn from(id: Pulid) -> Self {
        id.0
    }
}

impl AsRef<str> for Pulid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Pulid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Pulid {
    /// Accepts a string or null; null yields the empty ID.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self(s.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{DeterministicGenerator, MonotonicGenerator};
    use rstest::rstest;

    const VALID: &str = "01FD7SJ7J006AFVGQT5ZYC0GEK";

    #[test]
    fn test_split() {
        assert_eq!(split("AA:01FD7SJ7J006AFVGQT5ZYC0GEK"), ("AA", VALID));
        assert_eq!(split(VALID), ("", VALID));
        assert_eq!(split(""), ("", ""));
        assert_eq!(split(":x"), ("", "x"));
        // Only the first delimiter splits.
        assert_eq!(split("A:B:C"), ("A", "B:C"));
    }

    #[test]
    fn test_parts_and_prefix() {
        let id = Pulid::from("USR:01FD7SJ7J006AFVGQT5ZYC0GEK");
        assert_eq!(id.parts(), ("USR", VALID));
        assert_eq!(id.prefix(), "USR");
    }

    #[rstest]
    #[case("AA", VALID)]
    #[case("B", VALID)]
    #[case("LONGPREFIX", "7ZZZZZZZZZZZZZZZZZZZZZZZZZ")]
    #[case("CC", "00000000000000000000000000")]
    fn test_parse_valid(#[case] prefix: &str, #[case] sortable: &str) {
        let input = format!("{prefix}:{sortable}");
        for (got_prefix, ulid) in [parse(&input).unwrap(), parse_strict(&input).unwrap()] {
            assert_eq!(got_prefix, prefix);
            assert_eq!(ulid.to_string(), sortable);
        }
    }

    #[rstest]
    #[case::empty_prefix(":01FD7SJ7J006AFVGQT5ZYC0GEK", PulidError::MissingPrefix)]
    #[case::no_delimiter("01FD7SJ7J006AFVGQT5ZYC0GEK", PulidError::MissingPrefix)]
    #[case::empty("", PulidError::MissingPrefix)]
    #[case::overflow("CC:81FD7SJ7J006AFVGQT5ZYC0GEK", PulidError::Overflow)]
    #[case::short("CC:81FD7SJ7J006AFVGQT5ZYC0GE", PulidError::InvalidLength { expected: 26, actual: 25 })]
    #[case::long("CC:81FD7SJ7J006AFVGQT5ZYC0GEKK", PulidError::InvalidLength { expected: 26, actual: 27 })]
    #[case::empty_sortable("CC:", PulidError::InvalidLength { expected: 26, actual: 0 })]
    fn test_parse_failures_in_both_modes(#[case] input: &str, #[case] want: PulidError) {
        assert_eq!(parse(input), Err(want.clone()));
        assert_eq!(parse_strict(input), Err(want));
    }

    #[test]
    fn test_lookalike_lenient_vs_strict() {
        let input = "CC:01FD7SJ7J006AFVGQT5ZYC0GEO";

        let (prefix, ulid) = parse(input).unwrap();
        assert_eq!(prefix, "CC");
        assert_eq!(ulid.to_string(), "01FD7SJ7J006AFVGQT5ZYC0GE0");

        assert_eq!(
            parse_strict(input),
            Err(PulidError::InvalidCharacter {
                character: 'O',
                position: 25
            })
        );
    }

    #[test]
    fn test_compare_is_bytewise() {
        let a = Pulid::from("AA:01FD7SJ7J006AFVGQT5ZYC0GEK");
        let b = Pulid::from("AA:01FD7SJ7J0ZW908PVKS1Q4ZYAZ");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
        assert_eq!(a.cmp(&b), a.compare(&b));
    }

    #[test]
    fn test_new_with_deterministic_generator() {
        let generator = DeterministicGenerator::new();
        let id = Pulid::new_with("AA", &generator).unwrap();
        assert_eq!(id.as_str(), "AA:01FD7SJ7J006AFVGQT5ZYC0GEK");
    }

    #[test]
    fn test_new_at_uses_timestamp() {
        let timestamp = SystemTime::UNIX_EPOCH + std::time::Duration::from_millis(1_234_567);
        let id = Pulid::new_at("EV", timestamp, &MonotonicGenerator).unwrap();
        assert_eq!(id.prefix(), "EV");
        assert_eq!(id.timestamp_ms().unwrap(), 1_234_567);
    }

    #[test]
    fn test_new_at_rejects_timestamp_past_48_bits() {
        let ms = (1u64 << 48) + 5;
        let timestamp = SystemTime::UNIX_EPOCH + std::time::Duration::from_millis(ms);
        assert_eq!(
            Pulid::new_at("AA", timestamp, &MonotonicGenerator),
            Err(PulidError::TimestampOverflow { timestamp_ms: ms })
        );
    }

    #[test]
    fn test_delimiter_in_prefix_does_not_parse() {
        let generator = DeterministicGenerator::new();
        let id = Pulid::new_with("A:B", &generator).unwrap();
        assert_eq!(id.prefix(), "A");
        assert!(id.parse().unwrap_err().is_decode_error());
    }

    #[test]
    fn test_parse_view() {
        let id = Pulid::from("USR:01FD7SJ7J006AFVGQT5ZYC0GEO");

        let parsed = id.parse().unwrap();
        assert_eq!(parsed.prefix, "USR");
        assert_eq!(parsed.ulid.to_string(), "01FD7SJ7J006AFVGQT5ZYC0GE0");

        assert_eq!(
            id.parse_strict(),
            Err(PulidError::InvalidCharacter {
                character: 'O',
                position: 25
            })
        );

        let canonical = Pulid::from("USR:01FD7SJ7J006AFVGQT5ZYC0GEK");
        assert_eq!(canonical.parse_strict(), canonical.parse());
        assert_eq!(Pulid::default().parse(), Err(PulidError::MissingPrefix));
    }

    #[test]
    fn test_from_str_is_strict() {
        let id: Pulid = "AA:01FD7SJ7J006AFVGQT5ZYC0GEK".parse().unwrap();
        assert_eq!(id.to_string(), "AA:01FD7SJ7J006AFVGQT5ZYC0GEK");

        let err = "AA:01FD7SJ7J006AFVGQT5ZYC0GEO".parse::<Pulid>().unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_from_is_unchecked() {
        let id = Pulid::from("not an id");
        assert_eq!(id.as_str(), "not an id");
        assert_eq!(id.ulid(), Err(PulidError::MissingPrefix));
    }

    #[test]
    fn test_json_roundtrip() {
        let id = Pulid::from("AA:01FD7SJ7J006AFVGQT5ZYC0GEK");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"AA:01FD7SJ7J006AFVGQT5ZYC0GEK\"");
        let parsed: Pulid = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_json_null_is_empty() {
        let parsed: Pulid = serde_json::from_str("null").unwrap();
        assert!(parsed.is_empty());
        assert!(serde_json::from_str::<Pulid>("12").is_err());
    }
}
