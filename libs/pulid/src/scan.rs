//! Marshal and scan hooks for storage layers and query-language payloads.
//!
//! IDs travel as plain strings. Scanning accepts an ID, a string, or a null
//! (which yields the empty ID); anything else is rejected with
//! [`PulidError::UnsupportedScanSource`].

use std::io;

use serde_json::Value;

use crate::{Pulid, PulidError};

/// A loosely typed value handed to [`Pulid::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSource<'a> {
    Pulid(&'a Pulid),
    Text(&'a str),
    Null,
    /// Any other kind of value, named for the error message.
    Unsupported(&'static str),
}

impl<'a> From<&'a Pulid> for ScanSource<'a> {
    fn from(id: &'a Pulid) -> Self {
        ScanSource::Pulid(id)
    }
}

impl<'a> From<&'a str> for ScanSource<'a> {
    fn from(s: &'a str) -> Self {
        ScanSource::Text(s)
    }
}

impl<'a> From<&'a String> for ScanSource<'a> {
    fn from(s: &'a String) -> Self {
        ScanSource::Text(s)
    }
}

impl<'a, T> From<Option<T>> for ScanSource<'a>
where
    T: Into<ScanSource<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(ScanSource::Null, Into::into)
    }
}

impl<'a> From<&'a Value> for ScanSource<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => ScanSource::Null,
            Value::String(s) => ScanSource::Text(s),
            Value::Bool(_) => ScanSource::Unsupported("bool"),
            Value::Number(_) => ScanSource::Unsupported("number"),
            Value::Array(_) => ScanSource::Unsupported("array"),
            Value::Object(_) => ScanSource::Unsupported("object"),
        }
    }
}

impl Pulid {
    /// Replaces `self` with the ID held by `src`.
    ///
    /// A null source leaves the empty ID. On error `self` is unchanged.
    pub fn scan<'a>(&mut self, src: impl Into<ScanSource<'a>>) -> Result<(), PulidError> {
        *self = match src.into() {
            ScanSource::Pulid(id) => id.clone(),
            ScanSource::Text(s) => Pulid::from(s),
            ScanSource::Null => Pulid::default(),
            ScanSource::Unsupported(found) => {
                return Err(PulidError::UnsupportedScanSource { found });
            }
        };
        Ok(())
    }

    /// Reads an ID from a query-language scalar.
    pub fn unmarshal_gql(&mut self, value: &Value) -> Result<(), PulidError> {
        self.scan(value)
    }

    /// Writes the ID as a quoted string scalar.
    pub fn marshal_gql<W: io::Write>(&self, writer: W) -> io::Result<()> {
        serde_json::to_writer(writer, self.as_str()).map_err(io::Error::from)
    }
}

impl TryFrom<&Value> for Pulid {
    type Error = PulidError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let mut id = Pulid::default();
        id.scan(value)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "AA:01FD7SJ7J006AFVGQT5ZYC0GEK";

    #[test]
    fn test_scan_string() {
        let mut id = Pulid::default();
        id.scan(ID).unwrap();
        assert_eq!(id.as_str(), ID);
    }

    #[test]
    fn test_scan_pulid() {
        let source = Pulid::from(ID);
        let mut id = Pulid::default();
        id.scan(&source).unwrap();
        assert_eq!(id, source);
    }

    #[test]
    fn test_scan_null_yields_empty() {
        let mut id = Pulid::from(ID);
        id.scan(None::<&str>).unwrap();
        assert!(id.is_empty());

        let mut id = Pulid::from(ID);
        id.scan(&Value::Null).unwrap();
        assert!(id.is_empty());
    }

    #[test]
    fn test_scan_does_not_validate() {
        // Scanning mirrors reading a text column; validation is a separate step.
        let mut id = Pulid::default();
        id.scan("garbage").unwrap();
        assert_eq!(id.as_str(), "garbage");
    }

    #[test]
    fn test_scan_unsupported_leaves_value() {
        let mut id = Pulid::from(ID);
        for (value, kind) in [
            (json!(1), "number"),
            (json!(true), "bool"),
            (json!([ID]), "array"),
            (json!({ "id": ID }), "object"),
        ] {
            let err = id.scan(&value).unwrap_err();
            assert_eq!(err, PulidError::UnsupportedScanSource { found: kind });
            assert_eq!(id.as_str(), ID);
        }
    }

    #[test]
    fn test_marshal_gql_quotes() {
        let mut out = Vec::new();
        Pulid::from(ID).marshal_gql(&mut out).unwrap();
        assert_eq!(out, format!("\"{ID}\"").into_bytes());

        let mut out = Vec::new();
        Pulid::from("A\"B").marshal_gql(&mut out).unwrap();
        assert_eq!(out, br#""A\"B""#);
    }

    #[test]
    fn test_gql_roundtrip() {
        let original = Pulid::from(ID);
        let mut out = Vec::new();
        original.marshal_gql(&mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        let mut id = Pulid::default();
        id.unmarshal_gql(&value).unwrap();
        assert_eq!(id, original);
    }

    #[test]
    fn test_try_from_value() {
        assert_eq!(Pulid::try_from(&json!(ID)).unwrap().as_str(), ID);
        assert!(Pulid::try_from(&json!(null)).unwrap().is_empty());
        assert!(Pulid::try_from(&json!(3.5)).is_err());
    }
}
