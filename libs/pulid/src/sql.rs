//! Postgres column support: IDs are stored as text.

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type, ValueRef};

use crate::Pulid;

impl Type<Postgres> for Pulid {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for Pulid {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <&str as Encode<'_, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for Pulid {
    /// A SQL NULL decodes to the empty ID.
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(Pulid::default());
        }
        let text = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(Pulid::from(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_is_text() {
        let text = <String as Type<Postgres>>::type_info();
        assert_eq!(<Pulid as Type<Postgres>>::type_info(), text);
        assert!(<Pulid as Type<Postgres>>::compatible(&text));
        assert!(!<Pulid as Type<Postgres>>::compatible(
            &<i64 as Type<Postgres>>::type_info()
        ));
    }

    #[test]
    fn test_encodes_as_raw_text() {
        let id = Pulid::from("AA:01FD7SJ7J006AFVGQT5ZYC0GEK");
        let mut buf = PgArgumentBuffer::default();
        let is_null = <Pulid as Encode<'_, Postgres>>::encode_by_ref(&id, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], id.as_str().as_bytes());
    }
}
