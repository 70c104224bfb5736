//! sqlx integration
//!
//! `Optional<T>` can be bound to and read from any sqlx database wherever
//! `T` can, with SQL `NULL` standing for an empty `Optional`. For SQLite,
//! [`DriverValue`] can be read from and bound to a column of any storage
//! class.
//!
//! SQLite only has the INTEGER, REAL, TEXT and BLOB storage classes, and a
//! value read back is reported by its storage class, not by the declared
//! column type. A bound `Bool` therefore comes back as `Integer` and a bound
//! `Timestamp` as `Text`; scan those with [`ScanConfig::lenient`].
//!
//! [`ScanConfig::lenient`]: crate::ScanConfig::lenient

use super::DriverValue;
use crate::optional::Optional;
use chrono::{DateTime, Utc};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{SqliteTypeInfo, SqliteValueRef};
use sqlx::{Database, Decode, Encode, Sqlite, Type, TypeInfo, ValueRef};

impl<DB, T> Type<DB> for Optional<T>
where
    DB: Database,
    T: Type<DB>,
{
    fn type_info() -> DB::TypeInfo {
        <T as Type<DB>>::type_info()
    }

    fn compatible(ty: &DB::TypeInfo) -> bool {
        ty.is_null() || <T as Type<DB>>::compatible(ty)
    }
}

impl<'q, DB, T> Encode<'q, DB> for Optional<T>
where
    DB: Database,
    T: Encode<'q, DB>,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self.get() {
            Some(value) => <T as Encode<'q, DB>>::encode_by_ref(value, buf),
            None => Ok(IsNull::Yes),
        }
    }

    fn produces(&self) -> Option<DB::TypeInfo> {
        self.get()
            .and_then(|value| <T as Encode<'q, DB>>::produces(value))
    }

    fn size_hint(&self) -> usize {
        self.get()
            .map_or(0, |value| <T as Encode<'q, DB>>::size_hint(value))
    }
}

impl<'r, DB, T> Decode<'r, DB> for Optional<T>
where
    DB: Database,
    T: Decode<'r, DB>,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            Ok(Optional::empty())
        } else {
            <T as Decode<'r, DB>>::decode(value).map(Optional::of)
        }
    }
}

impl Type<Sqlite> for DriverValue {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    // Every SQLite storage class maps onto some variant
    fn compatible(_ty: &SqliteTypeInfo) -> bool {
        true
    }
}

impl<'q> Encode<'q, Sqlite> for DriverValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            DriverValue::Null => Ok(IsNull::Yes),
            DriverValue::Integer(v) => <i64 as Encode<'q, Sqlite>>::encode_by_ref(v, buf),
            DriverValue::Real(v) => <f64 as Encode<'q, Sqlite>>::encode_by_ref(v, buf),
            DriverValue::Text(v) => <String as Encode<'q, Sqlite>>::encode_by_ref(v, buf),
            DriverValue::Blob(v) => <Vec<u8> as Encode<'q, Sqlite>>::encode_by_ref(v, buf),
            DriverValue::Bool(v) => <bool as Encode<'q, Sqlite>>::encode_by_ref(v, buf),
            DriverValue::Timestamp(v) => {
                <DateTime<Utc> as Encode<'q, Sqlite>>::encode_by_ref(v, buf)
            }
        }
    }
}

impl<'r> Decode<'r, Sqlite> for DriverValue {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(DriverValue::Null);
        }

        let storage_class = value.type_info().name().to_ascii_uppercase();
        let decoded = match storage_class.as_str() {
            "INTEGER" => DriverValue::Integer(<i64 as Decode<'r, Sqlite>>::decode(value)?),
            "REAL" => DriverValue::Real(<f64 as Decode<'r, Sqlite>>::decode(value)?),
            "BLOB" => DriverValue::Blob(<Vec<u8> as Decode<'r, Sqlite>>::decode(value)?),
            _ => DriverValue::Text(<String as Decode<'r, Sqlite>>::decode(value)?),
        };
        Ok(decoded)
    }
}
