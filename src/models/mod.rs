//! Data models for the tool library

/// Implements sqlx `Type`/`Encode`/`Decode` for an enum stored as TEXT.
///
/// The enum must provide `as_str()` and a `FromStr` impl with `Err = String`.
macro_rules! text_enum_sqlx {
    ($ty:ty) => {
        impl sqlx::Type<sqlx::Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = sqlx::Decode::<sqlx::Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

pub mod reservation;
pub mod tool;
pub mod tool_return;
pub mod tool_submission;
pub mod user;

// Re-export commonly used types
pub use reservation::{Reservation, ReservationDetails, ReservationStatus};
pub use tool::Tool;
pub use tool_return::{ToolCondition, ToolReturn, ToolReturnDetails};
pub use tool_submission::{SubmissionStatus, ToolSubmission, ToolSubmissionDetails};
pub use user::{Role, User, UserClaims};
