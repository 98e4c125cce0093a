//! Database models for the static-report tables.
//!
//! Each model maps one table. Natural keys live in the reconciler; here a
//! model only knows its columns.

/// Define a table model and its [`Record`](crate::record::Record) impl.
///
/// Every model gets an `id: Option<i64>` primary key followed by the listed
/// columns, in the same order as the table definition.
macro_rules! define_record {
    (
        $(#[$meta:meta])*
        $name:ident in $table:literal $(, generated_id = $generated:literal)? {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            /// Primary key, `None` until the row is inserted.
            pub id: Option<i64>,
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::record::Record for $name {
            const TABLE: &'static str = $table;
            $( const GENERATED_ID: bool = $generated; )?

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = Some(id);
            }

            fn columns(&self) -> Vec<(&'static str, $crate::record::Value)> {
                vec![
                    $( (stringify!($field), $crate::record::Value::from(self.$field.clone())), )*
                ]
            }
        }
    };
}

pub mod activity_data;
pub mod address;
pub mod admin_service_data;
pub mod asc_org;
pub mod general_data;
pub mod info_support_data;
pub mod locality;
pub mod oda_report;
pub mod resp_person_data;
pub mod rsa;
pub mod tsnap;

pub use activity_data::ActivityData;
pub use address::Address;
pub use admin_service_data::AdminServiceData;
pub use asc_org::AscOrg;
pub use general_data::GeneralData;
pub use info_support_data::InfoSupportData;
pub use locality::Locality;
pub use oda_report::OdaReport;
pub use resp_person_data::RespPersonData;
pub use rsa::Rsa;
pub use tsnap::Tsnap;
