//! TsNAP aggregate model.

define_record! {
    /// Links an organization to its general data and four satellite rows.
    ///
    /// There is at most one row per `asc_org_id`.
    Tsnap in "tsnap" {
        asc_org_id: i64,
        general_data_id: i64,
        activity_data_id: i64,
        info_support_data_id: i64,
        admin_service_data_id: i64,
        resp_person_data_id: i64,
    }
}
