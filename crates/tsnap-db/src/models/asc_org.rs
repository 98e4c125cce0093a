//! Administrative service center organization model.

define_record! {
    /// Organizational identity of a service center, unique by `idf`.
    AscOrg in "asc_org" {
        /// Stable upstream identifier (natural key).
        idf: String,
        name: String,
        address_id: Option<i64>,
    }
}
