//! Quarterly ODA report entity model.

define_record! {
    /// A quarterly report filed by one regional administration.
    ///
    /// The id is assigned upstream and inserted as-is.
    OdaReport in "oda_reports", generated_id = false {
        year: i32,
        quarter: i32,
        /// Reporting administration.
        rsa_info_id: i64,
    }
}
