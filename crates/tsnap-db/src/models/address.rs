//! Address entity model.

define_record! {
    /// Postal address of a service-center organization.
    #[derive(Default)]
    Address in "address" {
        address_full: String,
        locality_id: Option<i64>,
        postal_code: Option<String>,
        lat: Option<f64>,
        lon: Option<f64>,
    }
}
