//! Regional State Administration entity model.

define_record! {
    /// A regional state administration, unique by `edrpou`.
    Rsa in "rsa" {
        name: String,
        /// State registration number (natural key).
        edrpou: String,
        address: String,
    }
}
