//! Locality entity model.

define_record! {
    /// A settlement referenced by an address.
    #[derive(Default)]
    Locality in "locality" {
        name: Option<String>,
        codifier: Option<String>,
    }
}
