//! Responsible person contact data.

define_record! {
    #[derive(Default)]
    RespPersonData in "resp_person_data" {
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        ceo_contact_pip: Option<String>,
        ceo_contact_phone: Option<String>,
        ceo_contact_mail: Option<String>,
    }
}
