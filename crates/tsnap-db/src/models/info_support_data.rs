//! Information-support data of a service center.

define_record! {
    /// Registers and electronic systems available to a service center.
    InfoSupportData in "info_support_data" {
        has_person_org_register: bool,
        has_real_estate_rights_register: bool,
        has_demography_register: bool,
        has_land_cadastre: bool,
        other_registers: Option<String>,
        has_e_sevices: Option<bool>,
        e_services_name: Option<String>,
        has_edm_system: bool,
        edm_system_name: Option<String>,
        edm_system_developer: Option<String>,
        has_website_access: bool,
        has_phone_access: bool,
        has_info_terminal_access: bool,
        has_info_stand_access: bool,
    }
}

/// Column defaults of the `info_support_data` table.
impl Default for InfoSupportData {
    fn default() -> Self {
        Self {
            id: None,
            has_person_org_register: false,
            has_real_estate_rights_register: false,
            has_demography_register: false,
            has_land_cadastre: false,
            other_registers: None,
            has_e_sevices: None,
            e_services_name: None,
            has_edm_system: false,
            edm_system_name: None,
            edm_system_developer: None,
            has_website_access: true,
            has_phone_access: true,
            has_info_terminal_access: false,
            has_info_stand_access: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_table_defaults() {
        let row = InfoSupportData::default();
        assert!(row.has_website_access);
        assert!(row.has_phone_access);
        assert!(row.has_info_stand_access);
        assert!(!row.has_info_terminal_access);
        assert!(!row.has_edm_system);
        assert!(row.id.is_none());
    }
}
