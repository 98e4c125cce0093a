//! Administrative-service counters of a service center.

define_record! {
    AdminServiceData in "admin_service_data" {
        num_total_services: i32,
        num_e_services: Option<i32>,
        num_rsa_services: i32,
        num_dsa_services: i32,
        num_city_services: i32,
        num_asc_services: i32,
        num_special_services: i32,
        is_all_asc_services_via_center: Option<bool>,
        num_all_asc_e_services: Option<i32>,
        num_from_this_year_start: i32,
        num_services_residence: i32,
        num_services_passport: i32,
        num_services_vehicle: Option<i32>,
        num_acts_services: i32,
        num_dzk_services: i32,
    }
}

/// Column defaults of the `admin_service_data` table.
///
/// `num_total_services`, `num_from_this_year_start` and
/// `num_services_residence` have no table default; callers must supply them
/// before inserting.
impl Default for AdminServiceData {
    fn default() -> Self {
        Self {
            id: None,
            num_total_services: 0,
            num_e_services: None,
            num_rsa_services: 0,
            num_dsa_services: 0,
            num_city_services: 0,
            num_asc_services: 0,
            num_special_services: 0,
            is_all_asc_services_via_center: None,
            num_all_asc_e_services: None,
            num_from_this_year_start: 0,
            num_services_residence: 0,
            num_services_passport: 0,
            num_services_vehicle: None,
            num_acts_services: 0,
            num_dzk_services: 0,
        }
    }
}
