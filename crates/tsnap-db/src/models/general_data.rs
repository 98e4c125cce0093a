//! General data of a service-center organization.
//!
//! One row per organization, keyed by `asc_idf`, which always carries the
//! owning organization's identifier.

use chrono::NaiveDate;

define_record! {
    #[derive(Default)]
    GeneralData in "general_data" {
        asc_name: String,
        /// Identifier of the owning organization (natural key).
        asc_idf: String,
        asc_type: Option<i32>,
        created_by: Option<String>,
        edrpou: Option<String>,
        is_diia: Option<bool>,
        is_active: Option<bool>,
        is_inactive: Option<bool>,
        created_by_type: Option<i32>,
        is_close_transform: Option<bool>,
        date_creation_decision_made: Option<NaiveDate>,
        date_created: Option<NaiveDate>,
        date_closing_decision_made: Option<NaiveDate>,
        date_closed: Option<NaiveDate>,
        is_permanent_working_unit: Option<bool>,
        is_structural_unit: Option<bool>,
        index: Option<String>,
        region: Option<String>,
        district: Option<String>,
        local_community: Option<String>,
        city: Option<String>,
        locality: Option<String>,
        village: Option<String>,
        street: Option<String>,
        building_number: Option<String>,
        consult_phone: Option<String>,
        consult_email: Option<String>,
        num_mobile_center: Option<i32>,
        has_bus_stop_near: Option<bool>,
        has_free_parking: Option<bool>,
        has_free_parking_inv: Option<bool>,
        has_asc_info_in_city: Option<bool>,
        num_days_per_week: Option<i32>,
        num_days_per_week_bef_20: Option<i32>,
        has_break: Option<bool>,
        works_in_saturday: Option<bool>,
        work_time_mon: Option<String>,
        total_sq: Option<f64>,
        open_reception_sq: Option<f64>,
        open_info_sq: Option<f64>,
        open_waiting_sq: Option<f64>,
        open_service_sq: Option<f64>,
        num_waiting_seats: Option<i32>,
        num_served_people: Option<i32>,
        has_otg_contract: Option<bool>,
        contract_number: Option<String>,
        has_resolution: Option<bool>,
        resolution_number: Option<String>,
        website: Option<String>,
    }
}
