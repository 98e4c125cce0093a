//! Wire types of the static-report API.
//!
//! Every optional scalar is a [`Patch`], so a reconciler can tell a field the
//! upstream left out from one it explicitly set to `null`. Keys that are not
//! listed here are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Presence of one field in an upstream payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// Key not present; the stored column is left untouched.
    Absent,
    /// Key present with `null`.
    Null,
    /// Key present with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// The value, if one was supplied.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

// A missing key never reaches this impl; `#[serde(default)]` yields `Absent`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// Envelope of every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Link to the next page, `null` on the last one.
    #[serde(default)]
    pub next: Option<String>,
}

/// A quarterly report of one regional administration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportPayload {
    pub id: i64,
    pub year: i32,
    pub quarter: i32,
    pub rsa: RsaPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RsaPayload {
    pub edrpou: String,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
}

/// One service center listed under a report.
///
/// Only the id is decoded. The nested organization is read from the entry's
/// detail instead, so a malformed summary never drops the entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionEntry {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AscOrgPayload {
    pub idf: String,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub address: Option<AddressPayload>,
}

impl AscOrgPayload {
    /// The address sub-object, unless it is missing, null or empty.
    #[must_use]
    pub fn address(&self) -> Option<&AddressPayload> {
        self.address.as_ref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressPayload {
    pub address_full: Patch<String>,
    pub postal_code: Patch<String>,
    pub lat: Patch<f64>,
    pub lon: Patch<f64>,
    pub locality: Option<LocalityPayload>,
}

impl AddressPayload {
    /// Whether no recognized field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.address_full.is_absent()
            && self.postal_code.is_absent()
            && self.lat.is_absent()
            && self.lon.is_absent()
            && self.locality.is_none()
    }

    /// The locality sub-object, unless it is missing, null or empty.
    #[must_use]
    pub fn locality(&self) -> Option<&LocalityPayload> {
        self.locality.as_ref().filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocalityPayload {
    pub name: Patch<String>,
    pub codifier: Patch<String>,
}

impl LocalityPayload {
    /// Whether no recognized field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.codifier.is_absent()
    }
}

/// Full detail of one service center: the organization and its five data
/// sections. Missing sections deserialize with every field absent.
#[derive(Debug, Clone, Deserialize)]
pub struct TsnapDetail {
    pub id: i64,
    pub asc_org: AscOrgPayload,
    #[serde(default)]
    pub general_data: GeneralDataPayload,
    #[serde(default)]
    pub activity_data: ActivityDataPayload,
    #[serde(default)]
    pub info_support_data: InfoSupportDataPayload,
    #[serde(default)]
    pub admin_service_data: AdminServiceDataPayload,
    #[serde(default)]
    pub resp_person_data: RespPersonDataPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralDataPayload {
    pub asc_name: Patch<String>,
    /// Accepted but never stored; the row is keyed by the organization.
    pub asc_idf: Patch<String>,
    pub asc_type: Patch<i32>,
    pub created_by: Patch<String>,
    pub edrpou: Patch<String>,
    pub is_diia: Patch<bool>,
    pub is_active: Patch<bool>,
    pub is_inactive: Patch<bool>,
    pub created_by_type: Patch<i32>,
    pub is_close_transform: Patch<bool>,
    pub date_creation_decision_made: Patch<NaiveDate>,
    pub date_created: Patch<NaiveDate>,
    pub date_closing_decision_made: Patch<NaiveDate>,
    pub date_closed: Patch<NaiveDate>,
    pub is_permanent_working_unit: Patch<bool>,
    pub is_structural_unit: Patch<bool>,
    pub index: Patch<String>,
    pub region: Patch<String>,
    pub district: Patch<String>,
    pub local_community: Patch<String>,
    pub city: Patch<String>,
    pub locality: Patch<String>,
    pub village: Patch<String>,
    pub street: Patch<String>,
    pub building_number: Patch<String>,
    pub consult_phone: Patch<String>,
    pub consult_email: Patch<String>,
    pub num_mobile_center: Patch<i32>,
    pub has_bus_stop_near: Patch<bool>,
    pub has_free_parking: Patch<bool>,
    pub has_free_parking_inv: Patch<bool>,
    pub has_asc_info_in_city: Patch<bool>,
    pub num_days_per_week: Patch<i32>,
    pub num_days_per_week_bef_20: Patch<i32>,
    pub has_break: Patch<bool>,
    pub works_in_saturday: Patch<bool>,
    pub work_time_mon: Patch<String>,
    pub total_sq: Patch<f64>,
    pub open_reception_sq: Patch<f64>,
    pub open_info_sq: Patch<f64>,
    pub open_waiting_sq: Patch<f64>,
    pub open_service_sq: Patch<f64>,
    pub num_waiting_seats: Patch<i32>,
    pub num_served_people: Patch<i32>,
    pub has_otg_contract: Patch<bool>,
    pub contract_number: Patch<String>,
    pub has_resolution: Patch<bool>,
    pub resolution_number: Patch<String>,
    pub website: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActivityDataPayload {
    pub num_total_empl: Patch<i32>,
    pub manager_name: Patch<String>,
    pub num_managers: Patch<i32>,
    pub has_admin_service_consalt: Patch<bool>,
    pub has_phone_consalt: Patch<bool>,
    pub has_online_consalt: Patch<bool>,
    pub has_sms_inform: Patch<bool>,
    pub has_online_inform: Patch<bool>,
    pub num_feedback_total: Patch<i32>,
    pub other_feedback: Patch<String>,
    pub has_technical_room: Patch<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfoSupportDataPayload {
    pub has_person_org_register: Patch<bool>,
    pub has_real_estate_rights_register: Patch<bool>,
    pub has_demography_register: Patch<bool>,
    pub has_land_cadastre: Patch<bool>,
    pub other_registers: Patch<String>,
    pub has_e_sevices: Patch<bool>,
    pub e_services_name: Patch<String>,
    pub has_edm_system: Patch<bool>,
    pub edm_system_name: Patch<String>,
    pub edm_system_developer: Patch<String>,
    pub has_website_access: Patch<bool>,
    pub has_phone_access: Patch<bool>,
    pub has_info_terminal_access: Patch<bool>,
    pub has_info_stand_access: Patch<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminServiceDataPayload {
    pub num_total_services: Patch<i32>,
    pub num_e_services: Patch<i32>,
    pub num_rsa_services: Patch<i32>,
    pub num_dsa_services: Patch<i32>,
    pub num_city_services: Patch<i32>,
    pub num_asc_services: Patch<i32>,
    pub num_special_services: Patch<i32>,
    pub is_all_asc_services_via_center: Patch<bool>,
    pub num_all_asc_e_services: Patch<i32>,
    pub num_from_this_year_start: Patch<i32>,
    pub num_services_residence: Patch<i32>,
    pub num_services_passport: Patch<i32>,
    pub num_services_vehicle: Patch<i32>,
    pub num_acts_services: Patch<i32>,
    pub num_dzk_services: Patch<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RespPersonDataPayload {
    pub name: Patch<String>,
    pub phone: Patch<String>,
    pub email: Patch<String>,
    pub ceo_contact_pip: Patch<String>,
    pub ceo_contact_phone: Patch<String>,
    pub ceo_contact_mail: Patch<String>,
}
