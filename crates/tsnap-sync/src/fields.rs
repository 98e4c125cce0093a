//! Typed field copies from payloads onto rows.
//!
//! `apply_*` overwrites every field present in the payload and leaves absent
//! fields alone. `new_*` builds a fresh row from column defaults and then
//! applies the payload; required columns must be supplied. Keys and foreign
//! keys are set by the reconciler, never here.

use tsnap_client::{
    ActivityDataPayload, AddressPayload, AdminServiceDataPayload, AscOrgPayload,
    GeneralDataPayload, InfoSupportDataPayload, LocalityPayload, Patch, RespPersonDataPayload,
    RsaPayload,
};
use tsnap_db::models::{
    ActivityData, Address, AdminServiceData, AscOrg, GeneralData, InfoSupportData, Locality,
    RespPersonData, Rsa,
};
use tsnap_db::Record;

use crate::error::{SyncError, SyncResult};

/// Copy payload fields onto a row.
///
/// `nullable` fields are `Option` columns: null clears them. `required`
/// fields are NOT NULL columns: null is rejected.
macro_rules! overwrite {
    (nullable $row:ident, $payload:ident { $($field:ident),+ $(,)? }) => {
        $(
            match &$payload.$field {
                Patch::Absent => {}
                Patch::Null => $row.$field = None,
                Patch::Value(v) => $row.$field = Some(v.clone()),
            }
        )+
    };
    (required $entity:expr, $row:ident, $payload:ident { $($field:ident),+ $(,)? }) => {
        $(
            match &$payload.$field {
                Patch::Absent => {}
                Patch::Null => return Err(SyncError::null_field($entity, stringify!($field))),
                Patch::Value(v) => $row.$field = v.clone(),
            }
        )+
    };
}

/// Value of a required field on a new row.
fn require<T: Clone>(patch: &Patch<T>, entity: &'static str, field: &'static str) -> SyncResult<T> {
    match patch {
        Patch::Value(v) => Ok(v.clone()),
        Patch::Null => Err(SyncError::null_field(entity, field)),
        Patch::Absent => Err(SyncError::missing_field(entity, field)),
    }
}

pub fn apply_rsa(row: &mut Rsa, payload: &RsaPayload) -> SyncResult<()> {
    overwrite!(required Rsa::TABLE, row, payload { name, address });
    Ok(())
}

pub fn new_rsa(payload: &RsaPayload) -> SyncResult<Rsa> {
    Ok(Rsa {
        id: None,
        name: require(&payload.name, Rsa::TABLE, "name")?,
        edrpou: payload.edrpou.clone(),
        address: require(&payload.address, Rsa::TABLE, "address")?,
    })
}

pub fn apply_asc_org(row: &mut AscOrg, payload: &AscOrgPayload) -> SyncResult<()> {
    overwrite!(required AscOrg::TABLE, row, payload { name });
    Ok(())
}

pub fn new_asc_org(payload: &AscOrgPayload) -> SyncResult<AscOrg> {
    Ok(AscOrg {
        id: None,
        idf: payload.idf.clone(),
        name: require(&payload.name, AscOrg::TABLE, "name")?,
        address_id: None,
    })
}

pub fn apply_address(row: &mut Address, payload: &AddressPayload) -> SyncResult<()> {
    overwrite!(required Address::TABLE, row, payload { address_full });
    overwrite!(nullable row, payload { postal_code, lat, lon });
    Ok(())
}

pub fn new_address(payload: &AddressPayload) -> SyncResult<Address> {
    let mut row = Address {
        address_full: require(&payload.address_full, Address::TABLE, "address_full")?,
        ..Address::default()
    };
    apply_address(&mut row, payload)?;
    Ok(row)
}

pub fn apply_locality(row: &mut Locality, payload: &LocalityPayload) {
    overwrite!(nullable row, payload { name, codifier });
}

#[must_use]
pub fn new_locality(payload: &LocalityPayload) -> Locality {
    let mut row = Locality::default();
    apply_locality(&mut row, payload);
    row
}

/// `asc_idf` is not copied; the caller pins it to the organization.
pub fn apply_general_data(row: &mut GeneralData, payload: &GeneralDataPayload) -> SyncResult<()> {
    overwrite!(required GeneralData::TABLE, row, payload { asc_name });
    overwrite!(nullable row, payload {
        asc_type,
        created_by,
        edrpou,
        is_diia,
        is_active,
        is_inactive,
        created_by_type,
        is_close_transform,
        date_creation_decision_made,
        date_created,
        date_closing_decision_made,
        date_closed,
        is_permanent_working_unit,
        is_structural_unit,
        index,
        region,
        district,
        local_community,
        city,
        locality,
        village,
        street,
        building_number,
        consult_phone,
        consult_email,
        num_mobile_center,
        has_bus_stop_near,
        has_free_parking,
        has_free_parking_inv,
        has_asc_info_in_city,
        num_days_per_week,
        num_days_per_week_bef_20,
        has_break,
        works_in_saturday,
        work_time_mon,
        total_sq,
        open_reception_sq,
        open_info_sq,
        open_waiting_sq,
        open_service_sq,
        num_waiting_seats,
        num_served_people,
        has_otg_contract,
        contract_number,
        has_resolution,
        resolution_number,
        website,
    });
    Ok(())
}

pub fn new_general_data(asc_idf: &str, payload: &GeneralDataPayload) -> SyncResult<GeneralData> {
    let mut row = GeneralData {
        asc_name: require(&payload.asc_name, GeneralData::TABLE, "asc_name")?,
        asc_idf: asc_idf.to_string(),
        ..GeneralData::default()
    };
    apply_general_data(&mut row, payload)?;
    Ok(row)
}

pub fn apply_activity_data(row: &mut ActivityData, payload: &ActivityDataPayload) {
    overwrite!(nullable row, payload {
        num_total_empl,
        manager_name,
        num_managers,
        has_admin_service_consalt,
        has_phone_consalt,
        has_online_consalt,
        has_sms_inform,
        has_online_inform,
        num_feedback_total,
        other_feedback,
        has_technical_room,
    });
}

#[must_use]
pub fn new_activity_data(payload: &ActivityDataPayload) -> ActivityData {
    let mut row = ActivityData::default();
    apply_activity_data(&mut row, payload);
    row
}

pub fn apply_info_support_data(
    row: &mut InfoSupportData,
    payload: &InfoSupportDataPayload,
) -> SyncResult<()> {
    overwrite!(required InfoSupportData::TABLE, row, payload {
        has_person_org_register,
        has_real_estate_rights_register,
        has_demography_register,
        has_land_cadastre,
        has_edm_system,
        has_website_access,
        has_phone_access,
        has_info_terminal_access,
        has_info_stand_access,
    });
    overwrite!(nullable row, payload {
        other_registers,
        has_e_sevices,
        e_services_name,
        edm_system_name,
        edm_system_developer,
    });
    Ok(())
}

pub fn new_info_support_data(payload: &InfoSupportDataPayload) -> SyncResult<InfoSupportData> {
    let mut row = InfoSupportData::default();
    apply_info_support_data(&mut row, payload)?;
    Ok(row)
}

pub fn apply_admin_service_data(
    row: &mut AdminServiceData,
    payload: &AdminServiceDataPayload,
) -> SyncResult<()> {
    overwrite!(required AdminServiceData::TABLE, row, payload {
        num_total_services,
        num_rsa_services,
        num_dsa_services,
        num_city_services,
        num_asc_services,
        num_special_services,
        num_from_this_year_start,
        num_services_residence,
        num_services_passport,
        num_acts_services,
        num_dzk_services,
    });
    overwrite!(nullable row, payload {
        num_e_services,
        is_all_asc_services_via_center,
        num_all_asc_e_services,
        num_services_vehicle,
    });
    Ok(())
}

/// The three counters without a table default must be present.
pub fn new_admin_service_data(payload: &AdminServiceDataPayload) -> SyncResult<AdminServiceData> {
    let table = AdminServiceData::TABLE;
    let mut row = AdminServiceData {
        num_total_services: require(&payload.num_total_services, table, "num_total_services")?,
        num_from_this_year_start: require(
            &payload.num_from_this_year_start,
            table,
            "num_from_this_year_start",
        )?,
        num_services_residence: require(
            &payload.num_services_residence,
            table,
            "num_services_residence",
        )?,
        ..AdminServiceData::default()
    };
    apply_admin_service_data(&mut row, payload)?;
    Ok(row)
}

pub fn apply_resp_person_data(row: &mut RespPersonData, payload: &RespPersonDataPayload) {
    overwrite!(nullable row, payload {
        name,
        phone,
        email,
        ceo_contact_pip,
        ceo_contact_phone,
        ceo_contact_mail,
    });
}

#[must_use]
pub fn new_resp_person_data(payload: &RespPersonDataPayload) -> RespPersonData {
    let mut row = RespPersonData::default();
    apply_resp_person_data(&mut row, payload);
    row
}
