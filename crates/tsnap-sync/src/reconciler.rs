//! Hierarchical upsert of static-report payloads.
//!
//! Rows are matched by natural key where one exists (`rsa.edrpou`,
//! `asc_org.idf`, `general_data.asc_idf`, the upstream report id) and
//! otherwise only through the foreign key held by their parent. A parent
//! whose foreign key is NULL always gets a freshly inserted child, even when
//! an identical row already exists; nothing here deduplicates by content.
//!
//! Children are written before parents so the parent can store the child's
//! key. Each top-level payload ends with a commit.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use tsnap_client::{
    AddressPayload, AscOrgPayload, GeneralDataPayload, LocalityPayload, ReportPayload,
    RsaPayload, TsnapDetail,
};
use tsnap_db::models::{
    ActivityData, Address, AdminServiceData, AscOrg, GeneralData, InfoSupportData, Locality,
    OdaReport, RespPersonData, Rsa, Tsnap,
};
use tsnap_db::{DbError, Filter, Record, UnitOfWork};

use crate::error::{SyncError, SyncResult};
use crate::fields;

/// Reconcile one upstream payload into storage.
///
/// Implemented by [`EntityReconciler`] once per entity family.
#[async_trait]
pub trait Reconcile<P: Sync> {
    /// The top-level row the payload resolves to.
    type Output;

    /// Create or update every row described by `payload` and commit.
    ///
    /// On error the open transaction is left for the caller to roll back.
    async fn reconcile(&mut self, payload: &P) -> SyncResult<Self::Output>;
}

/// Upsert engine over a borrowed unit of work.
pub struct EntityReconciler<'a, U> {
    uow: &'a mut U,
}

/// Primary key of a row that has been written.
fn key<E: Record>(row: &E) -> SyncResult<i64> {
    row.id()
        .ok_or_else(|| DbError::NotPersisted { table: E::TABLE }.into())
}

impl<'a, U: UnitOfWork> EntityReconciler<'a, U> {
    pub fn new(uow: &'a mut U) -> Self {
        Self { uow }
    }

    async fn insert<E: Record>(&mut self, mut row: E) -> SyncResult<E> {
        let id = self.uow.insert(&row).await?;
        row.set_id(id);
        debug!(table = E::TABLE, id, "Created row");
        Ok(row)
    }

    /// Update a row that has a generated key, insert it otherwise.
    async fn save<E: Record>(&mut self, row: E) -> SyncResult<E> {
        match row.id() {
            Some(id) => {
                self.uow.update(&row).await?;
                debug!(table = E::TABLE, id, "Updated row");
                Ok(row)
            }
            None => self.insert(row).await,
        }
    }

    /// The row a parent's foreign key points at; `None` for a NULL key.
    async fn linked<E: Record>(&mut self, id: Option<i64>) -> SyncResult<Option<E>> {
        Ok(self.uow.find_one(Filter::eq("id", id)).await?)
    }

    /// The row a NOT NULL foreign key points at, which must exist.
    async fn required_link<E: Record>(&mut self, id: i64) -> SyncResult<E> {
        self.linked(Some(id))
            .await?
            .ok_or_else(|| SyncError::dangling_reference(E::TABLE, id))
    }

    async fn upsert_rsa(&mut self, payload: &RsaPayload) -> SyncResult<Rsa> {
        let existing: Option<Rsa> = self
            .uow
            .find_one(Filter::eq("edrpou", payload.edrpou.as_str()))
            .await?;

        let row = match existing {
            Some(mut row) => {
                fields::apply_rsa(&mut row, payload)?;
                row
            }
            None => fields::new_rsa(payload)?,
        };
        self.save(row).await
    }

    async fn upsert_locality(
        &mut self,
        current: Option<i64>,
        payload: &LocalityPayload,
    ) -> SyncResult<Locality> {
        let row = match self.linked::<Locality>(current).await? {
            Some(mut row) => {
                fields::apply_locality(&mut row, payload);
                row
            }
            None => fields::new_locality(payload),
        };
        self.save(row).await
    }

    async fn upsert_address(
        &mut self,
        current: Option<i64>,
        payload: &AddressPayload,
    ) -> SyncResult<Address> {
        let mut row = match self.linked::<Address>(current).await? {
            Some(mut row) => {
                fields::apply_address(&mut row, payload)?;
                row
            }
            None => fields::new_address(payload)?,
        };

        if let Some(locality) = payload.locality() {
            let locality = self.upsert_locality(row.locality_id, locality).await?;
            self.uow.flush().await?;
            row.locality_id = Some(key(&locality)?);
        }

        self.save(row).await
    }

    async fn upsert_asc_org(&mut self, payload: &AscOrgPayload) -> SyncResult<AscOrg> {
        let existing: Option<AscOrg> = self
            .uow
            .find_one(Filter::eq("idf", payload.idf.as_str()))
            .await?;

        let mut row = match existing {
            Some(mut row) => {
                fields::apply_asc_org(&mut row, payload)?;
                row
            }
            None => fields::new_asc_org(payload)?,
        };

        if let Some(address) = payload.address() {
            let address = self.upsert_address(row.address_id, address).await?;
            self.uow.flush().await?;
            row.address_id = Some(key(&address)?);
        }

        self.save(row).await
    }

    /// General data is keyed by the organization, whatever `asc_idf` the
    /// payload carries.
    async fn upsert_general_data(
        &mut self,
        asc_idf: &str,
        payload: &GeneralDataPayload,
    ) -> SyncResult<GeneralData> {
        if let Some(other) = payload.asc_idf.value().filter(|v| v.as_str() != asc_idf) {
            warn!(asc_idf, payload_asc_idf = %other, "General data names another organization, keeping the parent's");
        }

        let existing: Option<GeneralData> =
            self.uow.find_one(Filter::eq("asc_idf", asc_idf)).await?;

        let row = match existing {
            Some(mut row) => {
                fields::apply_general_data(&mut row, payload)?;
                row.asc_idf = asc_idf.to_string();
                row
            }
            None => fields::new_general_data(asc_idf, payload)?,
        };
        self.save(row).await
    }

    /// Insert the four satellite rows and the aggregate linking them.
    async fn create_tsnap(
        &mut self,
        asc_org_id: i64,
        general_data_id: i64,
        payload: &TsnapDetail,
    ) -> SyncResult<Tsnap> {
        let activity = self
            .insert(fields::new_activity_data(&payload.activity_data))
            .await?;
        let info_support = self
            .insert(fields::new_info_support_data(&payload.info_support_data)?)
            .await?;
        let admin_service = self
            .insert(fields::new_admin_service_data(&payload.admin_service_data)?)
            .await?;
        let resp_person = self
            .insert(fields::new_resp_person_data(&payload.resp_person_data))
            .await?;
        self.uow.flush().await?;

        let tsnap = Tsnap {
            id: None,
            asc_org_id,
            general_data_id,
            activity_data_id: key(&activity)?,
            info_support_data_id: key(&info_support)?,
            admin_service_data_id: key(&admin_service)?,
            resp_person_data_id: key(&resp_person)?,
        };
        self.insert(tsnap).await
    }

    /// Overwrite the satellite rows the aggregate already points at. The
    /// aggregate row itself is left as it is.
    async fn update_satellites(&mut self, tsnap: &Tsnap, payload: &TsnapDetail) -> SyncResult<()> {
        let mut activity: ActivityData = self.required_link(tsnap.activity_data_id).await?;
        fields::apply_activity_data(&mut activity, &payload.activity_data);
        self.save(activity).await?;

        let mut info_support: InfoSupportData =
            self.required_link(tsnap.info_support_data_id).await?;
        fields::apply_info_support_data(&mut info_support, &payload.info_support_data)?;
        self.save(info_support).await?;

        let mut admin_service: AdminServiceData =
            self.required_link(tsnap.admin_service_data_id).await?;
        fields::apply_admin_service_data(&mut admin_service, &payload.admin_service_data)?;
        self.save(admin_service).await?;

        let mut resp_person: RespPersonData =
            self.required_link(tsnap.resp_person_data_id).await?;
        fields::apply_resp_person_data(&mut resp_person, &payload.resp_person_data);
        self.save(resp_person).await?;

        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> Reconcile<ReportPayload> for EntityReconciler<'_, U> {
    type Output = OdaReport;

    #[instrument(skip(self, payload), fields(report_id = payload.id, edrpou = %payload.rsa.edrpou))]
    async fn reconcile(&mut self, payload: &ReportPayload) -> SyncResult<OdaReport> {
        let rsa = self.upsert_rsa(&payload.rsa).await?;
        self.uow.flush().await?;
        let rsa_info_id = key(&rsa)?;

        let existing: Option<OdaReport> = self.uow.find_one(Filter::id(payload.id)).await?;
        let report = match existing {
            Some(mut report) => {
                report.year = payload.year;
                report.quarter = payload.quarter;
                report.rsa_info_id = rsa_info_id;
                self.uow.update(&report).await?;
                debug!(id = payload.id, "Updated ODA report");
                report
            }
            None => {
                let report = OdaReport {
                    id: Some(payload.id),
                    year: payload.year,
                    quarter: payload.quarter,
                    rsa_info_id,
                };
                self.uow.insert(&report).await?;
                debug!(id = payload.id, "Created ODA report");
                report
            }
        };

        self.uow.commit().await?;
        info!(rsa_id = rsa_info_id, "ODA report reconciled");
        Ok(report)
    }
}

#[async_trait]
impl<U: UnitOfWork> Reconcile<TsnapDetail> for EntityReconciler<'_, U> {
    type Output = Tsnap;

    #[instrument(skip(self, payload), fields(entry_id = payload.id, idf = %payload.asc_org.idf))]
    async fn reconcile(&mut self, payload: &TsnapDetail) -> SyncResult<Tsnap> {
        let org = self.upsert_asc_org(&payload.asc_org).await?;
        self.uow.flush().await?;
        let asc_org_id = key(&org)?;

        let existing: Option<Tsnap> = self
            .uow
            .find_one(Filter::eq("asc_org_id", asc_org_id))
            .await?;

        let general_data = self
            .upsert_general_data(&org.idf, &payload.general_data)
            .await?;
        self.uow.flush().await?;
        let general_data_id = key(&general_data)?;

        let tsnap = match existing {
            Some(tsnap) => {
                self.update_satellites(&tsnap, payload).await?;
                tsnap
            }
            None => {
                self.create_tsnap(asc_org_id, general_data_id, payload)
                    .await?
            }
        };

        self.uow.commit().await?;
        info!(asc_org_id, tsnap_id = ?tsnap.id, "TsNAP reconciled");
        Ok(tsnap)
    }
}
