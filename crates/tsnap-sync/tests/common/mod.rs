//! Common test utilities for tsnap-sync integration tests.
//!
//! Provides an in-memory [`UnitOfWork`] with commit/rollback snapshots and
//! failure injection, an in-memory [`ReportSource`], and payload factories.

#![allow(dead_code)]

#[cfg(feature = "integration")]
pub mod pg;

use async_trait::async_trait;
use serde_json::{json, Value as Json};
use std::collections::{BTreeMap, HashMap};
use std::sync::Once;
use tsnap_client::{RegionEntry, ReportPayload, ReportSource, TsnapDetail};
use tsnap_db::{DbError, DbResult, Filter, Record, UnitOfWork, Value};

static INIT: Once = Once::new();

/// Initialize logging for tests (once).
pub fn init_test_logging() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}

// ─── In-memory storage ──────────────────────────────────────────────────────

/// Unique columns of the schema, checked on insert and update.
const UNIQUE_COLUMNS: &[(&str, &str)] = &[
    ("rsa", "edrpou"),
    ("asc_org", "idf"),
    ("general_data", "asc_idf"),
    ("tsnap", "asc_org_id"),
];

#[derive(Debug, Clone, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Json>,
}

type Tables = HashMap<&'static str, Table>;

/// A rejected insert: rows of `table` whose `column` equals `value`.
#[derive(Debug, Clone)]
struct InsertFailure {
    table: &'static str,
    column: &'static str,
    value: Json,
}

/// Unit of work that keeps rows as JSON per table.
///
/// Writes go to a working copy; `commit` snapshots it and `rollback` restores
/// the last snapshot.
#[derive(Debug, Default)]
pub struct MemoryUnitOfWork {
    committed: Tables,
    working: Tables,
    failures: Vec<InsertFailure>,
    pub flushes: usize,
    pub commits: usize,
    pub rollbacks: usize,
}

fn to_json(value: &Value) -> Json {
    match value {
        Value::Int(v) => json!(v),
        Value::BigInt(v) => json!(v),
        Value::Float(v) => json!(v),
        Value::Bool(v) => json!(v),
        Value::Text(v) => json!(v),
        Value::Date(v) => json!(v),
    }
}

fn constraint(table: &'static str, message: impl Into<String>) -> DbError {
    DbError::ConstraintViolation {
        table,
        message: message.into(),
    }
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        init_test_logging();
        Self::default()
    }

    /// Reject inserts into `table` of rows whose `column` equals `value`.
    pub fn fail_insert_when(
        &mut self,
        table: &'static str,
        column: &'static str,
        value: impl Into<Value>,
    ) {
        self.failures.push(InsertFailure {
            table,
            column,
            value: to_json(&value.into()),
        });
    }

    /// Committed rows of `E`, in key order.
    pub fn rows<E: Record>(&self) -> Vec<E> {
        self.committed
            .get(E::TABLE)
            .map(|t| {
                t.rows
                    .values()
                    .map(|row| serde_json::from_value(row.clone()).unwrap())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The only committed row of `E`.
    pub fn single<E: Record>(&self) -> E {
        let mut rows = self.rows::<E>();
        assert_eq!(rows.len(), 1, "expected exactly one {} row", E::TABLE);
        rows.remove(0)
    }

    /// Number of committed rows in `table`.
    pub fn count(&self, table: &str) -> usize {
        self.committed.get(table).map_or(0, |t| t.rows.len())
    }

    /// Committed row counts of every table.
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        self.committed
            .iter()
            .map(|(name, t)| (*name, t.rows.len()))
            .collect()
    }

    /// Remove a committed row behind the unit of work's back.
    pub fn delete_committed(&mut self, table: &str, id: i64) {
        for tables in [&mut self.committed, &mut self.working] {
            if let Some(t) = tables.get_mut(table) {
                t.rows.remove(&id);
            }
        }
    }

    /// Whether uncommitted writes exist.
    pub fn has_pending(&self) -> bool {
        self.working
            .iter()
            .any(|(name, t)| self.committed.get(name).map(|c| &c.rows) != Some(&t.rows))
    }

    fn check_unique(&self, table: &'static str, id: i64, row: &Json) -> DbResult<()> {
        let Some(rows) = self.working.get(table).map(|t| &t.rows) else {
            return Ok(());
        };
        for (_, column) in UNIQUE_COLUMNS.iter().filter(|(t, _)| *t == table) {
            let value = &row[*column];
            if rows
                .iter()
                .any(|(other_id, other)| *other_id != id && &other[*column] == value)
            {
                return Err(constraint(
                    table,
                    format!("duplicate key value violates unique constraint on {column}"),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn find_one<E: Record>(&mut self, filter: Filter) -> DbResult<Option<E>> {
        if filter.value.is_null() {
            return Ok(None);
        }
        let wanted = to_json(&filter.value);

        let found = self.working.get(E::TABLE).and_then(|t| {
            t.rows
                .values()
                .find(|row| row[filter.column] == wanted)
                .cloned()
        });

        Ok(found.map(|row| serde_json::from_value(row).unwrap()))
    }

    async fn insert<E: Record>(&mut self, row: &E) -> DbResult<i64> {
        let mut json = serde_json::to_value(row).unwrap();

        if let Some(failure) = self
            .failures
            .iter()
            .find(|f| f.table == E::TABLE && json[f.column] == f.value)
        {
            return Err(constraint(
                E::TABLE,
                format!("injected failure on {} = {}", failure.column, failure.value),
            ));
        }

        let table = self.working.entry(E::TABLE).or_default();
        let id = if E::GENERATED_ID {
            table.last_id + 1
        } else {
            row.id().ok_or(DbError::NotPersisted { table: E::TABLE })?
        };
        if table.rows.contains_key(&id) {
            return Err(constraint(E::TABLE, format!("duplicate primary key {id}")));
        }

        json["id"] = json!(id);
        self.check_unique(E::TABLE, id, &json)?;

        let table = self.working.entry(E::TABLE).or_default();
        table.last_id = table.last_id.max(id);
        table.rows.insert(id, json);
        Ok(id)
    }

    async fn update<E: Record>(&mut self, row: &E) -> DbResult<()> {
        let id = row.id().ok_or(DbError::NotPersisted { table: E::TABLE })?;
        let json = serde_json::to_value(row).unwrap();
        self.check_unique(E::TABLE, id, &json)?;

        let stored = self
            .working
            .get_mut(E::TABLE)
            .and_then(|t| t.rows.get_mut(&id))
            .ok_or(DbError::NotPersisted { table: E::TABLE })?;
        *stored = json;
        Ok(())
    }

    async fn flush(&mut self) -> DbResult<()> {
        self.flushes += 1;
        Ok(())
    }

    async fn commit(&mut self) -> DbResult<()> {
        self.committed = self.working.clone();
        self.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> DbResult<()> {
        self.working = self.committed.clone();
        self.rollbacks += 1;
        Ok(())
    }
}

// ─── In-memory source ───────────────────────────────────────────────────────

/// Report source serving fixed payloads.
#[derive(Debug, Default)]
pub struct StaticSource {
    pub reports: Vec<ReportPayload>,
    pub entries: HashMap<i64, Vec<RegionEntry>>,
    pub details: HashMap<i64, Vec<TsnapDetail>>,
}

impl StaticSource {
    pub fn with_report(mut self, report: Json) -> Self {
        self.reports.push(serde_json::from_value(report).unwrap());
        self
    }

    pub fn with_entry(mut self, report_id: i64, entry_id: i64, detail: Option<Json>) -> Self {
        let entry: RegionEntry = serde_json::from_value(json!({"id": entry_id})).unwrap();
        self.entries.entry(report_id).or_default().push(entry);
        if let Some(detail) = detail {
            self.details
                .entry(entry_id)
                .or_default()
                .push(serde_json::from_value(detail).unwrap());
        }
        self
    }
}

#[async_trait]
impl ReportSource for StaticSource {
    async fn oda_reports(&self, _year: i32, _quarter: i32) -> Vec<ReportPayload> {
        self.reports.clone()
    }

    async fn region_entries(&self, report_id: i64) -> Vec<RegionEntry> {
        self.entries.get(&report_id).cloned().unwrap_or_default()
    }

    async fn entry_details(&self, entry_id: i64) -> Vec<TsnapDetail> {
        self.details.get(&entry_id).cloned().unwrap_or_default()
    }
}

// ─── Payload factories ──────────────────────────────────────────────────────

/// Test data factory for a quarterly report.
pub fn create_report(id: i64, edrpou: &str, name: &str) -> Json {
    json!({
        "id": id,
        "year": 2024,
        "quarter": 1,
        "rsa": {"name": name, "edrpou": edrpou, "address": "1 Khreshchatyk St"}
    })
}

/// Test data factory for an organization with address and locality.
pub fn create_org(idf: &str) -> Json {
    json!({
        "idf": idf,
        "name": format!("Center {idf}"),
        "address": {
            "address_full": "5 Main St",
            "postal_code": "01001",
            "lat": 50.45,
            "lon": 30.52,
            "locality": {"name": "Kyiv", "codifier": "UA80000000000093317"}
        }
    })
}

/// Test data factory for a complete TsNAP detail record.
pub fn create_detail(entry_id: i64, asc_org: Json) -> Json {
    let idf = asc_org["idf"].clone();
    json!({
        "id": entry_id,
        "asc_org": asc_org,
        "general_data": {
            "asc_name": "Center",
            "asc_idf": idf,
            "asc_type": 1,
            "region": "Kyivska",
            "district": "Obukhivskyi",
            "date_created": "2019-03-01",
            "date_closed": null,
            "total_sq": 240.5,
            "has_break": false,
            "website": "https://center.example"
        },
        "activity_data": {
            "num_total_empl": 14,
            "manager_name": "Iryna",
            "has_phone_consalt": true,
            "num_business_reg": 4
        },
        "info_support_data": {
            "has_person_org_register": true,
            "has_edm_system": true,
            "edm_system_name": "Megapolis"
        },
        "admin_service_data": {
            "num_total_services": 120,
            "num_from_this_year_start": 35,
            "num_services_residence": 8,
            "num_services_vehicle": null
        },
        "resp_person_data": {
            "name": "Olena",
            "phone": "+380441234567",
            "email": "olena@center.example"
        }
    })
}

/// Deserialize a payload from JSON.
pub fn payload<T: serde::de::DeserializeOwned>(value: Json) -> T {
    serde_json::from_value(value).unwrap()
}
