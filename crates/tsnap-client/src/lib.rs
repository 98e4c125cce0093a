//! # tsnap-client
//!
//! Client for the read-only static-report API that publishes quarterly ODA
//! reports and the TsNAP service-center data filed with them.
//!
//! - [`StaticReportClient`] issues the HTTP calls.
//! - [`PaginatedFetcher`] walks `{results, next}` pages.
//! - [`ReportSource`] is the seam the sync job consumes; it turns every
//!   transport failure into an empty result.
//! - [`payload`] holds the wire types, with [`Patch`] marking field presence.

pub mod client;
pub mod error;
pub mod pagination;
pub mod payload;
pub mod source;

pub use client::{EntryPages, StaticReportClient, STATIC_REPORTS_PATH};
pub use error::{ClientError, ClientResult};
pub use pagination::{next_page, PageLoader, PaginatedFetcher};
pub use payload::{
    ActivityDataPayload, AddressPayload, AdminServiceDataPayload, AscOrgPayload,
    GeneralDataPayload, InfoSupportDataPayload, LocalityPayload, Page, Patch, RegionEntry,
    ReportPayload, RespPersonDataPayload, RsaPayload, TsnapDetail,
};
pub use source::ReportSource;
