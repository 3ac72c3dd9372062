//! Upstream catalog synchronization.
//!
//! One run reads today's date from a [`Clock`](crate::abstract_trait::sync::Clock),
//! derives credentials, fetches the upstream payload, parses it into
//! candidates and reconciles them into the store.

mod client;
mod clock;
mod credentials;
mod parser;
mod reconciler;
mod record;
mod report;

pub use self::client::UpstreamClient;
pub use self::clock::{FixedClock, LocalClock};
pub use self::credentials::{CredentialDeriver, Credentials};
pub use self::parser::{COLLECTION_FIELD, coerce_price, parse};
pub use self::reconciler::CatalogReconciler;
pub use self::record::{CandidateRecord, ProductChange, RawResponse, UpsertOutcome};
pub use self::report::{CandidateFailure, SyncReport};
