//! Completion facts and their wire encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of batch job types an operator can trigger.
///
/// Clients receive the numeric ordinal, never the symbolic name, so the
/// ordering here is part of the wire contract and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum JobKind {
    /// Nightly export of newly registered patient records.
    PatientReport = 0,
    /// Access-audit report over the record store.
    AuditReport = 1,
}

impl JobKind {
    /// Returns the wire ordinal for this job type.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Attempts to convert a wire ordinal back to a `JobKind`.
    ///
    /// Returns `None` if the ordinal does not correspond to a known type.
    pub fn from_ordinal(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::PatientReport),
            1 => Some(Self::AuditReport),
            _ => None,
        }
    }

    /// Returns the string label for this job type.
    pub fn label(self) -> &'static str {
        match self {
            Self::PatientReport => "PATIENT_REPORT",
            Self::AuditReport => "AUDIT_REPORT",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable record describing one finished batch job.
///
/// Produced exactly once per completion by the batch runner and consumed
/// exactly once by [`NotificationHub::publish`](crate::NotificationHub::publish).
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCompletion {
    /// Job run counter, unique per run.
    pub seq_id: i64,
    /// When the job started.
    pub started_at: DateTime<Utc>,
    /// When the job finished.
    pub finished_at: DateTime<Utc>,
    /// Name of the output artifact the operator can download.
    pub file_name: String,
    /// Which kind of job ran.
    pub kind: JobKind,
}

/// Wire payload pushed to the subscriber, with camelCase field names.
///
/// The internal [`BatchCompletion`] uses snake_case Rust naming; the wire
/// shape uses camelCase keys (`seqId`, `startDate`, `endDate`, `fileName`,
/// `type`) to match what the browser client renders. Timestamps serialise as
/// RFC 3339 UTC strings with a trailing `Z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchNotice {
    pub seq_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub file_name: String,
    /// Ordinal of [`JobKind`]; the client holds the matching enumeration.
    #[serde(rename = "type")]
    pub kind: u8,
}

/// Encodes a completion fact into its wire payload.
///
/// Pure and infallible for any well-formed [`BatchCompletion`]; no side
/// effects, no dependency on registry state.
pub fn encode(fact: &BatchCompletion) -> BatchNotice {
    BatchNotice {
        seq_id: fact.seq_id,
        start_date: fact.started_at,
        end_date: fact.finished_at,
        file_name: fact.file_name.clone(),
        kind: fact.kind.ordinal(),
    }
}
