use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for tracked candidates.
///
/// Display names are not unique keys; ids are allocated from a sequence and
/// survive renames, so every operation addresses a candidate through this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    Pending,
}

impl Readiness {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Pending => "Pending",
        }
    }
}

/// The fixed, ordered recruitment pipeline. Stages carry no identity beyond
/// their position and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Requisition,
    Posting,
    Shortlisting,
    Interviewing,
    BackgroundChecks,
    Selection,
    Offer,
    Onboarding,
}

impl PipelineStage {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Requisition,
            Self::Posting,
            Self::Shortlisting,
            Self::Interviewing,
            Self::BackgroundChecks,
            Self::Selection,
            Self::Offer,
            Self::Onboarding,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Requisition => "Job Requisition",
            Self::Posting => "Posting",
            Self::Shortlisting => "Shortlisting",
            Self::Interviewing => "Interviewing",
            Self::BackgroundChecks => "Background Checks",
            Self::Selection => "Selection",
            Self::Offer => "Offer",
            Self::Onboarding => "Onboarding",
        }
    }

    pub fn index(self) -> usize {
        Self::ordered()
            .iter()
            .position(|stage| *stage == self)
            .unwrap_or(0)
    }

    /// Next stage under the clamped boundary policy: the final stage stays put.
    pub fn advanced(self) -> Self {
        let ordered = Self::ordered();
        let index = self.index();
        if index + 1 < ordered.len() {
            ordered[index + 1]
        } else {
            self
        }
    }

    /// Previous stage under the clamped boundary policy: the first stage stays put.
    pub fn retreated(self) -> Self {
        let ordered = Self::ordered();
        let index = self.index();
        if index > 0 {
            ordered[index - 1]
        } else {
            self
        }
    }
}

/// Verification items every candidate carries, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    BackgroundCheck,
    EmploymentReferences,
    AddressVerification,
}

impl CheckKind {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::BackgroundCheck,
            Self::EmploymentReferences,
            Self::AddressVerification,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BackgroundCheck => "DBS/Background Check",
            Self::EmploymentReferences => "Employment References",
            Self::AddressVerification => "Home Address Verification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pending,
    Passed,
    Failed,
}

impl CheckStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

/// Self-describing evidence record: metadata plus a base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
    pub content: String,
}

/// One verification item attached to a candidate.
///
/// Invariant, maintained by the service: evidence present implies `Passed`,
/// and removing evidence resets the status to `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub kind: CheckKind,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceFile>,
}

impl Check {
    pub fn pending(kind: CheckKind) -> Self {
        Self {
            kind,
            status: CheckStatus::Pending,
            evidence: None,
        }
    }

    /// The three fresh checks every new candidate starts with.
    pub fn initial_set() -> Vec<Self> {
        CheckKind::ordered().into_iter().map(Self::pending).collect()
    }
}

/// A person tracked through the recruitment pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub role: String,
    pub availability: Availability,
    pub readiness: Readiness,
    pub stage: PipelineStage,
    pub checks: Vec<Check>,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Inbound fields for creating or updating a candidate, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub name: String,
    pub role: String,
    #[serde(default = "default_availability")]
    pub availability: Availability,
    #[serde(default = "default_readiness")]
    pub readiness: Readiness,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

const fn default_availability() -> Availability {
    Availability::Available
}

const fn default_readiness() -> Readiness {
    Readiness::Pending
}

impl Default for CandidateDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            availability: default_availability(),
            readiness: default_readiness(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
        }
    }
}
