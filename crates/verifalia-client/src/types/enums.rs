/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Processing status of a validation job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    InProgress,
    Completed,
    Deleted,
    Expired,
    /// A value reported by the API which this client does not know yet
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether a job in this status will not change any further
    pub fn is_terminal(self) -> bool {
        self != JobStatus::InProgress
    }
}

/// Deliverability classification of a validated entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Deliverable,
    Risky,
    Undeliverable,
    #[serde(other)]
    Unknown,
}

/// Quality level a job is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    /// Single validation pass, 5 seconds anti-tarpit time
    Standard,
    /// Three validation passes, 50 seconds anti-tarpit time
    High,
    /// Nine validation passes, 2 minutes anti-tarpit time
    Extreme,
    #[serde(other)]
    Unknown,
}

/// Strategy used to detect duplicated addresses within a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deduplication {
    Off,
    /// Safe rules only, never produces false duplicates
    Safe,
    /// Relaxed rules assuming modern mailbox provider settings
    Relaxed,
    #[serde(other)]
    Unknown,
}

/// Line ending of an uploaded text file; leave unset for automatic detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEnding {
    CrLf,
    Cr,
    Lf,
}

/// Direction of a job listing, ordered by creation date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingDirection {
    #[default]
    Forward,
    Backward,
}

impl ListingDirection {
    pub(crate) fn sort_value(self) -> &'static str {
        match self {
            ListingDirection::Forward => "createdOn",
            ListingDirection::Backward => "-createdOn",
        }
    }
}

/// Well-known processing priorities; any value in between is accepted by the API
pub struct Priority;

impl Priority {
    pub const LOWEST: u8 = 0;
    pub const NORMAL: u8 = 127;
    pub const HIGHEST: u8 = 255;
}

/// Validation outcome of a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    Success,
    UnmatchedQuotedPair,
    UnexpectedQuotedPairSequence,
    InvalidWordBoundaryStart,
    InvalidCharacterInSequence,
    UnbalancedCommentParenthesis,
    DoubleDotSequence,
    InvalidLocalPartLength,
    InvalidFoldingWhiteSpaceSequence,
    AtSignNotFound,
    InvalidEmptyQuotedWord,
    InvalidAddressLength,
    DomainPartCompliancyFailure,
    IspSpecificSyntaxFailure,
    LocalPartIsWellKnownRoleAccount,
    DnsQueryTimeout,
    DnsConnectionFailure,
    DomainDoesNotExist,
    DomainIsMisconfigured,
    DomainHasNullMx,
    DomainIsWellKnownDea,
    MailExchangerIsWellKnownDea,
    MailboxIsDea,
    SmtpConnectionTimeout,
    SmtpConnectionFailure,
    MailboxDoesNotExist,
    MailboxConnectionFailure,
    LocalSenderAddressRejected,
    MailboxValidationTimeout,
    MailboxTemporarilyUnavailable,
    ServerDoesNotSupportInternationalMailboxes,
    MailboxHasInsufficientStorage,
    CatchAllValidationTimeout,
    ServerIsCatchAll,
    CatchAllConnectionFailure,
    ServerTemporaryUnavailable,
    SmtpDialogError,
    LocalEndPointRejected,
    UnhandledException,
    MailExchangerIsHoneypot,
    UnacceptableDomainLiteral,
    /// Duplicate of an earlier entry, see `JobEntry::duplicate_of`
    Duplicate,
    #[serde(other)]
    Unknown,
}
