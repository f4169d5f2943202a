use soroban_sdk::contracterror;

use shared::Error as SharedError;

/// Every failure the factory can return. Validation and calculator codes
/// keep the numbers they have in [`shared::Error`].
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Validation (1-19)
    ZeroAddress = 1,
    InvalidAmount = 2,
    EmptyString = 3,
    StringTooLong = 4,
    InvalidDuration = 5,
    InvalidGoal = 6,
    InvalidDeadline = 7,
    NoCandidates = 8,
    TooManyCandidates = 9,
    DuplicateCandidate = 10,
    InvalidBasisPoints = 11,
    InvalidContributionBounds = 12,
    InvalidApprovalThreshold = 13,
    InvalidWinnerCount = 14,
    InvalidApprover = 15,

    // Phase (20-39)
    NotInitialized = 20,
    AlreadyInitialized = 21,
    ProtocolPaused = 29,
    PitchNotPending = 35,

    // Authorization (40-49)
    NotAuthorized = 40,
    RoleNotFound = 41,

    // Economic (50-69)
    BelowMinimum = 52,
    AboveMaximum = 53,
    ZeroWeights = 54,
    Overflow = 56,
    PitchNotApproved = 59,
    PitchNotFound = 60,
    PoolNotFound = 61,
    PoolWasmNotSet = 62,
}

impl From<SharedError> for Error {
    fn from(e: SharedError) -> Self {
        match e {
            SharedError::ZeroAddress => Error::ZeroAddress,
            SharedError::InvalidAmount => Error::InvalidAmount,
            SharedError::EmptyString => Error::EmptyString,
            SharedError::StringTooLong => Error::StringTooLong,
            SharedError::InvalidDuration => Error::InvalidDuration,
            SharedError::InvalidGoal => Error::InvalidGoal,
            SharedError::InvalidDeadline => Error::InvalidDeadline,
            SharedError::NoCandidates => Error::NoCandidates,
            SharedError::TooManyCandidates => Error::TooManyCandidates,
            SharedError::DuplicateCandidate => Error::DuplicateCandidate,
            SharedError::InvalidBasisPoints => Error::InvalidBasisPoints,
            SharedError::InvalidContributionBounds => Error::InvalidContributionBounds,
            SharedError::InvalidApprovalThreshold => Error::InvalidApprovalThreshold,
            SharedError::InvalidWinnerCount => Error::InvalidWinnerCount,
            SharedError::InvalidApprover => Error::InvalidApprover,
            SharedError::BelowMinimum => Error::BelowMinimum,
            SharedError::AboveMaximum => Error::AboveMaximum,
            SharedError::ZeroWeights => Error::ZeroWeights,
            SharedError::Overflow => Error::Overflow,
        }
    }
}
