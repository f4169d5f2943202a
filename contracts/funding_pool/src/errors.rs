use soroban_sdk::contracterror;

use shared::Error as SharedError;

/// Every failure a pool can return.
///
/// Codes 1-15 and 52-56 are the validation and calculator codes from
/// [`shared::Error`], kept under the same numbers.
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
    PoolNotActive = 22,
    VotingClosed = 23,
    /// Voting, funding or milestone deadline still ahead.
    DeadlineNotReached = 24,
    PoolNotFunded = 27,
    PoolNotFailed = 28,
    MilestonesNotSet = 30,
    MilestoneNotPending = 31,
    MilestoneNotCompleted = 32,
    MilestoneDeadlinePassed = 33,
    GoalAlreadyMet = 34,

    // Authorization (40-49)
    NotAuthorized = 40,
    RoleNotFound = 41,
    NotWinner = 42,
    DisputeResolutionDisabled = 43,

    // Economic (50-69)
    WrongAsset = 50,
    NotCandidate = 51,
    BelowMinimum = 52,
    AboveMaximum = 53,
    ZeroWeights = 54,
    Overflow = 56,
    /// No live contribution to withdraw or refund.
    NoContribution = 57,
    MilestoneNotFound = 63,

    // Invariant (70-89)
    AlreadyVoted = 70,
    AlreadyRefunded = 72,
    AllocationExceeded = 73,
    /// Empty, oversized, or not summing to 10,000 bp.
    InvalidMilestoneSchedule = 74,
    MilestonesAlreadySet = 75,
    AlreadyApproved = 77,
    MilestoneDisputed = 78,
    MilestoneNotDisputed = 79,
    ReceiptNonTransferable = 80,
    ReceiptNotFound = 81,
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
