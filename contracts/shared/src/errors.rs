use soroban_sdk::contracterror;

/// Failures raised by the validation rules and the calculator.
///
/// Each contract re-exports these under the same numbers in its own error
/// enum, so a code means the same thing whichever contract returned it:
///
/// | Range  | Kind        | Owner                         |
/// |--------|-------------|-------------------------------|
/// | 1-19   | validation  | `shared`                      |
/// | 20-39  | phase       | contract                      |
/// | 40-49  | auth        | contract                      |
/// | 50-56  | economic    | `shared`                      |
/// | 57-69  | economic    | contract                      |
/// | 70-89  | invariant   | contract                      |
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
    /// Approver listed twice, or the pool admin listed as an approver.
    InvalidApprover = 15,

    // Economic (50-56)
    BelowMinimum = 52,
    AboveMaximum = 53,
    ZeroWeights = 54,
    Overflow = 56,
}
