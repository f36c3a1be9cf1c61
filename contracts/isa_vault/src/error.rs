use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Platform config already initialized
    AlreadyInitialized = 1,
    /// Platform config not initialized
    NotInitialized = 2,
    /// An ISA contract already exists for this student
    IsaAlreadyExists = 3,

    // ============================================
    // NOT-FOUND ERRORS (10-19)
    // ============================================
    /// No ISA contract exists for this student
    IsaNotFound = 10,
    /// No stake exists for this (contract, investor) pair
    StakeNotFound = 11,

    // ============================================
    // AUTHORIZATION ERRORS (20-29)
    // ============================================
    /// Caller is not the platform admin
    UnauthorizedAdmin = 20,
    /// Caller is not the salary oracle
    UnauthorizedOracle = 21,
    /// Caller is not the university
    UnauthorizedUniversity = 22,

    // ============================================
    // STATE-GUARD ERRORS (30-39)
    // ============================================
    /// Contract status forbids this operation
    InvalidStatus = 30,
    /// Investment would push total_invested past course_cost
    FundingExceedsCourseCost = 31,
    /// Funding target not reached yet
    NotFullyFunded = 32,
    /// Computed share is zero (no salary, zero percent, or cap reached)
    NothingToPay = 33,
    /// Distribution called with an empty payout list
    NoInvestors = 34,
    /// Distribution amount exceeds collected-but-undistributed funds
    InsufficientCollected = 35,
    /// Listed stakes do not sum to total_invested (missing or duplicate entries)
    IncompleteStakeList = 36,

    // ============================================
    // PARAMETER / ARITHMETIC ERRORS (40-49)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 40,
    /// Income share percent must be at most 100
    InvalidPercent = 41,
    /// max_cap must be at least course_cost
    InvalidCap = 42,
    /// Arithmetic overflow
    MathOverflow = 43,
}
