use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IsaStatus {
    /// Investors are contributing toward course_cost
    Funding = 0,
    /// Escrow released to the university, student is studying
    StudyingPaid = 1,
    /// Student is employed and owes income shares
    Working = 2,
    /// Oracle reported a missed repayment
    Delinquent = 3,
    /// University reported dropout; obligations discharged (terminal)
    DroppedOut = 4,
    /// Lifetime repayment cap reached (terminal)
    Completed = 5,
    /// Oracle reported zero salary
    Unemployed = 6,
}

impl IsaStatus {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, IsaStatus::DroppedOut | IsaStatus::Completed)
    }
}

/// Global role registry, one per deployment. Admin is fixed at
/// initialization; oracle and university are rotatable by admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformConfig {
    pub admin: Address,
    pub oracle: Address,
    pub university: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IsaContract {
    /// Student the agreement belongs to
    pub owner: Address,
    /// Token accepted for funding and repayment
    pub asset: Address,
    /// Funding target in smallest token units
    pub course_cost: i128,
    /// Share of each salary period owed, 0-100
    pub percent: u32,
    /// Lifetime repayment ceiling
    pub max_cap: i128,
    /// Sum of all investor contributions
    pub total_invested: i128,
    /// Income shares collected from the student so far
    pub already_paid: i128,
    /// Amount paid out to investors so far
    pub total_distributed: i128,
    /// Most recent oracle-reported salary
    pub last_salary: i128,
    /// Escrowed funds currently held for this contract
    pub vault_balance: i128,
    /// Lifecycle status
    pub status: IsaStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorStake {
    /// Student whose contract this stake funds
    pub isa: Address,
    /// Contributing investor
    pub investor: Address,
    /// Accumulated contribution, never decreases
    pub amount: i128,
    pub initialized: bool,
}

/// Aggregated funding view for UI consumers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingStatus {
    pub course_cost: i128,
    pub total_invested: i128,
    pub remaining_to_invest: i128,
    pub is_fully_funded: bool,
}

/// One entry of the caller-supplied distribution list: which stake to
/// pay and where the payout should land.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutEntry {
    pub investor: Address,
    pub destination: Address,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Isa(Address),              // student → IsaContract
    Stake(Address, Address),   // (student, investor) → InvestorStake
    Investors(Address),        // student → Vec<Address>, for the listing view
    Initialized,
}
