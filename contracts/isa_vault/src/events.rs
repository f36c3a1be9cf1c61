use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigInitializedEvent {
    pub admin: Address,
    pub oracle: Address,
    pub university: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRotatedEvent {
    pub previous: Address,
    pub current: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IsaInitializedEvent {
    pub student: Address,
    pub asset: Address,
    pub course_cost: i128,
    pub percent: u32,
    pub max_cap: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestedEvent {
    pub student: Address,
    pub investor: Address,
    pub amount: i128,
    pub total_invested: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReleasedEvent {
    pub student: Address,
    pub university: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SalaryUpdatedEvent {
    pub student: Address,
    pub salary: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SharePaidEvent {
    pub student: Address,
    pub amount: i128,
    pub already_paid: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelinquencyReportedEvent {
    pub student: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DropoutReportedEvent {
    pub student: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentsDistributedEvent {
    pub student: Address,
    pub requested: i128,
    pub distributed: i128,
    pub total_distributed: i128,
}
