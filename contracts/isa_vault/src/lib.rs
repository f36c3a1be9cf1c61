#![no_std]

mod error;
mod events;
mod payout;
mod storage;

use error::Error;
use events::*;
use payout::{income_share_due, pro_rata_share};
use storage::{
    DataKey, FundingStatus, InvestorStake, IsaContract, IsaStatus, PayoutEntry, PlatformConfig,
};

use soroban_sdk::{contract, contractimpl, token, vec, Address, Env, Symbol, Vec};

#[contract]
pub struct IsaVault;

#[contractimpl]
impl IsaVault {
    // ============================================
    // INITIALIZATION & ROLE REGISTRY
    // ============================================

    /// Initialize the platform role registry. The admin is fixed for the
    /// lifetime of the deployment.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Registry already created
    pub fn initialize(
        env: Env,
        admin: Address,
        oracle: Address,
        university: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        let config = PlatformConfig {
            admin: admin.clone(),
            oracle: oracle.clone(),
            university: university.clone(),
        };
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Config, &config);

        env.events().publish(
            (Symbol::new(&env, "config_initialized"),),
            ConfigInitializedEvent {
                admin,
                oracle,
                university,
            },
        );

        Ok(())
    }

    /// Rotate the salary oracle (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `UnauthorizedAdmin`: Caller is not the admin
    pub fn set_oracle(env: Env, caller: Address, new_oracle: Address) -> Result<(), Error> {
        caller.require_auth();

        let mut config = Self::load_config(&env)?;
        if caller != config.admin {
            return Err(Error::UnauthorizedAdmin);
        }

        let previous = config.oracle.clone();
        config.oracle = new_oracle.clone();
        env.storage().instance().set(&DataKey::Config, &config);

        env.events().publish(
            (Symbol::new(&env, "oracle_rotated"),),
            RoleRotatedEvent {
                previous,
                current: new_oracle,
            },
        );

        Ok(())
    }

    /// Rotate the university identity (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `UnauthorizedAdmin`: Caller is not the admin
    pub fn set_university(env: Env, caller: Address, new_university: Address) -> Result<(), Error> {
        caller.require_auth();

        let mut config = Self::load_config(&env)?;
        if caller != config.admin {
            return Err(Error::UnauthorizedAdmin);
        }

        let previous = config.university.clone();
        config.university = new_university.clone();
        env.storage().instance().set(&DataKey::Config, &config);

        env.events().publish(
            (Symbol::new(&env, "university_rotated"),),
            RoleRotatedEvent {
                previous,
                current: new_university,
            },
        );

        Ok(())
    }

    // ============================================
    // FLOW 1: STUDENT OPENS AN ISA
    // ============================================

    /// Create an ISA contract for the calling student. One contract per
    /// student; terminal contracts are never deleted, so a student gets
    /// exactly one agreement per deployment.
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `IsaAlreadyExists`: Student already has a contract
    /// - `InvalidAmount`: course_cost must be positive
    /// - `InvalidPercent`: percent must be at most 100
    /// - `InvalidCap`: max_cap must be at least course_cost
    pub fn initialize_isa(
        env: Env,
        student: Address,
        asset: Address,
        course_cost: i128,
        percent: u32,
        max_cap: i128,
    ) -> Result<(), Error> {
        student.require_auth();

        Self::load_config(&env)?;

        if env.storage().instance().has(&DataKey::Isa(student.clone())) {
            return Err(Error::IsaAlreadyExists);
        }

        if course_cost <= 0 {
            return Err(Error::InvalidAmount);
        }
        if percent > 100 {
            return Err(Error::InvalidPercent);
        }
        if max_cap < course_cost {
            return Err(Error::InvalidCap);
        }

        let isa = IsaContract {
            owner: student.clone(),
            asset: asset.clone(),
            course_cost,
            percent,
            max_cap,
            total_invested: 0,
            already_paid: 0,
            total_distributed: 0,
            last_salary: 0,
            vault_balance: 0,
            status: IsaStatus::Funding,
        };
        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "isa_initialized"), student.clone()),
            IsaInitializedEvent {
                student,
                asset,
                course_cost,
                percent,
                max_cap,
            },
        );

        Ok(())
    }

    // ============================================
    // FLOW 2: INVESTORS FUND THE CONTRACT
    // ============================================

    /// Contribute toward a student's funding target. Repeat contributions
    /// from the same investor accumulate in one stake.
    ///
    /// # Errors
    /// - `IsaNotFound`: Student has no contract
    /// - `InvalidStatus`: Contract is not in Funding
    /// - `InvalidAmount`: Amount must be positive
    /// - `FundingExceedsCourseCost`: Would overshoot the funding target
    pub fn invest(
        env: Env,
        investor: Address,
        student: Address,
        amount: i128,
    ) -> Result<(), Error> {
        investor.require_auth();

        let mut isa = Self::load_isa(&env, &student)?;

        if isa.status != IsaStatus::Funding {
            return Err(Error::InvalidStatus);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        // Guard against overshooting the target before moving any funds.
        // The check reads the committed total; the host serializes
        // invocations touching this record, so two investors can never
        // jointly pass a stale check.
        let new_total = isa
            .total_invested
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;
        if new_total > isa.course_cost {
            return Err(Error::FundingExceedsCourseCost);
        }

        let asset_client = token::Client::new(&env, &isa.asset);
        asset_client.transfer(&investor, &env.current_contract_address(), &amount);

        isa.total_invested = new_total;
        isa.vault_balance = isa
            .vault_balance
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;

        let stake_key = DataKey::Stake(student.clone(), investor.clone());
        match env
            .storage()
            .instance()
            .get::<DataKey, InvestorStake>(&stake_key)
        {
            Some(mut stake) => {
                stake.amount = stake
                    .amount
                    .checked_add(amount)
                    .ok_or(Error::MathOverflow)?;
                env.storage().instance().set(&stake_key, &stake);
            }
            None => {
                let stake = InvestorStake {
                    isa: student.clone(),
                    investor: investor.clone(),
                    amount,
                    initialized: true,
                };
                env.storage().instance().set(&stake_key, &stake);

                // First contribution: index the investor for the listing view
                let investors_key = DataKey::Investors(student.clone());
                let mut investors = env
                    .storage()
                    .instance()
                    .get::<DataKey, Vec<Address>>(&investors_key)
                    .unwrap_or(vec![&env]);
                investors.push_back(investor.clone());
                env.storage().instance().set(&investors_key, &investors);
            }
        }

        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "invested"), student.clone(), investor.clone()),
            InvestedEvent {
                student,
                investor,
                amount,
                total_invested: new_total,
            },
        );

        Ok(())
    }

    // ============================================
    // FLOW 3: ESCROW RELEASE TO THE UNIVERSITY
    // ============================================

    /// Pay the whole escrow to the university once the target is reached.
    /// Callable by anyone; there is no partial release.
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `IsaNotFound`: Student has no contract
    /// - `InvalidStatus`: Contract is not in Funding
    /// - `NotFullyFunded`: total_invested below course_cost
    pub fn release_funds_to_university(env: Env, student: Address) -> Result<(), Error> {
        let config = Self::load_config(&env)?;
        let mut isa = Self::load_isa(&env, &student)?;

        if isa.status != IsaStatus::Funding {
            return Err(Error::InvalidStatus);
        }
        if isa.total_invested < isa.course_cost {
            return Err(Error::NotFullyFunded);
        }

        let amount = isa.vault_balance;
        let asset_client = token::Client::new(&env, &isa.asset);
        asset_client.transfer(
            &env.current_contract_address(),
            &config.university,
            &amount,
        );

        isa.vault_balance = 0;
        isa.status = IsaStatus::StudyingPaid;
        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "funds_released"), student.clone()),
            FundsReleasedEvent {
                student,
                university: config.university,
                amount,
            },
        );

        Ok(())
    }

    // ============================================
    // FLOW 4: SALARY INTAKE & REPAYMENT
    // ============================================

    /// Record the student's current salary (oracle only). A positive
    /// salary moves a studying or unemployed contract to Working; a zero
    /// salary marks the student Unemployed. Delinquency is left in place
    /// and is only cleared by payment.
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `UnauthorizedOracle`: Caller is not the oracle
    /// - `IsaNotFound`: Student has no contract
    /// - `InvalidStatus`: Contract already completed or dropped out
    /// - `InvalidAmount`: Salary must not be negative
    pub fn update_salary(
        env: Env,
        caller: Address,
        student: Address,
        salary: i128,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = Self::load_config(&env)?;
        if caller != config.oracle {
            return Err(Error::UnauthorizedOracle);
        }

        let mut isa = Self::load_isa(&env, &student)?;
        if isa.status.is_terminal() {
            return Err(Error::InvalidStatus);
        }
        if salary < 0 {
            return Err(Error::InvalidAmount);
        }

        isa.last_salary = salary;
        if salary == 0 {
            if matches!(isa.status, IsaStatus::StudyingPaid | IsaStatus::Working) {
                isa.status = IsaStatus::Unemployed;
            }
        } else if matches!(isa.status, IsaStatus::StudyingPaid | IsaStatus::Unemployed) {
            isa.status = IsaStatus::Working;
        }
        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "salary_updated"), student.clone()),
            SalaryUpdatedEvent { student, salary },
        );

        Ok(())
    }

    /// Pay the income share owed for the current period. Only the owning
    /// student can pay. The payment is capped so already_paid never
    /// exceeds max_cap; the payment that reaches the cap completes the
    /// contract. A delinquent contract returns to Working on payment.
    ///
    /// # Errors
    /// - `IsaNotFound`: Student has no contract
    /// - `InvalidStatus`: Contract is not Working or Delinquent
    /// - `NothingToPay`: Computed share is zero
    pub fn pay_share(env: Env, student: Address) -> Result<(), Error> {
        student.require_auth();

        let mut isa = Self::load_isa(&env, &student)?;

        if !matches!(isa.status, IsaStatus::Working | IsaStatus::Delinquent) {
            return Err(Error::InvalidStatus);
        }

        let headroom = isa
            .max_cap
            .checked_sub(isa.already_paid)
            .ok_or(Error::MathOverflow)?;
        let due = income_share_due(isa.last_salary, isa.percent, headroom)
            .ok_or(Error::MathOverflow)?;
        if due <= 0 {
            return Err(Error::NothingToPay);
        }

        let asset_client = token::Client::new(&env, &isa.asset);
        asset_client.transfer(&student, &env.current_contract_address(), &due);

        isa.already_paid = isa
            .already_paid
            .checked_add(due)
            .ok_or(Error::MathOverflow)?;
        isa.vault_balance = isa
            .vault_balance
            .checked_add(due)
            .ok_or(Error::MathOverflow)?;

        if isa.already_paid >= isa.max_cap {
            isa.status = IsaStatus::Completed;
        } else if isa.status == IsaStatus::Delinquent {
            isa.status = IsaStatus::Working;
        }
        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "share_paid"), student.clone()),
            SharePaidEvent {
                student,
                amount: due,
                already_paid: isa.already_paid,
            },
        );

        Ok(())
    }

    /// Flag a missed repayment period (oracle only). The missed-payment
    /// condition itself is attested off-ledger by the oracle.
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `UnauthorizedOracle`: Caller is not the oracle
    /// - `IsaNotFound`: Student has no contract
    /// - `InvalidStatus`: Contract is not Working
    pub fn report_delinquency(env: Env, caller: Address, student: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = Self::load_config(&env)?;
        if caller != config.oracle {
            return Err(Error::UnauthorizedOracle);
        }

        let mut isa = Self::load_isa(&env, &student)?;
        if isa.status != IsaStatus::Working {
            return Err(Error::InvalidStatus);
        }

        isa.status = IsaStatus::Delinquent;
        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "delinquency_reported"), student.clone()),
            DelinquencyReportedEvent { student },
        );

        Ok(())
    }

    /// Report that the student dropped out (university only). Terminal:
    /// zeroes the repayment cap and percent, discharging all remaining
    /// obligations. Permitted from any non-terminal status.
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `UnauthorizedUniversity`: Caller is not the university
    /// - `IsaNotFound`: Student has no contract
    /// - `InvalidStatus`: Contract already completed or dropped out
    pub fn report_dropout(env: Env, caller: Address, student: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = Self::load_config(&env)?;
        if caller != config.university {
            return Err(Error::UnauthorizedUniversity);
        }

        let mut isa = Self::load_isa(&env, &student)?;
        if isa.status.is_terminal() {
            return Err(Error::InvalidStatus);
        }

        isa.status = IsaStatus::DroppedOut;
        isa.max_cap = 0;
        isa.percent = 0;
        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "dropout_reported"), student.clone()),
            DropoutReportedEvent { student },
        );

        Ok(())
    }

    // ============================================
    // FLOW 5: PRO-RATA DISTRIBUTION TO INVESTORS
    // ============================================

    /// Distribute collected repayments to investors pro rata (admin only).
    /// The caller supplies the complete set of stakes as (investor,
    /// destination) pairs; the listed stake amounts must sum to
    /// total_invested, which rejects missing or duplicate entries. Each
    /// payout is floor(amount × stake / total_invested); truncation
    /// residue stays in the vault. The batch commits or rolls back as one
    /// transaction.
    ///
    /// # Errors
    /// - `NotInitialized`: Registry not created
    /// - `UnauthorizedAdmin`: Caller is not the admin
    /// - `IsaNotFound`: Student has no contract
    /// - `InvalidAmount`: Amount must be positive
    /// - `NoInvestors`: Empty payout list
    /// - `InsufficientCollected`: Amount exceeds collected, undistributed funds
    /// - `StakeNotFound`: A listed investor has no stake
    /// - `IncompleteStakeList`: Listed stakes do not sum to total_invested
    pub fn distribute_payments(
        env: Env,
        caller: Address,
        student: Address,
        amount: i128,
        payouts: Vec<PayoutEntry>,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = Self::load_config(&env)?;
        if caller != config.admin {
            return Err(Error::UnauthorizedAdmin);
        }

        let mut isa = Self::load_isa(&env, &student)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if payouts.is_empty() {
            return Err(Error::NoInvestors);
        }

        let collected = isa
            .already_paid
            .checked_sub(isa.total_distributed)
            .ok_or(Error::MathOverflow)?;
        if amount > collected {
            return Err(Error::InsufficientCollected);
        }

        // Pass 1: load and validate every listed stake before any payout
        let mut stakes: Vec<InvestorStake> = vec![&env];
        let mut listed_total: i128 = 0;
        for entry in payouts.iter() {
            let stake: InvestorStake = env
                .storage()
                .instance()
                .get(&DataKey::Stake(student.clone(), entry.investor.clone()))
                .ok_or(Error::StakeNotFound)?;
            listed_total = listed_total
                .checked_add(stake.amount)
                .ok_or(Error::MathOverflow)?;
            stakes.push_back(stake);
        }
        if listed_total != isa.total_invested {
            return Err(Error::IncompleteStakeList);
        }

        // Pass 2: pay each destination its truncated pro-rata share
        let asset_client = token::Client::new(&env, &isa.asset);
        let mut distributed: i128 = 0;
        for i in 0..payouts.len() {
            let entry = payouts.get_unchecked(i);
            let stake = stakes.get_unchecked(i);

            let share = pro_rata_share(amount, stake.amount, isa.total_invested)
                .ok_or(Error::MathOverflow)?;
            if share == 0 {
                continue;
            }

            asset_client.transfer(&env.current_contract_address(), &entry.destination, &share);
            distributed = distributed
                .checked_add(share)
                .ok_or(Error::MathOverflow)?;
        }

        isa.total_distributed = isa
            .total_distributed
            .checked_add(distributed)
            .ok_or(Error::MathOverflow)?;
        isa.vault_balance = isa
            .vault_balance
            .checked_sub(distributed)
            .ok_or(Error::MathOverflow)?;
        Self::save_isa(&env, &isa);

        env.events().publish(
            (Symbol::new(&env, "payments_distributed"), student.clone()),
            PaymentsDistributedEvent {
                student,
                requested: amount,
                distributed,
                total_distributed: isa.total_distributed,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Get the role registry
    pub fn get_config(env: Env) -> Result<PlatformConfig, Error> {
        Self::load_config(&env)
    }

    /// Get a student's raw contract record
    pub fn get_isa(env: Env, student: Address) -> Result<IsaContract, Error> {
        Self::load_isa(&env, &student)
    }

    /// Get the aggregated funding position of a contract
    pub fn get_funding_status(env: Env, student: Address) -> Result<FundingStatus, Error> {
        let isa = Self::load_isa(&env, &student)?;
        let remaining = isa.course_cost.saturating_sub(isa.total_invested).max(0);
        Ok(FundingStatus {
            course_cost: isa.course_cost,
            total_invested: isa.total_invested,
            remaining_to_invest: remaining,
            is_fully_funded: isa.total_invested >= isa.course_cost,
        })
    }

    /// Get one investor's stake in a contract
    pub fn get_stake(env: Env, student: Address, investor: Address) -> Result<InvestorStake, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Stake(student, investor))
            .ok_or(Error::StakeNotFound)
    }

    /// List every stake recorded against a contract
    pub fn list_stakes(env: Env, student: Address) -> Result<Vec<InvestorStake>, Error> {
        Self::load_isa(&env, &student)?;

        let investors = env
            .storage()
            .instance()
            .get::<DataKey, Vec<Address>>(&DataKey::Investors(student.clone()))
            .unwrap_or(vec![&env]);

        let mut stakes: Vec<InvestorStake> = vec![&env];
        for investor in investors.iter() {
            let stake: InvestorStake = env
                .storage()
                .instance()
                .get(&DataKey::Stake(student.clone(), investor))
                .ok_or(Error::StakeNotFound)?;
            stakes.push_back(stake);
        }
        Ok(stakes)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn load_config(env: &Env) -> Result<PlatformConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    fn load_isa(env: &Env, student: &Address) -> Result<IsaContract, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Isa(student.clone()))
            .ok_or(Error::IsaNotFound)
    }

    fn save_isa(env: &Env, isa: &IsaContract) {
        env.storage()
            .instance()
            .set(&DataKey::Isa(isa.owner.clone()), isa);
    }
}
