pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod credit_engine {
    use super::*;

    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        oracle_authority: Pubkey,
        params: ProtocolParams,
    ) -> Result<()> {
        instructions::initialize_protocol(ctx, oracle_authority, params)?;
        Ok(())
    }

    pub fn update_protocol_config(
        ctx: Context<UpdateProtocolConfig>,
        params: ProtocolParams,
        is_active: bool,
    ) -> Result<()> {
        instructions::update_protocol_config(ctx, params, is_active)?;
        Ok(())
    }

    pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
        instructions::create_pool(ctx)?;
        Ok(())
    }

    pub fn allow_pool(ctx: Context<AllowPool>, allowed: bool) -> Result<()> {
        instructions::allow_pool(ctx, allowed)?;
        Ok(())
    }

    pub fn deposit_to_pool(ctx: Context<DepositToPool>, amount: u64) -> Result<()> {
        instructions::deposit_to_pool(ctx, amount)?;
        Ok(())
    }

    pub fn set_credit_score(
        ctx: Context<SetCreditScore>,
        score: u8,
        max_borrower_limit: u64,
        status: BorrowerStatus,
    ) -> Result<()> {
        instructions::set_credit_score(ctx, score, max_borrower_limit, status)?;
        Ok(())
    }

    pub fn set_base_rate(ctx: Context<SetBaseRate>, rate_bps: u64) -> Result<()> {
        instructions::set_base_rate(ctx, rate_bps)?;
        Ok(())
    }

    pub fn initialize_distributor(
        ctx: Context<InitializeDistributor>,
        amount: u64,
    ) -> Result<()> {
        instructions::initialize_distributor(ctx, amount)?;
        Ok(())
    }

    pub fn empty_distributor(ctx: Context<EmptyDistributor>) -> Result<()> {
        instructions::empty_distributor(ctx)?;
        Ok(())
    }

    // fixed-term loans

    pub fn create_loan(
        ctx: Context<CreateLoan>,
        loan_id: u64,
        principal: u64,
        apy: u64,
        term: i64,
    ) -> Result<()> {
        instructions::create_loan(ctx, loan_id, principal, apy, term)?;
        Ok(())
    }

    pub fn submit_loan(ctx: Context<SubmitLoan>) -> Result<()> {
        instructions::submit_loan(ctx)?;
        Ok(())
    }

    pub fn rate_yes(ctx: Context<CastRating>) -> Result<()> {
        instructions::cast_rating(ctx, true)?;
        Ok(())
    }

    pub fn rate_no(ctx: Context<CastRating>) -> Result<()> {
        instructions::cast_rating(ctx, false)?;
        Ok(())
    }

    pub fn retract_loan(ctx: Context<RetractLoan>) -> Result<()> {
        instructions::retract_loan(ctx)?;
        Ok(())
    }

    pub fn reset_cast_ratings(ctx: Context<ResetCastRatings>) -> Result<()> {
        instructions::reset_cast_ratings(ctx)?;
        Ok(())
    }

    pub fn claim_rater_reward(ctx: Context<ClaimRaterReward>) -> Result<()> {
        instructions::claim_rater_reward(ctx)?;
        Ok(())
    }

    pub fn fund_loan(ctx: Context<FundLoan>) -> Result<()> {
        instructions::fund_loan(ctx)?;
        Ok(())
    }

    pub fn withdraw_loan(ctx: Context<WithdrawLoan>) -> Result<()> {
        instructions::withdraw_loan(ctx)?;
        Ok(())
    }

    pub fn repay_loan(ctx: Context<RepayLoan>, amount: u64) -> Result<()> {
        instructions::repay_loan(ctx, amount)?;
        Ok(())
    }

    pub fn close_loan(ctx: Context<CloseLoan>) -> Result<()> {
        instructions::close_loan(ctx)?;
        Ok(())
    }

    pub fn reclaim_loan(ctx: Context<ReclaimLoan>) -> Result<()> {
        instructions::reclaim_loan(ctx)?;
        Ok(())
    }

    pub fn distribute_shares(
        ctx: Context<DistributeShares>,
        numerator: u64,
        denominator: u64,
    ) -> Result<()> {
        instructions::distribute_shares(ctx, numerator, denominator)?;
        Ok(())
    }

    pub fn redeem_shares(ctx: Context<RedeemShares>, amount: u64) -> Result<()> {
        instructions::redeem_shares(ctx, amount)?;
        Ok(())
    }

    // revolving credit lines

    pub fn borrow_credit(ctx: Context<BorrowCredit>, amount: u64) -> Result<()> {
        instructions::borrow_credit(ctx, amount)?;
        Ok(())
    }

    pub fn repay_credit(ctx: Context<RepayCredit>, amount: u64) -> Result<()> {
        instructions::repay_credit(ctx, amount)?;
        Ok(())
    }

    pub fn repay_credit_in_full(ctx: Context<RepayCreditInFull>) -> Result<()> {
        instructions::repay_credit_in_full(ctx)?;
        Ok(())
    }

    pub fn pay_credit_interest(ctx: Context<PayCreditInterest>) -> Result<()> {
        instructions::pay_credit_interest(ctx)?;
        Ok(())
    }

    pub fn poke_bucket(ctx: Context<PokeBucket>) -> Result<()> {
        instructions::poke_bucket(ctx)?;
        Ok(())
    }

    pub fn rebucket_borrower(ctx: Context<RebucketBorrower>) -> Result<()> {
        instructions::rebucket_borrower(ctx)?;
        Ok(())
    }
}
