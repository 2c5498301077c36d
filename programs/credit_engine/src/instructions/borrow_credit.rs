use crate::constants::{
    SEEDS_BASE_RATE, SEEDS_BUCKET, SEEDS_CONFIG, SEEDS_CREDIT_STATE, SEEDS_MUTEX,
    SEEDS_POOL_VAULT, SEEDS_POSITION, SEEDS_SCORE,
};
use crate::error::*;
use crate::instructions::utils::{borrow_limit, credit_line_rate};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Draws on a revolving credit line. The first draw in a pool locks the
/// borrower's debt slot and starts the interest-repayment clock; top-ups in
/// the same pool do neither.
pub fn borrow_credit(ctx: Context<BorrowCredit>, amount: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let pool = &mut ctx.accounts.pool;
    let credit_state = &mut ctx.accounts.credit_state;
    let bucket = &mut ctx.accounts.bucket;
    let position = &mut ctx.accounts.position;
    let credit_score = &ctx.accounts.credit_score;
    let mutex = &mut ctx.accounts.mutex;
    let now = Clock::get()?.unix_timestamp;

    require!(amount > 0, CreditEngineError::ZeroAmount);
    require!(
        credit_score.is_fresh(now, config.credit_update_period),
        CreditEngineError::CreditScoreStale
    );
    require!(!position.is_overdue(now), CreditEngineError::InterestOverdue);

    let score = credit_score.score;
    if position.principal > 0 {
        require!(position.score == score, CreditEngineError::RebucketRequired);
    }

    // bring the bucket current, then refresh its rate from live inputs
    if bucket.updated_at == 0 {
        bucket.pool = pool.key();
        bucket.score = score;
        bucket.bump = ctx.bumps.bucket;
    }
    bucket.accrue(now)?;
    bucket.set_rate(credit_line_rate(
        ctx.accounts.base_rate_oracle.rate_bps,
        config.risk_premium,
        score,
        config.utilization_adjustment_coefficient,
        pool.utilization_bps(),
    ));

    if position.bump == 0 {
        position.pool = pool.key();
        position.borrower = ctx.accounts.borrower.key();
        position.bump = ctx.bumps.position;
    }
    position.sync(bucket)?;

    let limit = borrow_limit(
        credit_score.max_borrower_limit,
        score,
        pool.pool_value(),
        config.total_value_locked,
    );
    let borrowed_after = position
        .principal
        .checked_add(amount)
        .ok_or(CreditEngineError::MathOverflow)?;
    require!(borrowed_after <= limit, CreditEngineError::BorrowLimitExceeded);

    if position.principal == 0 {
        mutex.borrower = ctx.accounts.borrower.key();
        if mutex.bump == 0 {
            mutex.bump = ctx.bumps.mutex;
        }
        mutex.lock(position.key(), now)?;
        position.score = score;
        position.next_interest_repay_time =
            now.saturating_add(config.interest_repayment_period);
        bucket.join(amount)?;
        credit_state.mark_bucket_used(score);
    } else {
        require!(
            mutex.is_locked_by(position.key()),
            CreditEngineError::BorrowerAlreadyLocked
        );
        bucket.increase(amount)?;
    }
    position.principal = borrowed_after;
    credit_state.total_borrowed = credit_state
        .total_borrowed
        .checked_add(amount)
        .ok_or(CreditEngineError::MathOverflow)?;

    pool.borrow_credit_line(amount)?;

    let pool_key = pool.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_POOL_VAULT,
        pool_key.as_ref(),
        &[ctx.bumps.vault],
    ]];
    let transfer_to_borrower = TransferChecked {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.borrower_token_account.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        transfer_to_borrower,
        signer_seeds,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    msg!(
        "Borrower {} drew {} from pool {} at {} bps",
        position.borrower,
        amount,
        pool.key(),
        bucket.rate
    );
    Ok(())
}

#[derive(Accounts)]
pub struct BorrowCredit<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        constraint = config.is_active @ CreditEngineError::ProtocolPaused
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        mut,
        constraint = pool.is_active @ CreditEngineError::PoolNotActive,
        constraint = pool.is_allowed @ CreditEngineError::PoolNotAllowed,
        has_one = mint
    )]
    pub pool: Account<'info, LendingPool>,

    #[account(
        mut,
        seeds = [SEEDS_POOL_VAULT, pool.key().as_ref()],
        bump,
        constraint = vault.key() == pool.vault
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SEEDS_CREDIT_STATE, pool.key().as_ref()],
        bump = credit_state.bump
    )]
    pub credit_state: Account<'info, CreditState>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + Bucket::INIT_SPACE,
        seeds = [SEEDS_BUCKET, pool.key().as_ref(), &[credit_score.score]],
        bump
    )]
    pub bucket: Account<'info, Bucket>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + CreditPosition::INIT_SPACE,
        seeds = [SEEDS_POSITION, pool.key().as_ref(), borrower.key().as_ref()],
        bump
    )]
    pub position: Account<'info, CreditPosition>,

    #[account(
        seeds = [SEEDS_SCORE, borrower.key().as_ref()],
        bump = credit_score.bump,
        constraint = credit_score.is_eligible() @ CreditEngineError::BorrowerNotEligible
    )]
    pub credit_score: Account<'info, CreditScore>,

    #[account(
        seeds = [SEEDS_BASE_RATE, pool.key().as_ref()],
        bump = base_rate_oracle.bump
    )]
    pub base_rate_oracle: Account<'info, BaseRateOracle>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + BorrowingMutex::INIT_SPACE,
        seeds = [SEEDS_MUTEX, borrower.key().as_ref()],
        bump
    )]
    pub mutex: Account<'info, BorrowingMutex>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = borrower_token_account.owner == borrower.key(),
        constraint = borrower_token_account.mint == mint.key()
    )]
    pub borrower_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
