use crate::constants::{
    SEEDS_BUCKET, SEEDS_CONFIG, SEEDS_CREDIT_STATE, SEEDS_MUTEX, SEEDS_POOL_VAULT,
    SEEDS_POSITION,
};
use crate::error::*;
use crate::events::InterestPaid;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Settles only the interest portion of a credit line, leaving principal
/// untouched and resetting the repayment deadline.
pub fn pay_credit_interest(ctx: Context<PayCreditInterest>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let pool = &mut ctx.accounts.pool;
    let credit_state = &mut ctx.accounts.credit_state;
    let bucket = &mut ctx.accounts.bucket;
    let position = &mut ctx.accounts.position;
    let now = Clock::get()?.unix_timestamp;

    bucket.accrue(now)?;
    position.sync(bucket)?;

    let amount = position.accrued_interest;
    require!(amount > 0, CreditEngineError::ZeroAmount);

    let split = settle_repayment(
        position,
        bucket,
        credit_state,
        amount,
        now,
        config.interest_repayment_period,
    )?;
    pool.repay_credit_line(0, split.interest)?;
    config.total_value_locked = config
        .total_value_locked
        .checked_add(split.interest)
        .ok_or(CreditEngineError::MathOverflow)?;
    if split.closed {
        ctx.accounts.mutex.unlock(position.key())?;
    }

    let transfer_to_vault = TransferChecked {
        from: ctx.accounts.borrower_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.borrower.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        transfer_to_vault,
    );
    transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    emit!(InterestPaid {
        pool: pool.key(),
        borrower: ctx.accounts.borrower.key(),
        amount,
    });
    msg!("Interest {} paid in pool {}", amount, pool.key());
    Ok(())
}

#[derive(Accounts)]
pub struct PayCreditInterest<'info> {
    #[account(
        mut,
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        mut,
        constraint = pool.is_active @ CreditEngineError::PoolNotActive,
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
        mut,
        seeds = [SEEDS_BUCKET, pool.key().as_ref(), &[position.score]],
        bump = bucket.bump
    )]
    pub bucket: Account<'info, Bucket>,

    #[account(
        mut,
        seeds = [SEEDS_POSITION, pool.key().as_ref(), borrower.key().as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, CreditPosition>,

    #[account(
        mut,
        seeds = [SEEDS_MUTEX, borrower.key().as_ref()],
        bump = mutex.bump
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
}
