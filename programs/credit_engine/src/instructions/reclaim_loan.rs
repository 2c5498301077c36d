use crate::constants::{
    SEEDS_CONFIG, SEEDS_LOAN_ESCROW, SEEDS_POOL_VAULT, SEEDS_PORTFOLIO, SEEDS_SHARES,
};
use crate::error::*;
use crate::events::LoanReclaimed;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Redeems the pool's debt shares in a closed loan and returns the recovered
/// currency to the pool, retiring the exposure.
pub fn reclaim_loan(ctx: Context<ReclaimLoan>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let pool = &mut ctx.accounts.pool;
    let loan = &mut ctx.accounts.loan;
    let portfolio = &mut ctx.accounts.portfolio;
    let shares = &mut ctx.accounts.portfolio_shares;

    require!(shares.amount > 0, CreditEngineError::InsufficientShares);

    let payout = loan.redeem(shares.amount, ctx.accounts.escrow.amount)?;
    shares.amount = 0;

    let record = portfolio.remove(loan.key())?;
    pool.settle_fixed_term(record.principal, payout)?;
    config.total_value_locked = config
        .total_value_locked
        .checked_add(payout.saturating_sub(record.principal))
        .ok_or(CreditEngineError::MathOverflow)?
        .saturating_sub(record.principal.saturating_sub(payout));

    if payout > 0 {
        let loan_key = loan.key();
        let signer_seeds: &[&[&[u8]]] = &[&[
            SEEDS_LOAN_ESCROW,
            loan_key.as_ref(),
            &[ctx.bumps.escrow],
        ]];
        let transfer_to_vault = TransferChecked {
            from: ctx.accounts.escrow.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            authority: ctx.accounts.escrow.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_to_vault,
            signer_seeds,
        );
        transfer_checked(cpi_ctx, payout, ctx.accounts.mint.decimals)?;
    }

    emit!(LoanReclaimed {
        loan: loan.key(),
        pool: pool.key(),
        returned: payout,
    });
    msg!(
        "Reclaimed {} from loan {} into pool {}",
        payout,
        loan.key(),
        pool.key()
    );
    Ok(())
}

#[derive(Accounts)]
pub struct ReclaimLoan<'info> {
    #[account(
        mut,
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        mut,
        has_one = authority @ CreditEngineError::InvalidConfiguration,
        constraint = loan.pool == pool.key(),
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

    #[account(mut)]
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_LOAN_ESCROW, loan.key().as_ref()],
        bump,
        constraint = escrow.key() == loan.escrow
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SEEDS_PORTFOLIO, pool.key().as_ref()],
        bump = portfolio.bump
    )]
    pub portfolio: Account<'info, Portfolio>,

    #[account(
        mut,
        seeds = [SEEDS_SHARES, loan.key().as_ref(), portfolio.key().as_ref()],
        bump = portfolio_shares.bump
    )]
    pub portfolio_shares: Account<'info, ShareBalance>,

    pub mint: InterfaceAccount<'info, Mint>,

    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
