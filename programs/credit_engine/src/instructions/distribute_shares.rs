use crate::constants::{SEEDS_PORTFOLIO, SEEDS_SHARES};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

/// Passes `numerator/denominator` of the portfolio's debt shares in one loan
/// through to a beneficiary — used when a pool is exited pro rata and must
/// hand out its loan exposure in kind. The off-chain exiter iterates the
/// portfolio's record list, calling this once per held loan.
pub fn distribute_shares(
    ctx: Context<DistributeShares>,
    numerator: u64,
    denominator: u64,
) -> Result<()> {
    require!(
        denominator > 0 && numerator <= denominator,
        CreditEngineError::InvalidFraction
    );

    let portfolio_shares = &mut ctx.accounts.portfolio_shares;
    let beneficiary_shares = &mut ctx.accounts.beneficiary_shares;

    let moved = ((portfolio_shares.amount as u128)
        .checked_mul(numerator as u128)
        .ok_or(CreditEngineError::MathOverflow)?
        / (denominator as u128)) as u64;
    require!(moved > 0, CreditEngineError::ZeroAmount);

    portfolio_shares.amount -= moved;

    beneficiary_shares.loan = ctx.accounts.loan.key();
    beneficiary_shares.holder = ctx.accounts.beneficiary.key();
    beneficiary_shares.bump = ctx.bumps.beneficiary_shares;
    beneficiary_shares.amount = beneficiary_shares
        .amount
        .checked_add(moved)
        .ok_or(CreditEngineError::MathOverflow)?;

    msg!(
        "Distributed {} shares of loan {} to {}",
        moved,
        ctx.accounts.loan.key(),
        beneficiary_shares.holder
    );
    Ok(())
}

#[derive(Accounts)]
pub struct DistributeShares<'info> {
    #[account(
        has_one = authority @ CreditEngineError::InvalidConfiguration
    )]
    pub pool: Account<'info, LendingPool>,

    #[account(constraint = loan.pool == pool.key())]
    pub loan: Account<'info, Loan>,

    #[account(
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

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + ShareBalance::INIT_SPACE,
        seeds = [SEEDS_SHARES, loan.key().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub beneficiary_shares: Account<'info, ShareBalance>,

    /// CHECK: recipient of the loan exposure.
    pub beneficiary: AccountInfo<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
