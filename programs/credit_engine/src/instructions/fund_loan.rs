use crate::constants::{
    SEEDS_CONFIG, SEEDS_LOAN_ESCROW, SEEDS_MUTEX, SEEDS_POOL_VAULT, SEEDS_PORTFOLIO, SEEDS_RATING,
    SEEDS_SCORE, SEEDS_SHARES,
};
use crate::error::*;
use crate::events::LoanFunded;
use crate::instructions::utils::{loan_is_credible, min_yes_votes};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// The funding gatekeeper: checks every size, duration, rating and risk
/// threshold, then moves pool principal into the loan escrow and books the
/// debt shares to the pool's portfolio.
pub fn fund_loan(ctx: Context<FundLoan>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let pool = &mut ctx.accounts.pool;
    let loan = &mut ctx.accounts.loan;
    let rating = &ctx.accounts.rating;
    let mutex = &mut ctx.accounts.mutex;
    let now = Clock::get()?.unix_timestamp;

    require!(
        loan.principal >= config.min_loan_size && loan.principal <= config.max_loan_size,
        CreditEngineError::LoanSizeOutOfBounds
    );
    require!(
        loan.term >= config.min_loan_term && loan.term <= config.max_loan_term,
        CreditEngineError::LoanTermOutOfBounds
    );
    require!(loan.apy >= config.min_apy, CreditEngineError::ApyTooLow);

    require!(!rating.is_retracted(), CreditEngineError::RatingRetracted);
    require!(
        now.saturating_sub(rating.submitted_at) > config.voting_period,
        CreditEngineError::VotingPeriodNotElapsed
    );
    let required_yes = min_yes_votes(
        loan.principal,
        pool.decimals,
        config.staked_token_decimals,
        config.participation_factor,
    )?;
    require!(
        rating.yes_total > required_yes,
        CreditEngineError::InsufficientParticipation
    );
    require!(
        loan_is_credible(
            loan.apy,
            loan.term,
            rating.yes_total,
            rating.no_total,
            config.risk_aversion
        ),
        CreditEngineError::LoanNotCredible
    );

    // one active debt position system-wide
    mutex.borrower = loan.borrower;
    if mutex.bump == 0 {
        mutex.bump = ctx.bumps.mutex;
    }
    mutex.lock(loan.key(), now)?;

    // effects before the token interaction
    pool.borrow_fixed_term(loan.principal)?;
    let shares = loan.fund(now)?;

    let share_balance = &mut ctx.accounts.portfolio_shares;
    share_balance.loan = loan.key();
    share_balance.holder = ctx.accounts.portfolio.key();
    share_balance.bump = ctx.bumps.portfolio_shares;
    share_balance.amount = share_balance
        .amount
        .checked_add(shares)
        .ok_or(CreditEngineError::MathOverflow)?;

    ctx.accounts.portfolio.push(FundedLoan {
        loan: loan.key(),
        principal: loan.principal,
        apy: loan.apy,
        term: loan.term,
        start: now,
    })?;

    config.total_funded_volume = config
        .total_funded_volume
        .checked_add(loan.principal)
        .ok_or(CreditEngineError::MathOverflow)?;

    let pool_key = pool.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_POOL_VAULT,
        pool_key.as_ref(),
        &[ctx.bumps.vault],
    ]];
    let transfer_to_escrow = TransferChecked {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.escrow.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        transfer_to_escrow,
        signer_seeds,
    );
    transfer_checked(cpi_ctx, loan.principal, ctx.accounts.mint.decimals)?;

    emit!(LoanFunded {
        loan: loan.key(),
        pool: pool.key(),
        borrower: loan.borrower,
        principal: loan.principal,
        timestamp: now,
    });
    msg!(
        "Loan {} funded with {} from pool {}",
        loan.key(),
        loan.principal,
        pool.key()
    );
    Ok(())
}

#[derive(Accounts)]
pub struct FundLoan<'info> {
    #[account(
        mut,
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        constraint = config.is_active @ CreditEngineError::ProtocolPaused
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        mut,
        constraint = pool.is_active @ CreditEngineError::PoolNotActive,
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

    #[account(
        mut,
        constraint = loan.borrower == borrower.key() @ CreditEngineError::CallerNotBorrower
    )]
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_LOAN_ESCROW, loan.key().as_ref()],
        bump,
        constraint = escrow.key() == loan.escrow
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    #[account(
        seeds = [SEEDS_RATING, loan.key().as_ref()],
        bump = rating.bump
    )]
    pub rating: Account<'info, Rating>,

    #[account(
        seeds = [SEEDS_SCORE, borrower.key().as_ref()],
        bump = credit_score.bump,
        constraint = credit_score.is_eligible() @ CreditEngineError::BorrowerNotEligible
    )]
    pub credit_score: Account<'info, CreditScore>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + BorrowingMutex::INIT_SPACE,
        seeds = [SEEDS_MUTEX, borrower.key().as_ref()],
        bump
    )]
    pub mutex: Account<'info, BorrowingMutex>,

    #[account(
        mut,
        seeds = [SEEDS_PORTFOLIO, pool.key().as_ref()],
        bump = portfolio.bump
    )]
    pub portfolio: Account<'info, Portfolio>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + ShareBalance::INIT_SPACE,
        seeds = [SEEDS_SHARES, loan.key().as_ref(), portfolio.key().as_ref()],
        bump
    )]
    pub portfolio_shares: Account<'info, ShareBalance>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
