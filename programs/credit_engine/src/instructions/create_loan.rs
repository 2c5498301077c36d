use crate::constants::{SEEDS_CONFIG, SEEDS_LOAN, SEEDS_LOAN_ESCROW};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

pub fn create_loan(
    ctx: Context<CreateLoan>,
    loan_id: u64,
    principal: u64,
    apy: u64,
    term: i64,
) -> Result<()> {
    require!(principal > 0, CreditEngineError::ZeroAmount);
    require!(term > 0, CreditEngineError::LoanTermOutOfBounds);

    let config = &mut ctx.accounts.config;
    let loan = &mut ctx.accounts.loan;
    let clock = Clock::get()?;

    loan.borrower = ctx.accounts.borrower.key();
    loan.pool = ctx.accounts.pool.key();
    loan.mint = ctx.accounts.mint.key();
    loan.escrow = ctx.accounts.escrow.key();
    loan.principal = principal;
    loan.apy = apy;
    loan.term = term;
    loan.status = LoanStatus::Awaiting;
    loan.start = 0;
    loan.repaid = 0;
    loan.returned = 0;
    loan.shares_outstanding = 0;
    loan.loan_id = loan_id;
    loan.created_at = clock.unix_timestamp;
    loan.bump = ctx.bumps.loan;

    config.loans_created = config
        .loans_created
        .checked_add(1)
        .ok_or(CreditEngineError::MathOverflow)?;

    msg!(
        "Loan {} created: {} for {} seconds at {} bps",
        loan_id,
        principal,
        term,
        apy
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(loan_id: u64)]
pub struct CreateLoan<'info> {
    #[account(
        mut,
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        constraint = config.is_active @ CreditEngineError::ProtocolPaused,
        constraint = loan_id == config.loans_created @ CreditEngineError::InvalidConfiguration
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        constraint = pool.is_active @ CreditEngineError::PoolNotActive,
        has_one = mint
    )]
    pub pool: Account<'info, LendingPool>,

    #[account(
        init,
        payer = borrower,
        space = 8 + Loan::INIT_SPACE,
        seeds = [
            SEEDS_LOAN,
            borrower.key().as_ref(),
            pool.key().as_ref(),
            &loan_id.to_le_bytes()
        ],
        bump
    )]
    pub loan: Account<'info, Loan>,

    #[account(
        init,
        payer = borrower,
        token::mint = mint,
        token::authority = escrow,
        seeds = [SEEDS_LOAN_ESCROW, loan.key().as_ref()],
        bump
    )]
    pub escrow: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
