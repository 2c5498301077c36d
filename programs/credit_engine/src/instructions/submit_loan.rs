use crate::constants::{SEEDS_RATING, SEEDS_SCORE};
use crate::error::*;
use crate::events::LoanSubmitted;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn submit_loan(ctx: Context<SubmitLoan>) -> Result<()> {
    let loan = &ctx.accounts.loan;
    let rating = &mut ctx.accounts.rating;
    let clock = Clock::get()?;

    require!(
        loan.status == LoanStatus::Awaiting,
        CreditEngineError::LoanNotAwaiting
    );

    rating.loan = loan.key();
    rating.creator = ctx.accounts.borrower.key();
    rating.submitted_at = clock.unix_timestamp;
    rating.yes_total = 0;
    rating.no_total = 0;
    rating.reward_reserved = 0;
    rating.reward_claimed = 0;
    rating.reward_pulled = false;
    rating.total_weight_at_claim = 0;
    rating.bump = ctx.bumps.rating;

    emit!(LoanSubmitted {
        loan: rating.loan,
        creator: rating.creator,
        timestamp: rating.submitted_at,
    });
    msg!("Loan {} submitted for rating", rating.loan);
    Ok(())
}

#[derive(Accounts)]
pub struct SubmitLoan<'info> {
    /// Submitter must be the loan's own borrower.
    #[account(
        constraint = loan.borrower == borrower.key() @ CreditEngineError::CallerNotBorrower
    )]
    pub loan: Account<'info, Loan>,

    /// Submitter must be allow-listed by the credit oracle.
    #[account(
        seeds = [SEEDS_SCORE, borrower.key().as_ref()],
        bump = credit_score.bump,
        constraint = credit_score.is_eligible() @ CreditEngineError::BorrowerNotEligible
    )]
    pub credit_score: Account<'info, CreditScore>,

    /// A loan can only ever be submitted once; re-submission after a retract
    /// fails on the existing account.
    #[account(
        init,
        payer = borrower,
        space = 8 + Rating::INIT_SPACE,
        seeds = [SEEDS_RATING, loan.key().as_ref()],
        bump
    )]
    pub rating: Account<'info, Rating>,

    #[account(mut)]
    pub borrower: Signer<'info>,

    pub system_program: Program<'info, System>,
}
