use crate::constants::{SEEDS_RATING, SEEDS_VOTE};
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;

/// Neutralizes prior votes on a still-pending loan: zeroes the aggregate
/// totals and the caller's own recorded weight.
pub fn reset_cast_ratings(ctx: Context<ResetCastRatings>) -> Result<()> {
    let loan = &ctx.accounts.loan;
    let rating = &mut ctx.accounts.rating;
    let record = &mut ctx.accounts.voter_record;

    require!(
        loan.status == LoanStatus::Awaiting,
        CreditEngineError::LoanNotPending
    );
    rating.reset_cast(record);

    msg!("Ratings reset for loan {}", loan.key());
    Ok(())
}

#[derive(Accounts)]
pub struct ResetCastRatings<'info> {
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_RATING, loan.key().as_ref()],
        bump = rating.bump
    )]
    pub rating: Account<'info, Rating>,

    #[account(
        mut,
        seeds = [SEEDS_VOTE, loan.key().as_ref(), caller.key().as_ref()],
        bump = voter_record.bump
    )]
    pub voter_record: Account<'info, VoterRecord>,

    pub caller: Signer<'info>,
}
