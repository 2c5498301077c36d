use crate::constants::SEEDS_RATING;
use crate::error::*;
use crate::events::LoanRetracted;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn retract_loan(ctx: Context<RetractLoan>) -> Result<()> {
    let loan = &ctx.accounts.loan;
    let rating = &mut ctx.accounts.rating;
    let clock = Clock::get()?;

    require!(
        loan.status == LoanStatus::Awaiting,
        CreditEngineError::LoanNotPending
    );
    rating.retract(ctx.accounts.creator.key())?;

    emit!(LoanRetracted {
        loan: loan.key(),
        timestamp: clock.unix_timestamp,
    });
    msg!("Loan {} retracted", loan.key());
    Ok(())
}

#[derive(Accounts)]
pub struct RetractLoan<'info> {
    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_RATING, loan.key().as_ref()],
        bump = rating.bump
    )]
    pub rating: Account<'info, Rating>,

    pub creator: Signer<'info>,
}
