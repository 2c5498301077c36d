use crate::constants::{SEEDS_CONFIG, SEEDS_RATING, SEEDS_VOTE};
use crate::error::*;
use crate::events::LoanRated;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

/// Records the rater's current staked-governance balance on one side of a
/// pending loan. Nothing is transferred or locked.
pub fn cast_rating(ctx: Context<CastRating>, yes: bool) -> Result<()> {
    let loan = &ctx.accounts.loan;
    let rating = &mut ctx.accounts.rating;
    let record = &mut ctx.accounts.voter_record;

    require!(
        loan.status == LoanStatus::Awaiting,
        CreditEngineError::LoanNotPending
    );
    require!(!rating.is_retracted(), CreditEngineError::RatingRetracted);

    record.loan = loan.key();
    record.rater = ctx.accounts.rater.key();
    record.bump = ctx.bumps.voter_record;

    let weight = ctx.accounts.staked_token_account.amount;
    rating.cast(record, yes, weight)?;

    emit!(LoanRated {
        loan: loan.key(),
        rater: record.rater,
        yes,
        weight,
    });
    msg!(
        "Rater {} cast {} with weight {}",
        record.rater,
        if yes { "yes" } else { "no" },
        weight
    );
    Ok(())
}

#[derive(Accounts)]
pub struct CastRating<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    pub loan: Account<'info, Loan>,

    #[account(
        mut,
        seeds = [SEEDS_RATING, loan.key().as_ref()],
        bump = rating.bump
    )]
    pub rating: Account<'info, Rating>,

    #[account(
        init_if_needed,
        payer = rater,
        space = 8 + VoterRecord::INIT_SPACE,
        seeds = [SEEDS_VOTE, loan.key().as_ref(), rater.key().as_ref()],
        bump
    )]
    pub voter_record: Account<'info, VoterRecord>,

    /// Live balance of the staked governance mint; read, never moved.
    #[account(
        constraint = staked_token_account.owner == rater.key(),
        constraint = staked_token_account.mint == config.staked_token_mint
            @ CreditEngineError::InvalidConfiguration
    )]
    pub staked_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub rater: Signer<'info>,

    pub system_program: Program<'info, System>,
}
