use crate::constants::{SEEDS_CONFIG, SEEDS_SCORE};
use crate::error::*;
use crate::events::BorrowerAllowed;
use crate::state::*;
use anchor_lang::prelude::*;

pub fn set_credit_score(
    ctx: Context<SetCreditScore>,
    score: u8,
    max_borrower_limit: u64,
    status: BorrowerStatus,
) -> Result<()> {
    let credit_score = &mut ctx.accounts.credit_score;
    let clock = Clock::get()?;

    credit_score.borrower = ctx.accounts.borrower.key();
    credit_score.score = score;
    credit_score.max_borrower_limit = max_borrower_limit;
    credit_score.status = status;
    credit_score.updated_at = clock.unix_timestamp;
    credit_score.bump = ctx.bumps.credit_score;

    emit!(BorrowerAllowed {
        borrower: credit_score.borrower,
        score,
        eligible: credit_score.is_eligible(),
    });
    msg!(
        "Credit score for borrower {} set to {}",
        credit_score.borrower,
        score
    );
    Ok(())
}

#[derive(Accounts)]
pub struct SetCreditScore<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump,
        constraint = config.oracle_authority == oracle_authority.key()
            @ CreditEngineError::InvalidConfiguration
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        init_if_needed,
        payer = oracle_authority,
        space = 8 + CreditScore::INIT_SPACE,
        seeds = [SEEDS_SCORE, borrower.key().as_ref()],
        bump
    )]
    pub credit_score: Account<'info, CreditScore>,

    /// CHECK: the borrower this score record describes.
    pub borrower: AccountInfo<'info>,

    #[account(mut)]
    pub oracle_authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
