use crate::constants::{
    BASIS_POINTS, SEEDS_CONFIG, SEEDS_DISTRIBUTOR, SEEDS_DISTRIBUTOR_TREASURY, SEEDS_RATING,
    SEEDS_VOTE,
};
use crate::error::*;
use crate::events::RewardClaimed;
use crate::instructions::utils::{fixed_term_interest, reward_budget};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

/// Pays a rater their pro-rata share of a funded loan's reward. The first
/// claim for a loan pulls the budget from the distributor and routes the
/// staking pool's share; every later claim only redistributes what was
/// reserved.
pub fn claim_rater_reward(ctx: Context<ClaimRaterReward>) -> Result<()> {
    let config = &ctx.accounts.config;
    let loan = &ctx.accounts.loan;
    let pool = &ctx.accounts.pool;
    let rating = &mut ctx.accounts.rating;
    let record = &mut ctx.accounts.voter_record;
    let distributor = &mut ctx.accounts.distributor;

    require!(
        loan.status != LoanStatus::Awaiting,
        CreditEngineError::LoanStillPending
    );

    let signer_seeds: &[&[&[u8]]] = &[&[
        SEEDS_DISTRIBUTOR_TREASURY,
        &[ctx.bumps.treasury],
    ]];
    let decimals = ctx.accounts.reward_mint.decimals;

    if !rating.reward_pulled {
        let interest = fixed_term_interest(loan.principal, loan.apy, loan.term);
        let budget = reward_budget(
            interest,
            pool.decimals,
            config.staked_token_decimals,
            config.reward_multiplier,
        )?;
        let pulled = distributor.drain(budget);
        let raters_pot = ((pulled as u128)
            .saturating_mul(config.raters_reward_factor as u128)
            / (BASIS_POINTS as u128)) as u64;
        let stake_pool_share = pulled - raters_pot;
        rating.reserve_reward(raters_pot);

        if stake_pool_share > 0 {
            let transfer_to_stakers = TransferChecked {
                from: ctx.accounts.treasury.to_account_info(),
                to: ctx.accounts.stake_pool_account.to_account_info(),
                mint: ctx.accounts.reward_mint.to_account_info(),
                authority: ctx.accounts.treasury.to_account_info(),
            };
            let cpi_ctx = CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                transfer_to_stakers,
                signer_seeds,
            );
            transfer_checked(cpi_ctx, stake_pool_share, decimals)?;
        }
    }

    let amount = rating.claim(record)?;
    if amount > 0 {
        let transfer_to_rater = TransferChecked {
            from: ctx.accounts.treasury.to_account_info(),
            to: ctx.accounts.rater_token_account.to_account_info(),
            mint: ctx.accounts.reward_mint.to_account_info(),
            authority: ctx.accounts.treasury.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_to_rater,
            signer_seeds,
        );
        transfer_checked(cpi_ctx, amount, decimals)?;
    }

    emit!(RewardClaimed {
        loan: loan.key(),
        rater: record.rater,
        amount,
    });
    msg!("Rater {} claimed {}", record.rater, amount);
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimRaterReward<'info> {
    #[account(
        seeds = [SEEDS_CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(constraint = loan.pool == pool.key())]
    pub loan: Account<'info, Loan>,

    pub pool: Account<'info, LendingPool>,

    #[account(
        mut,
        seeds = [SEEDS_RATING, loan.key().as_ref()],
        bump = rating.bump
    )]
    pub rating: Account<'info, Rating>,

    #[account(
        mut,
        seeds = [SEEDS_VOTE, loan.key().as_ref(), rater.key().as_ref()],
        bump = voter_record.bump
    )]
    pub voter_record: Account<'info, VoterRecord>,

    #[account(
        mut,
        seeds = [SEEDS_DISTRIBUTOR],
        bump = distributor.bump,
        has_one = reward_mint
    )]
    pub distributor: Account<'info, RewardDistributor>,

    #[account(
        mut,
        seeds = [SEEDS_DISTRIBUTOR_TREASURY],
        bump,
        constraint = treasury.key() == distributor.treasury
    )]
    pub treasury: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = stake_pool_account.key() == distributor.stake_pool_account
    )]
    pub stake_pool_account: InterfaceAccount<'info, TokenAccount>,

    pub reward_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = rater_token_account.owner == rater.key(),
        constraint = rater_token_account.mint == reward_mint.key()
    )]
    pub rater_token_account: InterfaceAccount<'info, TokenAccount>,

    pub rater: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
