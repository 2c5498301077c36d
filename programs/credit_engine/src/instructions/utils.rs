use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS, CONCENTRATION_LIMIT_BPS, NORMALIZED_DECIMALS, YEAR};
use crate::error::CreditEngineError;

/// Step table over credit score, fraction out of 10_000. Breakpoints every 32
/// score points with band floors at 255-32k; monotone increasing in score.
/// Shared by the borrow-limit curve (as-is) and the rate-adjustment curve
/// (inverted), so the two stay in lockstep.
pub fn score_rate_table(score: u8) -> u64 {
    match score {
        255 => 10_000,
        223..=254 => 9_043,
        191..=222 => 8_051,
        159..=190 => 7_007,
        127..=158 => 5_893,
        95..=126 => 4_679,
        63..=94 => 3_313,
        31..=62 => 1_684,
        _ => 0,
    }
}

/// Basis points added to the borrowing rate for a given score. Zero at 255,
/// maximal at 0.
pub fn credit_score_adjustment(score: u8) -> u64 {
    BASIS_POINTS - score_rate_table(score)
}

/// Fraction (out of 10_000) of the nominal borrower limit actually available.
pub fn borrow_limit_adjustment(score: u8) -> u64 {
    score_rate_table(score)
}

/// Quadratic utilization penalty: zero when the pool is idle, `coefficient`
/// basis points when fully lent out.
pub fn utilization_adjustment(coefficient: u64, utilization_bps: u64) -> u64 {
    let adj = (coefficient as u128)
        .saturating_mul(utilization_bps as u128)
        .saturating_mul(utilization_bps as u128)
        / (BASIS_POINTS as u128 * BASIS_POINTS as u128);
    adj.min(u64::MAX as u128) as u64
}

/// All-in borrowing APY in basis points. Additive terms saturate rather than
/// overflow.
pub fn combined_rate(
    base_rate: u64,
    risk_premium: u64,
    score: u8,
    utilization_adjustment_bps: u64,
) -> u64 {
    base_rate
        .saturating_add(risk_premium)
        .saturating_add(credit_score_adjustment(score))
        .saturating_add(utilization_adjustment_bps)
}

/// All-in rate for a credit-line bucket, recomputed from live inputs on every
/// borrow, poke and rebucket.
pub fn credit_line_rate(
    base_rate: u64,
    risk_premium: u64,
    score: u8,
    utilization_coefficient: u64,
    utilization_bps: u64,
) -> u64 {
    combined_rate(
        base_rate,
        risk_premium,
        score,
        utilization_adjustment(utilization_coefficient, utilization_bps),
    )
}

/// The tightest of three independent ceilings: score-scaled borrower limit,
/// per-pool concentration, system-wide concentration.
pub fn borrow_limit(max_borrower_limit: u64, score: u8, pool_value: u64, tvl: u64) -> u64 {
    let borrower_ceiling = (max_borrower_limit as u128)
        .saturating_mul(borrow_limit_adjustment(score) as u128)
        / (BASIS_POINTS as u128);
    let pool_ceiling =
        (pool_value as u128).saturating_mul(CONCENTRATION_LIMIT_BPS as u128) / (BASIS_POINTS as u128);
    let tvl_ceiling =
        (tvl as u128).saturating_mul(CONCENTRATION_LIMIT_BPS as u128) / (BASIS_POINTS as u128);
    borrower_ceiling.min(pool_ceiling).min(tvl_ceiling) as u64
}

/// Interest committed by a fixed-term loan over its whole term.
pub fn fixed_term_interest(principal: u64, apy: u64, term: i64) -> u64 {
    ((principal as u128)
        .saturating_mul(apy as u128)
        .saturating_mul(term as u128)
        / (YEAR as u128 * BASIS_POINTS as u128)) as u64
}

/// Risk heuristic gating fixed-term funding: the required yes/no ratio grows
/// as the APY shrinks, the term stretches, or risk aversion rises.
pub fn loan_is_credible(apy: u64, term: i64, yes_votes: u64, no_votes: u64, risk_aversion: u64) -> bool {
    (apy as u128)
        .saturating_mul(yes_votes as u128)
        .saturating_mul(YEAR as u128)
        >= (risk_aversion as u128)
            .saturating_mul(no_votes as u128)
            .saturating_mul(term as u128)
}

/// Scales a token amount from its mint's decimals to the 18-decimal space all
/// cross-currency math runs in. Loans in 6-decimal currencies must weigh the
/// same as 18-decimal loans of equal economic value.
pub fn normalize(amount: u64, decimals: u8) -> u128 {
    let decimals = decimals.min(NORMALIZED_DECIMALS);
    (amount as u128) * 10u128.pow((NORMALIZED_DECIMALS - decimals) as u32)
}

pub fn from_normalized(amount: u128, decimals: u8) -> Result<u64> {
    let decimals = decimals.min(NORMALIZED_DECIMALS);
    let scaled = amount / 10u128.pow((NORMALIZED_DECIMALS - decimals) as u32);
    u64::try_from(scaled).map_err(|_| error!(CreditEngineError::MathOverflow))
}

/// Distributor budget for a funded loan: its committed interest, normalized,
/// scaled by the reward multiplier, expressed in reward-mint units.
pub fn reward_budget(
    interest: u64,
    loan_decimals: u8,
    reward_decimals: u8,
    reward_multiplier_bps: u64,
) -> Result<u64> {
    let interest_normalized = normalize(interest, loan_decimals);
    let reward_normalized = interest_normalized
        .checked_mul(reward_multiplier_bps as u128)
        .ok_or(CreditEngineError::MathOverflow)?
        / (BASIS_POINTS as u128);
    from_normalized(reward_normalized, reward_decimals)
}

/// Minimum absolute yes-stake required behind a loan of this size, in
/// stake-mint units.
pub fn min_yes_votes(
    principal: u64,
    pool_decimals: u8,
    stake_decimals: u8,
    participation_factor_bps: u64,
) -> Result<u64> {
    let required_normalized = normalize(principal, pool_decimals)
        .checked_mul(participation_factor_bps as u128)
        .ok_or(CreditEngineError::MathOverflow)?
        / (BASIS_POINTS as u128);
    from_normalized(required_normalized, stake_decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tables_match_the_documented_breakpoints() {
        assert_eq!(score_rate_table(255), 10_000);
        assert_eq!(score_rate_table(223), 9_043);
        assert_eq!(score_rate_table(191), 8_051);
        assert_eq!(score_rate_table(159), 7_007);
        assert_eq!(score_rate_table(127), 5_893);
        assert_eq!(score_rate_table(95), 4_679);
        assert_eq!(score_rate_table(63), 3_313);
        assert_eq!(score_rate_table(31), 1_684);
        assert_eq!(score_rate_table(0), 0);

        assert_eq!(credit_score_adjustment(255), 0);
        assert_eq!(credit_score_adjustment(191), 1_949);
        assert_eq!(borrow_limit_adjustment(0), 0);
        assert_eq!(borrow_limit_adjustment(255), 10_000);
    }

    #[test]
    fn tables_are_monotone_over_the_full_range() {
        for score in 1..=255u8 {
            assert!(score_rate_table(score) >= score_rate_table(score - 1));
            assert!(credit_score_adjustment(score) <= credit_score_adjustment(score - 1));
        }
    }

    #[test]
    fn rate_composition_scenario() {
        // base 300, premium 700, perfect score, idle pool
        assert_eq!(combined_rate(300, 700, 255, 0), 1_000);
        // dropping to score 191 raises the all-in rate by the table step
        assert_eq!(combined_rate(300, 700, 191, 0), 1_000 + 1_949);
    }

    #[test]
    fn utilization_penalty_is_quadratic() {
        assert_eq!(utilization_adjustment(5_000, 0), 0);
        assert_eq!(utilization_adjustment(5_000, 5_000), 1_250);
        assert_eq!(utilization_adjustment(5_000, 10_000), 5_000);
        assert!(utilization_adjustment(5_000, 2_500) < utilization_adjustment(5_000, 5_000) / 2);
    }

    #[test]
    fn tightest_of_three_ceilings_wins() {
        // borrower ceiling binds
        assert_eq!(borrow_limit(1_000, 255, 1_000_000, 1_000_000), 1_000);
        // pool concentration binds
        assert_eq!(borrow_limit(1_000_000, 255, 10_000, 1_000_000), 1_500);
        // system-wide concentration binds
        assert_eq!(borrow_limit(1_000_000, 255, 1_000_000, 10_000), 1_500);
        // score scales the borrower ceiling down
        assert_eq!(borrow_limit(1_000, 191, 1_000_000, 1_000_000), 805);
        assert_eq!(borrow_limit(1_000, 0, 1_000_000, 1_000_000), 0);
    }

    #[test]
    fn credibility_needs_more_yes_as_terms_worsen() {
        let yes = 1_000;
        let no = 100;
        assert!(loan_is_credible(1_000, YEAR, yes, no, 15_000));
        // same votes, much longer term: no longer credible
        assert!(!loan_is_credible(1_000, 10 * YEAR, yes, no, 15_000));
        // same votes, lower apy: no longer credible
        assert!(!loan_is_credible(100, YEAR, yes, no, 15_000));
        // higher risk aversion tightens the gate
        assert!(!loan_is_credible(1_000, YEAR, yes, no, 150_000));
        // unanimous yes is always credible
        assert!(loan_is_credible(1, 10 * YEAR, 1, 0, u64::MAX));
    }

    #[test]
    fn six_and_eighteen_decimal_loans_reward_identically() {
        // 250 whole tokens of interest in a 6-decimal and an 18-decimal currency
        let usdc_interest = 250 * 10u64.pow(6);
        let dai_interest = 250 * 10u64.pow(18);
        let reward_from_usdc = reward_budget(usdc_interest, 6, 8, 100).unwrap();
        let reward_from_dai = reward_budget(dai_interest, 18, 8, 100).unwrap();
        assert_eq!(reward_from_usdc, reward_from_dai);
        // 1% of 250 tokens, in 8-decimal reward units
        assert_eq!(reward_from_usdc, 25 * 10u64.pow(7));
    }

    #[test]
    fn participation_threshold_is_decimals_normalized() {
        // 10% participation on 1_000 whole tokens, stake mint has 8 decimals
        let from_usdc = min_yes_votes(1_000 * 10u64.pow(6), 6, 8, 1_000).unwrap();
        let from_dai = min_yes_votes(1_000 * 10u64.pow(18), 18, 8, 1_000).unwrap();
        assert_eq!(from_usdc, from_dai);
        assert_eq!(from_usdc, 100 * 10u64.pow(8));
    }

    #[test]
    fn fixed_term_interest_matches_debt_formula() {
        assert_eq!(fixed_term_interest(1_000, 1_000, YEAR), 100);
        assert_eq!(fixed_term_interest(1_000, 1_000, YEAR / 2), 50);
        assert_eq!(fixed_term_interest(0, 1_000, YEAR), 0);
    }
}
