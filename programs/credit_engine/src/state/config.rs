use anchor_lang::prelude::*;

use crate::error::CreditEngineError;

/// Protocol-wide policy parameters and counters. One per deployment.
#[account]
#[derive(InitSpace)]
pub struct ProtocolConfig {
    pub authority: Pubkey,
    /// Signs credit-score and base-rate updates.
    pub oracle_authority: Pubkey,
    /// Governance mint whose balances weigh ratings and denominate rewards.
    pub staked_token_mint: Pubkey,
    pub staked_token_decimals: u8,
    pub is_active: bool,

    // rate model
    pub risk_premium: u64,                     // basis points
    pub utilization_adjustment_coefficient: u64, // basis points at 100% utilization

    // fixed-term funding gates
    pub min_loan_size: u64,
    pub max_loan_size: u64,
    pub min_loan_term: i64,
    pub max_loan_term: i64,
    pub min_apy: u64,          // basis points
    pub voting_period: i64,    // seconds a rating must stay open before funding
    pub participation_factor: u64, // basis points of principal required in yes stake
    pub risk_aversion: u64,    // basis points

    // rating rewards
    pub reward_multiplier: u64,    // basis points applied to normalized loan interest
    pub raters_reward_factor: u64, // basis points of the budget paid to raters

    // credit lines
    pub interest_repayment_period: i64,
    pub credit_update_period: i64,

    // counters
    pub loans_created: u64,
    pub total_funded_volume: u64,
    /// Value locked across all pools, maintained at every liquidity touch point.
    pub total_value_locked: u64,
    pub created_at: i64,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct ProtocolParams {
    pub risk_premium: u64,
    pub utilization_adjustment_coefficient: u64,
    pub min_loan_size: u64,
    pub max_loan_size: u64,
    pub min_loan_term: i64,
    pub max_loan_term: i64,
    pub min_apy: u64,
    pub voting_period: i64,
    pub participation_factor: u64,
    pub risk_aversion: u64,
    pub reward_multiplier: u64,
    pub raters_reward_factor: u64,
    pub interest_repayment_period: i64,
    pub credit_update_period: i64,
}

impl ProtocolConfig {
    pub fn apply(&mut self, params: &ProtocolParams) -> Result<()> {
        require!(
            params.max_loan_size > params.min_loan_size,
            CreditEngineError::InvalidConfiguration
        );
        require!(
            params.max_loan_term > params.min_loan_term && params.min_loan_term > 0,
            CreditEngineError::InvalidConfiguration
        );
        require!(
            params.raters_reward_factor <= 10_000,
            CreditEngineError::InvalidConfiguration
        );
        require!(
            params.voting_period > 0 && params.interest_repayment_period > 0,
            CreditEngineError::InvalidConfiguration
        );

        self.risk_premium = params.risk_premium;
        self.utilization_adjustment_coefficient = params.utilization_adjustment_coefficient;
        self.min_loan_size = params.min_loan_size;
        self.max_loan_size = params.max_loan_size;
        self.min_loan_term = params.min_loan_term;
        self.max_loan_term = params.max_loan_term;
        self.min_apy = params.min_apy;
        self.voting_period = params.voting_period;
        self.participation_factor = params.participation_factor;
        self.risk_aversion = params.risk_aversion;
        self.reward_multiplier = params.reward_multiplier;
        self.raters_reward_factor = params.raters_reward_factor;
        self.interest_repayment_period = params.interest_repayment_period;
        self.credit_update_period = params.credit_update_period;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_params() -> ProtocolParams {
        ProtocolParams {
            risk_premium: 700,
            utilization_adjustment_coefficient: 5_000,
            min_loan_size: 1_000,
            max_loan_size: 10_000_000,
            min_loan_term: 86_400,
            max_loan_term: 10 * 365 * 86_400,
            min_apy: 300,
            voting_period: 7 * 86_400,
            participation_factor: 1_000,
            risk_aversion: 15_000,
            reward_multiplier: 100,
            raters_reward_factor: 10_000,
            interest_repayment_period: 31 * 86_400,
            credit_update_period: 31 * 86_400,
        }
    }

    fn blank_config() -> ProtocolConfig {
        ProtocolConfig {
            authority: Pubkey::new_unique(),
            oracle_authority: Pubkey::new_unique(),
            staked_token_mint: Pubkey::new_unique(),
            staked_token_decimals: 8,
            is_active: true,
            risk_premium: 0,
            utilization_adjustment_coefficient: 0,
            min_loan_size: 0,
            max_loan_size: 0,
            min_loan_term: 0,
            max_loan_term: 0,
            min_apy: 0,
            voting_period: 0,
            participation_factor: 0,
            risk_aversion: 0,
            reward_multiplier: 0,
            raters_reward_factor: 0,
            interest_repayment_period: 0,
            credit_update_period: 0,
            loans_created: 0,
            total_funded_volume: 0,
            total_value_locked: 0,
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn apply_accepts_sane_params() {
        let mut config = blank_config();
        config.apply(&default_params()).unwrap();
        assert_eq!(config.risk_premium, 700);
        assert_eq!(config.voting_period, 7 * 86_400);
    }

    #[test]
    fn apply_rejects_inverted_bounds() {
        let mut config = blank_config();
        let mut params = default_params();
        params.min_loan_size = params.max_loan_size + 1;
        assert!(config.apply(&params).is_err());
    }

    #[test]
    fn apply_rejects_raters_factor_above_one() {
        let mut config = blank_config();
        let mut params = default_params();
        params.raters_reward_factor = 10_001;
        assert!(config.apply(&params).is_err());
    }
}
