use anchor_lang::prelude::*;

#[event]
pub struct LoanSubmitted {
    pub loan: Pubkey,
    pub creator: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct LoanRetracted {
    pub loan: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct LoanRated {
    pub loan: Pubkey,
    pub rater: Pubkey,
    pub yes: bool,
    pub weight: u64,
}

#[event]
pub struct RewardClaimed {
    pub loan: Pubkey,
    pub rater: Pubkey,
    pub amount: u64,
}

#[event]
pub struct LoanFunded {
    pub loan: Pubkey,
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub principal: u64,
    pub timestamp: i64,
}

#[event]
pub struct LoanReclaimed {
    pub loan: Pubkey,
    pub pool: Pubkey,
    pub returned: u64,
}

#[event]
pub struct PrincipalRepaid {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub amount: u64,
}

#[event]
pub struct InterestPaid {
    pub pool: Pubkey,
    pub borrower: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BorrowerAllowed {
    pub borrower: Pubkey,
    pub score: u8,
    pub eligible: bool,
}

#[event]
pub struct PoolAllowed {
    pub pool: Pubkey,
    pub allowed: bool,
}
