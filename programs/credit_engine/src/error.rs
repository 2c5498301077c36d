use anchor_lang::prelude::*;

#[error_code]
pub enum CreditEngineError {
    // authorization
    #[msg("Caller is not the borrower")]
    CallerNotBorrower,
    #[msg("Caller is not the rating creator")]
    CallerNotCreator,
    #[msg("Caller is not the current locker")]
    CallerNotLocker,
    #[msg("Borrower is not eligible")]
    BorrowerNotEligible,
    #[msg("Pool is not allowed for credit lines")]
    PoolNotAllowed,
    #[msg("Pool is not active")]
    PoolNotActive,
    #[msg("Protocol is paused")]
    ProtocolPaused,

    // state preconditions
    #[msg("Current status should be Awaiting")]
    LoanNotAwaiting,
    #[msg("Current status should be Funded")]
    LoanNotFunded,
    #[msg("Loan is not closed yet")]
    LoanNotClosed,
    #[msg("Loan is already closed")]
    LoanAlreadyClosed,
    #[msg("Loan term has not elapsed yet")]
    TermNotElapsed,
    #[msg("Loan is still pending rating")]
    LoanStillPending,
    #[msg("Loan is no longer pending")]
    LoanNotPending,
    #[msg("Rating has been retracted")]
    RatingRetracted,
    #[msg("Nothing borrowed in this pool")]
    NothingBorrowed,

    // double actions
    #[msg("Borrower is already locked")]
    BorrowerAlreadyLocked,
    #[msg("Loan already submitted for rating")]
    AlreadySubmitted,

    // limits
    #[msg("Loan size is out of bounds")]
    LoanSizeOutOfBounds,
    #[msg("Loan term is out of bounds")]
    LoanTermOutOfBounds,
    #[msg("Loan APY is below the minimum")]
    ApyTooLow,
    #[msg("Voting period has not elapsed")]
    VotingPeriodNotElapsed,
    #[msg("Not enough yes votes behind the loan")]
    InsufficientParticipation,
    #[msg("Loan rating is not credible enough")]
    LoanNotCredible,
    #[msg("Amount exceeds the borrow limit")]
    BorrowLimitExceeded,
    #[msg("Insufficient pool liquidity")]
    InsufficientLiquidity,
    #[msg("Insufficient share balance")]
    InsufficientShares,
    #[msg("Repayment exceeds the amount owed")]
    RepaymentTooLarge,
    #[msg("Invalid fraction")]
    InvalidFraction,
    #[msg("Portfolio is full")]
    PortfolioFull,
    #[msg("Loan is not in the portfolio")]
    LoanNotInPortfolio,

    // staleness
    #[msg("Credit score is stale")]
    CreditScoreStale,
    #[msg("Score changed, rebucket the borrower first")]
    RebucketRequired,
    #[msg("Score has not changed")]
    ScoreUnchanged,
    #[msg("Interest repayment is overdue")]
    InterestOverdue,

    // arithmetic / input
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Voter has no stake")]
    ZeroStake,
    #[msg("Invalid configuration")]
    InvalidConfiguration,
}
