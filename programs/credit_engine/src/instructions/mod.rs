pub mod allow_pool;
pub mod borrow_credit;
pub mod cast_rating;
pub mod claim_rater_reward;
pub mod close_loan;
pub mod create_loan;
pub mod create_pool;
pub mod deposit_to_pool;
pub mod distribute_shares;
pub mod empty_distributor;
pub mod fund_loan;
pub mod initialize_distributor;
pub mod initialize_protocol;
pub mod pay_credit_interest;
pub mod poke_bucket;
pub mod rebucket_borrower;
pub mod reclaim_loan;
pub mod redeem_shares;
pub mod repay_credit;
pub mod repay_credit_in_full;
pub mod repay_loan;
pub mod reset_cast_ratings;
pub mod retract_loan;
pub mod set_base_rate;
pub mod set_credit_score;
pub mod submit_loan;
pub mod update_protocol_config;
pub mod utils;
pub mod withdraw_loan;

pub use allow_pool::*;
pub use borrow_credit::*;
pub use cast_rating::*;
pub use claim_rater_reward::*;
pub use close_loan::*;
pub use create_loan::*;
pub use create_pool::*;
pub use deposit_to_pool::*;
pub use distribute_shares::*;
pub use empty_distributor::*;
pub use fund_loan::*;
pub use initialize_distributor::*;
pub use initialize_protocol::*;
pub use pay_credit_interest::*;
pub use poke_bucket::*;
pub use rebucket_borrower::*;
pub use reclaim_loan::*;
pub use redeem_shares::*;
pub use repay_credit::*;
pub use repay_credit_in_full::*;
pub use repay_loan::*;
pub use reset_cast_ratings::*;
pub use retract_loan::*;
pub use set_base_rate::*;
pub use set_credit_score::*;
pub use submit_loan::*;
pub use update_protocol_config::*;
pub use utils::*;
pub use withdraw_loan::*;
