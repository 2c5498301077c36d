pub const SEEDS_CONFIG: &[u8] = b"config";
pub const SEEDS_POOL: &[u8] = b"pool";
pub const SEEDS_POOL_VAULT: &[u8] = b"pool_vault";
pub const SEEDS_LOAN: &[u8] = b"loan";
pub const SEEDS_LOAN_ESCROW: &[u8] = b"loan_escrow";
pub const SEEDS_SHARES: &[u8] = b"loan_shares";
pub const SEEDS_RATING: &[u8] = b"rating";
pub const SEEDS_VOTE: &[u8] = b"vote";
pub const SEEDS_MUTEX: &[u8] = b"borrowing_mutex";
pub const SEEDS_PORTFOLIO: &[u8] = b"portfolio";
pub const SEEDS_CREDIT_STATE: &[u8] = b"credit_state";
pub const SEEDS_BUCKET: &[u8] = b"bucket";
pub const SEEDS_POSITION: &[u8] = b"position";
pub const SEEDS_SCORE: &[u8] = b"credit_score";
pub const SEEDS_BASE_RATE: &[u8] = b"base_rate";
pub const SEEDS_DISTRIBUTOR: &[u8] = b"distributor";
pub const SEEDS_DISTRIBUTOR_TREASURY: &[u8] = b"distributor_treasury";

/// 365-day year, the denominator of every APY-to-elapsed-time conversion.
pub const YEAR: i64 = 365 * 24 * 60 * 60;

pub const BASIS_POINTS: u64 = 10_000;

/// Fixed-point precision of bucket cumulative-interest-per-share accumulators.
pub const PER_SHARE_PRECISION: u128 = 1_000_000_000_000_000_000_000_000_000;

pub const MAX_CREDIT_SCORE: u8 = 255;

/// Pool-concentration and TVL-concentration ceiling on any single borrower.
pub const CONCENTRATION_LIMIT_BPS: u64 = 1_500;

/// All reward math is normalized to this many decimals before scaling,
/// regardless of the loan currency's own decimals.
pub const NORMALIZED_DECIMALS: u8 = 18;
