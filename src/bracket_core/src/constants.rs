/// Seed order of a region's opening round.
///
/// Adjacent pairs are first-round games (1v16, 8v9, 5v12, ...), and adjacent
/// winners meet in the next round, so 1 and 2 can only meet in the Elite 8.
pub const REGION_FIELD: [u8; 16] = [1, 16, 8, 9, 5, 12, 4, 13, 6, 11, 3, 14, 7, 10, 2, 15];

/// Number of teams in one region
pub const REGION_SIZE: usize = 16;

/// Lowest (best) and highest (worst) seed numbers
pub const MIN_SEED: u8 = 1;
pub const MAX_SEED: u8 = 16;

/// Allowed madness range; 0 is pure chalk, 10 is a coin flip for every game
pub const MIN_MADNESS: u8 = 0;
pub const MAX_MADNESS: u8 = 10;

/// Madness level used when the caller does not supply one
pub const DEFAULT_MADNESS: u8 = 5;

/// Standard deviation (in seed lines) of the chalk curve.
///
/// Chosen so the general curve stays below the 2v15 historical rate at a
/// gap of 12 and above it at a gap of 14.
pub const SEED_GAP_STDDEV: f64 = 8.5;

/// Bounds on the better seed's chalk probability for non-historical matchups
pub const MIN_CHALK_PROB: f64 = 0.5001;
pub const MAX_CHALK_PROB: f64 = 0.9999;

/// Historical win rates of the better seed in near-lock first-round matchups
pub const HISTORICAL_ODDS: [(u8, u8, f64); 2] = [(1, 16, 0.993), (2, 15, 0.938)];

/// Region display names, in bracket order (top-left, bottom-left, top-right, bottom-right)
pub const REGION_NAMES: [&str; 4] = ["Top Left", "Bottom Left", "Top Right", "Bottom Right"];

/// Serialized keys of the regions, same order as [`REGION_NAMES`]
pub const REGION_KEYS: [&str; 4] = ["top_left", "bottom_left", "top_right", "bottom_right"];

/// Names of the four rounds played inside a region
pub const ROUND_NAMES: [&str; 4] = ["round_of_32", "sweet_16", "elite_8", "regional_champ"];

/// Games played per full bracket: 4 regions x 15 games + 2 semifinals + 1 final
pub const GAMES_PER_BRACKET: usize = 63;

/// Response of the service health check
pub const STATUS_MESSAGE: &str = "Bracket Simulator API is live!";
