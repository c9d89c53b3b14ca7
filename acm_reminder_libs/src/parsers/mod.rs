pub mod acwing;
pub mod codeforces;
pub mod nowcoder;

use crate::types::{Contest, Platform};
use once_cell::sync::Lazy;
use thiserror::Error;

pub use acwing::AcWingParser;
pub use codeforces::CodeforcesParser;
pub use nowcoder::NowcoderParser;

/// How many upcoming contests a parser emits per call unless told otherwise.
pub const DEFAULT_UPCOMING_LIMIT: usize = 2;

/// Entry-scoped extraction failure. The row or item it came from is skipped
/// and parsing continues; only the fetch boundary produces hard errors.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected field `{0}` is missing")]
    MissingField(&'static str),
    #[error("embedded contest payload is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("date time string does not match the expected format")]
    Timestamp(#[from] chrono::ParseError),
    #[error("numeric field could not be parsed")]
    Number(#[from] std::num::ParseIntError),
    #[error("field `{0}` is out of range")]
    OutOfRange(&'static str),
}

static CODEFORCES: Lazy<CodeforcesParser> = Lazy::new(CodeforcesParser::new);
static NOWCODER: Lazy<NowcoderParser> = Lazy::new(NowcoderParser::new);
static ACWING: Lazy<AcWingParser> = Lazy::new(AcWingParser::new);

/// Extracts at most `limit` upcoming contests from a platform's listing page.
///
/// A document without the expected listing container yields an empty list,
/// never an error; malformed individual entries are skipped with a warning.
pub fn parse_upcoming(platform: Platform, html: &str, limit: usize) -> Vec<Contest> {
    match platform {
        Platform::Codeforces => CODEFORCES.parse(html, limit),
        Platform::Nowcoder => NOWCODER.parse(html, limit),
        Platform::AcWing => ACWING.parse(html, limit),
    }
}
