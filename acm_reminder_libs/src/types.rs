use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contest platforms this crate knows how to read listings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Codeforces,
    Nowcoder,
    AcWing,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Codeforces, Platform::Nowcoder, Platform::AcWing];

    /// Environment variable consulted for a listing URL override.
    pub fn url_env_key(&self) -> &'static str {
        match self {
            Platform::Codeforces => "CODEFORCES_LISTING_URL",
            Platform::Nowcoder => "NOWCODER_LISTING_URL",
            Platform::AcWing => "ACWING_LISTING_URL",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Codeforces => "Codeforces",
            Platform::Nowcoder => "Nowcoder",
            Platform::AcWing => "AcWing",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "codeforces" | "cf" => Ok(Platform::Codeforces),
            "nowcoder" | "nc" => Ok(Platform::Nowcoder),
            "acwing" | "acw" => Ok(Platform::AcWing),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

/// One upcoming contest, normalized across platforms.
///
/// Records are built fresh on every fetch cycle and carry no identity
/// across cycles; deduplication belongs to the scheduler consuming them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    /// Platform-scoped identifier; unique only within one platform and fetch.
    pub id: String,
    pub name: String,
    /// Organizer handles; only populated where the listing exposes them.
    #[serde(default)]
    pub organizers: Vec<String>,
    pub duration_minutes: i64,
    /// Seconds since the Unix epoch, UTC.
    pub start_time: i64,
    pub platform: Platform,
}
