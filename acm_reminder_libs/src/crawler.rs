use crate::fetch::{FetchError, PageFetcher};
use crate::parsers;
use crate::types::{Contest, Platform};
use url::Url;

const CODEFORCES_LISTING_URL: &str = "https://codeforces.com/contests";
const NOWCODER_LISTING_URL: &str = "https://ac.nowcoder.com/acm/contest/vip-index";
const ACWING_LISTING_URL: &str = "https://www.acwing.com/";

/// Fetches one platform's listing page and turns it into normalized contest
/// records. Each call is independent; crawls for different platforms may run
/// concurrently with no ordering guarantee.
pub struct ContestCrawler {
    fetcher: PageFetcher,
    codeforces_url: Url,
    nowcoder_url: Url,
    acwing_url: Url,
}

impl ContestCrawler {
    pub fn new() -> Self {
        ContestCrawler {
            fetcher: PageFetcher::new(),
            codeforces_url: Url::parse(CODEFORCES_LISTING_URL).unwrap(),
            nowcoder_url: Url::parse(NOWCODER_LISTING_URL).unwrap(),
            acwing_url: Url::parse(ACWING_LISTING_URL).unwrap(),
        }
    }

    /// Replaces the listing URL for one platform, e.g. from an environment
    /// override or a mirror.
    pub fn with_listing_url(mut self, platform: Platform, url: Url) -> Self {
        match platform {
            Platform::Codeforces => self.codeforces_url = url,
            Platform::Nowcoder => self.nowcoder_url = url,
            Platform::AcWing => self.acwing_url = url,
        }
        self
    }

    pub fn listing_url(&self, platform: Platform) -> &Url {
        match platform {
            Platform::Codeforces => &self.codeforces_url,
            Platform::Nowcoder => &self.nowcoder_url,
            Platform::AcWing => &self.acwing_url,
        }
    }

    /// Retrieves at most `limit` upcoming contests for one platform.
    ///
    /// Markup drift degrades to a shorter or empty list; only transport
    /// failures surface as an error.
    pub async fn upcoming(
        &self,
        platform: Platform,
        limit: usize,
    ) -> Result<Vec<Contest>, FetchError> {
        let url = self.listing_url(platform);
        tracing::info!("Start to retrieve contest listing for {} from {}", platform, url);

        let html = self.fetcher.fetch(url).await?;
        let contests = parsers::parse_upcoming(platform, &html, limit);

        tracing::info!(
            "{} upcoming contests extracted for {}.",
            contests.len(),
            platform
        );

        Ok(contests)
    }
}

impl Default for ContestCrawler {
    fn default() -> Self {
        Self::new()
    }
}
