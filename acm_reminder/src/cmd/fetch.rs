use acm_reminder_libs::{
    crawler::ContestCrawler,
    parsers::DEFAULT_UPCOMING_LIMIT,
    types::{Contest, Platform},
};
use anyhow::Result;
use clap::Args;
use futures::future;
use std::env;
use url::Url;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Platform to query; repeatable, defaults to all known platforms
    #[arg(long)]
    platform: Vec<Platform>,
    /// Number of upcoming contests to retrieve per platform
    #[arg(long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
    limit: usize,
}

/// Fetches the requested listings concurrently and prints the combined
/// contest list as JSON on stdout for the scheduler to pick up.
pub async fn run(args: FetchArgs) -> Result<()> {
    let mut crawler = ContestCrawler::new();
    for platform in Platform::ALL {
        if let Ok(value) = env::var(platform.url_env_key()) {
            crawler = crawler.with_listing_url(platform, Url::parse(&value)?);
        }
    }

    let platforms: Vec<Platform> = if args.platform.is_empty() {
        Platform::ALL.to_vec()
    } else {
        args.platform.clone()
    };

    let results = future::join_all(
        platforms
            .iter()
            .map(|platform| crawler.upcoming(*platform, args.limit)),
    )
    .await;

    let mut contests: Vec<Contest> = Vec::new();
    for (platform, result) in platforms.iter().zip(results) {
        match result {
            Ok(list) => contests.extend(list),
            // One failing platform must not take the whole cycle down.
            Err(e) => {
                tracing::error!("failed to retrieve {} contest listing: {}", platform, e);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&contests)?);

    Ok(())
}
