use super::ParseError;
use crate::types::{Contest, Platform};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// The listing block does not expose a contest length, so every record gets
/// this assumed value. Known data gap of the source page.
pub const DEFAULT_DURATION_MINUTES: i64 = 75;

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the single "next contest" block of the AcWing front page.
pub struct AcWingParser {
    block: Selector,
    title: Selector,
    td: Selector,
}

impl AcWingParser {
    pub fn new() -> Self {
        let block = Selector::parse("div.activity-index-block").unwrap();
        let title = Selector::parse("span.activity_title").unwrap();
        let td = Selector::parse("span.activity_td").unwrap();

        Self { block, title, td }
    }

    /// The page announces at most one upcoming contest, so the result holds
    /// zero or one record regardless of `limit` (unless `limit` is zero).
    pub fn parse(&self, html: &str, limit: usize) -> Vec<Contest> {
        if limit == 0 {
            return Vec::new();
        }

        let html = Html::parse_document(html);

        let block = match html.select(&self.block).next() {
            Some(block) => block,
            None => {
                tracing::warn!("no activity block found in AcWing page");
                return Vec::new();
            }
        };

        match self.parse_block(&block) {
            Ok(contest) => vec![contest],
            Err(e) => {
                tracing::warn!("skipping AcWing activity block: {}", e);
                Vec::new()
            }
        }
    }

    fn parse_block(&self, block: &ElementRef<'_>) -> Result<Contest, ParseError> {
        let title: String = block
            .select(&self.title)
            .next()
            .map(|span| span.text().collect::<String>())
            .ok_or(ParseError::MissingField("activity title"))?
            .split_whitespace()
            .collect();
        let name = format!("{}{}", Platform::AcWing, title);

        // The first activity_td span holds the registration state; the
        // second holds the start time.
        let start_text = block
            .select(&self.td)
            .nth(1)
            .and_then(|span| span.text().next())
            .map(str::trim)
            .ok_or(ParseError::MissingField("start time"))?;
        let start_time = NaiveDateTime::parse_from_str(start_text, START_TIME_FORMAT)?
            .and_utc()
            .timestamp();

        Ok(Contest {
            id: synthetic_id(&name, start_time),
            name,
            organizers: Vec::new(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            start_time,
            platform: Platform::AcWing,
        })
    }
}

impl Default for AcWingParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The page carries no contest identifier, so derive a stable one from the
/// fields that distinguish contests. Distinct contests must not share an id.
fn synthetic_id(name: &str, start_time: i64) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    start_time.hash(&mut hasher);

    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod test {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
        <div class="activity-index-block">
          <span class="activity_title">第 131 场周赛</span>
          <span class="activity_td">报名中</span>
          <span class="activity_td">2023-11-25 19:00:00</span>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_single_block() {
        let contests = AcWingParser::new().parse(LISTING, 2);

        assert_eq!(contests.len(), 1);

        let contest = &contests[0];
        assert_eq!(contest.name, "AcWing第131场周赛");
        assert_eq!(contest.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(
            contest.start_time,
            NaiveDateTime::parse_from_str("2023-11-25 19:00:00", START_TIME_FORMAT)
                .unwrap()
                .and_utc()
                .timestamp()
        );
        assert_eq!(contest.platform, Platform::AcWing);
        assert!(!contest.id.is_empty());
    }

    #[test]
    fn missing_block_yields_empty_list() {
        let contests = AcWingParser::new().parse("<html><body></body></html>", 2);
        assert!(contests.is_empty());
    }

    #[test]
    fn block_without_start_time_is_skipped() {
        let listing = r#"
            <div class="activity-index-block">
              <span class="activity_title">第 131 场周赛</span>
              <span class="activity_td">报名中</span>
            </div>
        "#;

        assert!(AcWingParser::new().parse(listing, 2).is_empty());
    }

    #[test]
    fn distinct_contests_get_distinct_ids() {
        let other = r#"
            <div class="activity-index-block">
              <span class="activity_title">第 132 场周赛</span>
              <span class="activity_td">报名中</span>
              <span class="activity_td">2023-12-02 19:00:00</span>
            </div>
        "#;

        let parser = AcWingParser::new();
        let first = parser.parse(LISTING, 2);
        let second = parser.parse(other, 2);

        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn zero_limit_yields_empty_list() {
        assert!(AcWingParser::new().parse(LISTING, 0).is_empty());
    }
}
