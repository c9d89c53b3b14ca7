use super::ParseError;
use crate::types::{Contest, Platform};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

/// Shape of the JSON document embedded in each listing item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddedContest {
    contest_id: i64,
    contest_name: String,
    /// Milliseconds since the Unix epoch.
    contest_start_time: i64,
    /// Milliseconds.
    contest_duration: i64,
}

/// Reads the Nowcoder listing, where every item of the "current" block
/// carries one contest as an entity-escaped JSON attribute.
pub struct NowcoderParser {
    current_block: Selector,
    item: Selector,
}

impl NowcoderParser {
    pub fn new() -> Self {
        let current_block = Selector::parse("div.platform-mod.js-current").unwrap();
        let item = Selector::parse("div.platform-item.js-item").unwrap();

        Self {
            current_block,
            item,
        }
    }

    pub fn parse(&self, html: &str, limit: usize) -> Vec<Contest> {
        let html = Html::parse_document(html);

        let block = match html.select(&self.current_block).next() {
            Some(block) => block,
            None => {
                tracing::warn!("no current-contest block found in Nowcoder listing page");
                return Vec::new();
            }
        };

        let mut contests: Vec<Contest> = Vec::with_capacity(limit);

        for (i, item) in block.select(&self.item).take(limit).enumerate() {
            match parse_item(&item) {
                Ok(contest) => contests.push(contest),
                Err(e) => {
                    tracing::warn!("skipping Nowcoder contest item {}: {}", i, e);
                }
            }
        }

        contests
    }
}

impl Default for NowcoderParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_item(item: &ElementRef<'_>) -> Result<Contest, ParseError> {
    // html5ever decodes entity references in attribute values while building
    // the tree, so the attribute text is plain JSON here.
    let payload = item
        .value()
        .attr("data-json")
        .ok_or(ParseError::MissingField("data-json"))?;
    let embedded: EmbeddedContest = serde_json::from_str(payload)?;

    // Contest lengths are never negative; a negative value means the
    // embedded payload is broken, not that the contest runs backwards.
    if embedded.contest_duration < 0 {
        return Err(ParseError::OutOfRange("contestDuration"));
    }

    Ok(Contest {
        id: embedded.contest_id.to_string(),
        name: embedded.contest_name,
        organizers: Vec::new(),
        duration_minutes: embedded.contest_duration / 60_000,
        start_time: embedded.contest_start_time / 1_000,
        platform: Platform::Nowcoder,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
        <div class="platform-mod js-current">
          <div class="platform-item js-item"
               data-json="{&quot;contestId&quot;:889,&quot;contestName&quot;:&quot;牛客小白月赛80&quot;,&quot;contestStartTime&quot;:1700920800000,&quot;contestDuration&quot;:7200000}">
          </div>
          <div class="platform-item js-item"
               data-json="{&quot;contestId&quot;:890,&quot;contestName&quot;:&quot;牛客周赛 Round 21&quot;,&quot;contestStartTime&quot;:1701003600000,&quot;contestDuration&quot;:5400000}">
          </div>
          <div class="platform-item js-item"
               data-json="{&quot;contestId&quot;:891,&quot;contestName&quot;:&quot;牛客练习赛118&quot;,&quot;contestStartTime&quot;:1701090000000,&quot;contestDuration&quot;:7200000}">
          </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_first_two_items() {
        let contests = NowcoderParser::new().parse(LISTING, 2);

        assert_eq!(contests.len(), 2);

        let first = &contests[0];
        assert_eq!(first.id, "889");
        assert_eq!(first.name, "牛客小白月赛80");
        assert_eq!(first.start_time, 1700920800000 / 1000);
        assert_eq!(first.duration_minutes, 120);
        assert_eq!(first.platform, Platform::Nowcoder);

        let second = &contests[1];
        assert_eq!(second.id, "890");
        assert_eq!(second.duration_minutes, 90);
    }

    #[test]
    fn missing_block_yields_empty_list() {
        let contests = NowcoderParser::new().parse("<html><body></body></html>", 2);
        assert!(contests.is_empty());
    }

    #[test]
    fn malformed_json_item_is_skipped() {
        let listing = r#"
            <div class="platform-mod js-current">
              <div class="platform-item js-item" data-json="not a json document"></div>
              <div class="platform-item js-item"
                   data-json="{&quot;contestId&quot;:892,&quot;contestName&quot;:&quot;牛客周赛 Round 22&quot;,&quot;contestStartTime&quot;:1701608400000,&quot;contestDuration&quot;:5400000}">
              </div>
            </div>
        "#;

        let contests = NowcoderParser::new().parse(listing, 2);

        assert_eq!(contests.len(), 1);
        assert_eq!(contests[0].id, "892");
    }

    #[test]
    fn negative_duration_item_is_skipped() {
        let listing = r#"
            <div class="platform-mod js-current">
              <div class="platform-item js-item"
                   data-json="{&quot;contestId&quot;:893,&quot;contestName&quot;:&quot;牛客周赛 Round 23&quot;,&quot;contestStartTime&quot;:1702213200000,&quot;contestDuration&quot;:-5400000}">
              </div>
            </div>
        "#;

        assert!(NowcoderParser::new().parse(listing, 2).is_empty());
    }

    #[test]
    fn item_without_attribute_is_skipped() {
        let listing = r#"
            <div class="platform-mod js-current">
              <div class="platform-item js-item"></div>
            </div>
        "#;

        assert!(NowcoderParser::new().parse(listing, 2).is_empty());
    }
}
