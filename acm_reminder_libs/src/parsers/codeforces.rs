use super::ParseError;
use crate::types::{Contest, Platform};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};

/// Fixed correction from the contest table's displayed wall-clock time to
/// UTC epoch seconds. The site renders times in a site-configured display
/// timezone, so this constant encodes an assumption about that display
/// setting and must be revisited if the site configuration changes.
pub const DISPLAY_TIME_OFFSET_HOURS: i64 = 5;

const START_TIME_FORMAT: &str = "%b/%d/%Y %H:%M";

/// Reads the table-based Codeforces contest listing.
pub struct CodeforcesParser {
    datatable: Selector,
    tr: Selector,
    td: Selector,
    td_a: Selector,
    td_span: Selector,
}

impl CodeforcesParser {
    pub fn new() -> Self {
        let datatable = Selector::parse("div.datatable").unwrap();
        let tr = Selector::parse("tr").unwrap();
        let td = Selector::parse("td").unwrap();
        let td_a = Selector::parse("a").unwrap();
        let td_span = Selector::parse("span").unwrap();

        Self {
            datatable,
            tr,
            td,
            td_a,
            td_span,
        }
    }

    pub fn parse(&self, html: &str, limit: usize) -> Vec<Contest> {
        let html = Html::parse_document(html);

        let datatable = match html.select(&self.datatable).next() {
            Some(datatable) => datatable,
            None => {
                tracing::warn!("no contest table found in Codeforces listing page");
                return Vec::new();
            }
        };

        let mut contests: Vec<Contest> = Vec::with_capacity(limit);

        // First row is the header.
        for (i, row) in datatable.select(&self.tr).skip(1).take(limit).enumerate() {
            match self.parse_row(&row) {
                Ok(contest) => contests.push(contest),
                Err(e) => {
                    tracing::warn!("skipping Codeforces contest row {}: {}", i, e);
                }
            }
        }

        contests
    }

    fn parse_row(&self, row: &ElementRef<'_>) -> Result<Contest, ParseError> {
        let id = row
            .value()
            .attr("data-contestid")
            .ok_or(ParseError::MissingField("data-contestid"))?
            .to_string();

        let td: Vec<ElementRef<'_>> = row.select(&self.td).collect();

        let name = td
            .get(0)
            .map(|elem| elem.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(ParseError::MissingField("name"))?;

        let organizers: Vec<String> = td
            .get(1)
            .map(|elem| {
                elem.select(&self.td_a)
                    .map(|a| a.text().collect::<String>().trim().to_string())
                    .filter(|writer| !writer.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let start_text = td
            .get(2)
            .and_then(|elem| elem.select(&self.td_span).next())
            .and_then(|span| span.text().next())
            .map(str::trim)
            .ok_or(ParseError::MissingField("start time"))?;
        let start_time = NaiveDateTime::parse_from_str(start_text, START_TIME_FORMAT)?
            .and_utc()
            .timestamp()
            + DISPLAY_TIME_OFFSET_HOURS * 3600;

        let duration_text = td
            .get(3)
            .map(|elem| elem.text().collect::<String>())
            .ok_or(ParseError::MissingField("duration"))?;
        let duration_minutes = parse_hh_mm(duration_text.trim())?;

        Ok(Contest {
            id,
            name,
            organizers,
            duration_minutes,
            start_time,
            platform: Platform::Codeforces,
        })
    }
}

impl Default for CodeforcesParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a length cell like "2:00" or "26:40" into total minutes.
/// Components are unsigned, so a negative cell fails the entry instead of
/// producing a contest with a negative length.
fn parse_hh_mm(text: &str) -> Result<i64, ParseError> {
    let (hours, minutes) = text
        .split_once(':')
        .ok_or(ParseError::MissingField("duration separator"))?;
    let hours: u32 = hours.trim().parse()?;
    let minutes: u32 = minutes.trim().parse()?;

    Ok(i64::from(hours) * 60 + i64::from(minutes))
}
