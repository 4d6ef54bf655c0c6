//! PEP status census.
//!
//! Reads every row of the numerical index, follows the link to the PEP card
//! and counts the statuses found there. A card that fails to load aborts
//! the whole census.
//!
//! Every status read from a card is recorded in the comparison log, whether
//! or not it agrees with the index code; only agreeing statuses are counted.

use indicatif::ProgressIterator;
use itertools::Itertools;
use scraper::{ElementRef, Html};
use tracing::{info, instrument};
use url::Url;

use super::ScrapeContext;
use crate::error::ParserError;
use crate::html::{Attr, find_all, find_tag, href, next_sibling_tag, text_of};
use crate::http::{CachedSession, get_response};
use crate::logging;
use crate::models::{MismatchRecord, Row, StatusExpectations, StatusTally, row};

pub const HEADER: [&str; 2] = ["Status", "Count"];
pub const TOTAL: &str = "Total";

/// One row of the numerical index.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    code: String,
    url: Url,
}

#[instrument(level = "info", skip_all)]
pub async fn pep(session: &CachedSession, ctx: &ScrapeContext) -> Result<Option<Vec<Row>>, ParserError> {
    let pep_url = &ctx.settings.pep_url;
    let Some(page) = get_response(session, pep_url).await else {
        return Ok(None);
    };
    let entries = parse_index(&page.text(), pep_url)?;
    info!(count = entries.len(), "Indexed PEPs");

    let mut records = Vec::new();
    let mut tally = StatusTally::default();
    let progress = logging::progress(entries.len());
    for entry in entries.into_iter().progress_with(progress.bar()) {
        let Some(page) = get_response(session, &entry.url).await else {
            return Ok(None);
        };
        let statuses = parse_card_statuses(&page.text());
        census_card(&entry, statuses, &ctx.expected_status, &mut tally, &mut records);
    }
    drop(progress);

    log_mismatches(&records);
    Ok(Some(summary(&tally)))
}

fn census_card(
    entry: &IndexEntry,
    statuses: Vec<String>,
    expectations: &StatusExpectations,
    tally: &mut StatusTally,
    records: &mut Vec<MismatchRecord>,
) {
    let expected = expectations.expected(&entry.code);
    for status in statuses {
        if expected.contains(&status) {
            tally.increment(&status);
        }
        records.push(MismatchRecord {
            url_detail: entry.url.to_string(),
            status_detail: status,
            status_table: expected.to_vec(),
        });
    }
}

fn parse_index(html: &str, base: &Url) -> Result<Vec<IndexEntry>, ParserError> {
    let document = Html::parse_document(html);
    let section = find_tag(
        document.root_element(),
        "section",
        &[Attr::Exact("id", "numerical-index")],
    )?;
    let tbody = find_tag(section, "tbody", &[])?;

    find_all(tbody, "tr", &[])
        .map(|tr| -> Result<IndexEntry, ParserError> {
            let link = find_tag(tr, "a", &[Attr::Classes("pep reference internal"), Attr::Has("href")])?;
            let abbr = text_of(find_tag(tr, "abbr", &[])?);
            Ok(IndexEntry {
                code: status_code(&abbr).to_string(),
                url: base.join(href(link))?,
            })
        })
        .collect()
}

/// Index cells read like `"SF"`: a type letter followed by the status letter.
fn status_code(abbr: &str) -> &str {
    let abbr = abbr.trim();
    abbr.char_indices().nth(1).map_or("", |(i, _)| &abbr[i..])
}

/// Statuses shown in the field list of a PEP card.
fn parse_card_statuses(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    find_all(document.root_element(), "dt", &[])
        .filter(is_field_term)
        .filter(|dt| text_of(*dt).trim().trim_end_matches(':').trim() == "Status")
        .filter_map(|dt| next_sibling_tag(dt, "dd", &[]))
        .map(|dd| text_of(dd).trim().to_string())
        .collect()
}

fn is_field_term(dt: &ElementRef<'_>) -> bool {
    dt.value().classes().any(|c| c.starts_with("field-"))
}

fn log_mismatches(records: &[MismatchRecord]) {
    if records.is_empty() {
        return;
    }
    info!("{}", records.iter().join("\n"));
}

fn summary(tally: &StatusTally) -> Vec<Row> {
    let mut rows = vec![row(HEADER)];
    rows.extend(tally.iter().map(|(status, count)| row([status.to_string(), count.to_string()])));
    rows.push(row([TOTAL.to_string(), tally.total().to_string()]));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Mode;
    use crate::scrapers::testing::{context, serve_html, session};
    use wiremock::MockServer;

    fn index_page(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(abbr, href)| {
                format!(
                    r#"<tr class="row-even"><td><abbr title="Standards Track, Final">{abbr}</abbr></td>
                       <td><a class="pep reference internal" href="{href}" title="t">1</a></td>
                       <td>Title</td><td>Author</td></tr>"#
                )
            })
            .collect();
        format!(
            r#"<html><body><section id="numerical-index"><h2>Numerical Index</h2>
               <table class="pep-zero-table"><thead><tr><th>T</th></tr></thead>
               <tbody>{body}</tbody></table></section></body></html>"#
        )
    }

    fn card(status: &str) -> String {
        format!(
            r#"<html><body><dl class="rfc2822 field-list simple">
               <dt class="field-odd">Author<span class="colon">:</span></dt>
               <dd class="field-odd">Someone</dd>
               <dt class="field-even">Status<span class="colon">:</span></dt>
               <dd class="field-even"><abbr title="Accepted and implementation complete">{status}</abbr></dd>
               <dt class="field-odd">Type<span class="colon">:</span></dt>
               <dd class="field-odd">Standards Track</dd>
               </dl></body></html>"#
        )
    }

    #[test]
    fn test_status_code_drops_type_letter() {
        assert_eq!(status_code("SF"), "F");
        assert_eq!(status_code("I"), "");
        assert_eq!(status_code(""), "");
        assert_eq!(status_code(" PA "), "A");
    }

    #[test]
    fn test_parse_index_entries() {
        let base = Url::parse("https://peps.python.org/").unwrap();
        let html = index_page(&[("SF", "pep-0008/"), ("P", "pep-0012/")]);
        let entries = parse_index(&html, &base).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "F");
        assert_eq!(entries[0].url.as_str(), "https://peps.python.org/pep-0008/");
        assert_eq!(entries[1].code, "");
    }

    #[test]
    fn test_parse_card_status() {
        assert_eq!(parse_card_statuses(&card("Final")), ["Final"]);
        assert!(parse_card_statuses("<dl><dt>Status</dt><dd>Final</dd></dl>").is_empty());
    }

    #[test]
    fn test_census_counts_matches_and_records_everything() {
        let expectations = StatusExpectations::standard();
        let mut tally = StatusTally::default();
        let mut records = Vec::new();
        let final_pep = IndexEntry {
            code: "F".into(),
            url: Url::parse("https://peps.python.org/pep-0008/").unwrap(),
        };
        let draft_pep = IndexEntry {
            code: "".into(),
            url: Url::parse("https://peps.python.org/pep-0999/").unwrap(),
        };

        census_card(&final_pep, vec!["Final".into()], &expectations, &mut tally, &mut records);
        census_card(&final_pep, vec!["Rejected".into()], &expectations, &mut tally, &mut records);
        census_card(&draft_pep, vec!["Draft".into()], &expectations, &mut tally, &mut records);

        assert_eq!(tally.iter().collect::<Vec<_>>(), [("Final", 1), ("Draft", 1)]);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].status_detail, "Rejected");
        assert_eq!(records[1].status_table, ["Final"]);
        assert_eq!(records[2].status_table, ["Draft", "Active"]);
    }

    #[test]
    fn test_summary_total_is_sum_of_counts() {
        let mut tally = StatusTally::default();
        for status in ["Final", "Active", "Final", "Draft", "Final"] {
            tally.increment(status);
        }
        let rows = summary(&tally);

        assert_eq!(rows.first().unwrap(), &HEADER);
        assert_eq!(rows.last().unwrap(), &["Total", "5"]);
        let counted: usize = rows[1..rows.len() - 1].iter().map(|r| r[1].parse::<usize>().unwrap()).sum();
        assert_eq!(counted, 5);
    }

    #[tokio::test]
    async fn test_pep_census() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/peps/",
            index_page(&[("SF", "pep-0008/"), ("IA", "pep-0020/"), ("SF", "pep-0257/"), ("S", "pep-0999/")]),
        )
        .await;
        serve_html(&server, "/peps/pep-0008/", card("Final")).await;
        serve_html(&server, "/peps/pep-0020/", card("Active")).await;
        serve_html(&server, "/peps/pep-0257/", card("Final")).await;
        serve_html(&server, "/peps/pep-0999/", card("Draft")).await;
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context(&server, tmp.path());

        let rows = pep(&session(&ctx, Mode::Pep), &ctx).await.unwrap().unwrap();

        assert_eq!(
            rows,
            vec![
                row(HEADER),
                row(["Final", "2"]),
                row(["Active", "1"]),
                row(["Draft", "1"]),
                row(["Total", "4"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_card_aborts_census() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/peps/",
            index_page(&[("SF", "pep-0008/"), ("SF", "http://127.0.0.1:1/pep-0009/")]),
        )
        .await;
        serve_html(&server, "/peps/pep-0008/", card("Final")).await;
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context(&server, tmp.path());

        let result = pep(&session(&ctx, Mode::Pep), &ctx).await.unwrap();
        assert!(result.is_none());
    }
}
