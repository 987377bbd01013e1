//! HowLongToBeat client for completion-time estimates.

use backlog_catalog::{Matcher, seconds_to_hours};
use serde::Serialize;

use crate::client::{build_http, send_json};
use crate::config::ServiceConfig;
use crate::error::CatalogError;
use crate::types::{HltbGame, HltbSearchResponse};
use crate::validate::validate_query;

const SERVICE: &str = "HowLongToBeat";
const REFERER: &str = "https://howlongtobeat.com/";
const PAGE_SIZE: u32 = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    search_type: &'static str,
    search_terms: Vec<&'a str>,
    search_page: u32,
    size: u32,
}

/// HTTP client for the HowLongToBeat search endpoint.
pub struct HltbClient {
    http: reqwest::Client,
    search_url: String,
    matcher: Matcher,
}

impl HltbClient {
    pub fn new(config: &ServiceConfig, matcher: Matcher) -> Result<Self, CatalogError> {
        Ok(Self {
            http: build_http(config)?,
            search_url: config.hltb_url.clone(),
            matcher,
        })
    }

    /// Main-story hours for the best-matching title, `None` if nothing matches
    /// or the match has no submitted time.
    pub async fn completion_hours(&self, title: &str) -> Result<Option<f64>, CatalogError> {
        let title = validate_query(title)?;
        let body = SearchRequest {
            search_type: "games",
            search_terms: title.split_whitespace().collect(),
            search_page: 1,
            size: PAGE_SIZE,
        };
        let request = self
            .http
            .post(&self.search_url)
            .header("Referer", REFERER)
            .json(&body);

        let resp: HltbSearchResponse = send_json(SERVICE, request).await?;
        Ok(pick_completion(&self.matcher, title, &resp.data))
    }
}

fn pick_completion(matcher: &Matcher, title: &str, results: &[HltbGame]) -> Option<f64> {
    let names: Vec<&str> = results.iter().map(|g| g.game_name.as_str()).collect();
    let best = matcher.best_match(title, &names)?;
    let game = &results[best.index];
    log::debug!(
        "HowLongToBeat matched '{}' to '{}' ({:.3})",
        title,
        game.game_name,
        best.score
    );
    (game.comp_main > 0).then(|| seconds_to_hours(game.comp_main))
}
