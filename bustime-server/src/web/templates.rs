//! Askama templates for the web frontend.

use askama::Template;

/// Search results fragment: one table row per route id.
#[derive(Template)]
#[template(path = "search_results.html")]
pub struct SearchResultsTemplate<'a> {
    pub routes: &'a [String],
}
