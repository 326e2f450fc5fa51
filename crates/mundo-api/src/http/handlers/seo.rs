//! Crawler-facing documents built from the configured site URL.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use mundo_data::PropertyFilter;

use crate::http::constants::SITEMAP_STATIC_PAGES;
use crate::http::errors::ApiError;
use crate::http::handlers::escape_markup;
use crate::state::ApiState;

const DISALLOWED_FOR_ALL: [&str; 7] = [
    "/admin/",
    "/api/",
    "/private/",
    "/_next/",
    "/scripts/",
    "*.json",
    "*.xml",
];
const DISALLOWED_FOR_CRAWLERS: [&str; 3] = ["/admin/", "/api/", "/private/"];
const NAMED_CRAWLERS: [&str; 2] = ["Googlebot", "Bingbot"];

pub(crate) async fn robots(State(state): State<Arc<ApiState>>) -> Response {
    let site = &state.site.site_url;
    let mut body = String::from("User-Agent: *\nAllow: /\n");
    for path in DISALLOWED_FOR_ALL {
        let _ = writeln!(body, "Disallow: {path}");
    }
    for crawler in NAMED_CRAWLERS {
        let _ = write!(body, "\nUser-Agent: {crawler}\nAllow: /\n");
        for path in DISALLOWED_FOR_CRAWLERS {
            let _ = writeln!(body, "Disallow: {path}");
        }
    }
    let _ = write!(body, "\nHost: {site}\nSitemap: {site}/sitemap.xml\n");
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

pub(crate) async fn sitemap(State(state): State<Arc<ApiState>>) -> Result<Response, ApiError> {
    let properties = state.repo.list_properties(&PropertyFilter::default()).await?;
    let site = &state.site.site_url;
    let today = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    let mut body = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (path, frequency, priority) in SITEMAP_STATIC_PAGES {
        push_entry(&mut body, &format!("{site}{path}"), &today, frequency, priority);
    }
    for property in properties {
        let modified = property
            .updated_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        push_entry(
            &mut body,
            &format!("{site}/apartamentos/{}", property.id),
            &modified,
            "weekly",
            "0.8",
        );
    }
    body.push_str("</urlset>\n");
    Ok(([(CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response())
}

fn push_entry(body: &mut String, loc: &str, modified: &str, frequency: &str, priority: &str) {
    let _ = write!(
        body,
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{modified}</lastmod>\n    \
         <changefreq>{frequency}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n",
        escape_markup(loc)
    );
}
