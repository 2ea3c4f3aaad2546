//! `GET /api/formats`: the conversion catalog.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
    Json,
};
use convertify_core::formats::{self, FormatCatalogEntry, FormatCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FormatsQuery {
    #[serde(default)]
    pub source: Option<String>,
}

/// Targets for one source extension.
#[derive(Debug, Serialize)]
pub struct FormatLookupResponse {
    pub source: String,
    pub category: FormatCategory,
    pub targets: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CategoryFormats {
    pub category: FormatCategory,
    /// Targets offered when this tab is active.
    pub targets: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<CategoryFormats>,
    pub conversions: Vec<FormatCatalogEntry>,
}

pub async fn list_formats(Query(query): Query<FormatsQuery>) -> Response {
    match query.source {
        Some(source) => {
            let source = source.trim().trim_start_matches('.').to_lowercase();
            Json(FormatLookupResponse {
                category: formats::category_of(&source),
                targets: formats::target_formats_for(&source),
                source,
            })
            .into_response()
        }
        None => Json(CatalogResponse {
            categories: FormatCategory::TABS
                .iter()
                .map(|&category| CategoryFormats {
                    category,
                    targets: formats::picker_formats(category),
                })
                .collect(),
            conversions: formats::entries(),
        })
        .into_response(),
    }
}
