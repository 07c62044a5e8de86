//! Badge catalog routes

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{ApiResult, DbResultExt};
use crate::state::AppState;
use common::models::{Badge, BadgeRarity};

/// Grouped badges for the catalog
#[derive(Serialize)]
pub struct BadgeCatalog {
    pub total: usize,
    pub rarities: Vec<RarityGroup>,
}

#[derive(Serialize)]
pub struct RarityGroup {
    pub name: String,
    pub badges: Vec<Badge>,
}

/// List the badge catalog grouped by rarity
pub async fn catalog(State(state): State<Arc<AppState>>) -> ApiResult<Json<BadgeCatalog>> {
    let badges = db::badges::list_catalog(&state.pool).await.db_err()?;

    let total = badges.len();

    let mut common = Vec::new();
    let mut uncommon = Vec::new();
    let mut rare = Vec::new();
    let mut epic = Vec::new();
    let mut legendary = Vec::new();

    for badge in badges {
        match badge.rarity {
            BadgeRarity::Common => common.push(badge),
            BadgeRarity::Uncommon => uncommon.push(badge),
            BadgeRarity::Rare => rare.push(badge),
            BadgeRarity::Epic => epic.push(badge),
            BadgeRarity::Legendary => legendary.push(badge),
        }
    }

    let rarities = vec![
        RarityGroup {
            name: "Common".to_string(),
            badges: common,
        },
        RarityGroup {
            name: "Uncommon".to_string(),
            badges: uncommon,
        },
        RarityGroup {
            name: "Rare".to_string(),
            badges: rare,
        },
        RarityGroup {
            name: "Epic".to_string(),
            badges: epic,
        },
        RarityGroup {
            name: "Legendary".to_string(),
            badges: legendary,
        },
    ]
    .into_iter()
    .filter(|g| !g.badges.is_empty())
    .collect();

    Ok(Json(BadgeCatalog { total, rarities }))
}
