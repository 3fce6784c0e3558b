//! Headless runner: boots storage and config, then logs what the home,
//! rewards and profile screens would show.

use ad_catalog::CategoryFilter;

use adrewards_lib::app::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    adrewards_lib::init_tracing();

    tracing::info!("Starting AdRewards (headless mode)");

    let (db, config, dir) = adrewards_lib::init_foundation()?;
    let state = AppState::new(db, config, dir);

    let categories: Vec<String> = state
        .catalog()
        .all_categories()
        .into_iter()
        .map(|c| c.name)
        .collect();
    tracing::info!(
        ?categories,
        tags = state.catalog().all_tags().len(),
        "Catalog loaded"
    );

    let feed = state.feed(CategoryFilter::All, &[]).await;
    if feed.is_empty() {
        tracing::info!("No ads left to show; reset viewed ads to see them again");
    }
    for item in &feed {
        tracing::info!(
            id = %item.ad.id,
            company = %item.ad.company,
            duration = %item.duration_str,
            reward = %item.ad.reward,
            "Feed entry"
        );
    }

    let tabs = state.reward_tabs();
    let stats = state.stats();
    tracing::info!(
        available = tabs.available,
        used = tabs.used,
        expired = tabs.expired,
        watched = stats.watched_ads,
        earned = stats.rewards_earned,
        "Rewards summary"
    );
    tracing::info!(data_dir = %state.data_dir().display(), "Done");
    Ok(())
}
