use ingestion::ProductCatalog;
use query::{RecommendationResponse, Strategy};

fn heading(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Collaborative => "Recommendations",
        Strategy::ContentBased => "Content-Based Recommendations",
        Strategy::Popularity => "Popularity-Based Recommendations",
    }
}

/// One line per response, e.g. `Recommendations for user_1: [product_C]`.
pub fn render_text(response: &RecommendationResponse, catalog: &ProductCatalog) -> String {
    let products: Vec<String> = response
        .products
        .iter()
        .map(|product| catalog.label(product))
        .collect();
    let list = format!("[{}]", products.join(", "));

    match (response.fell_back_from, &response.user) {
        (Some(requested), Some(user)) => format!(
            "{} for {}: {} ({} unavailable, user not found)",
            heading(response.strategy),
            user,
            list,
            requested
        ),
        (None, Some(user)) if response.strategy.requires_user() => {
            format!("{} for {}: {}", heading(response.strategy), user, list)
        }
        _ => format!("{}: {}", heading(response.strategy), list),
    }
}
