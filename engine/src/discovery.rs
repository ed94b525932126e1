//! Free-text app discovery over the recommendation collaborator.
//!
//! The collaborator is opaque and possibly failing; this layer filters its
//! answer down to ids the supplied catalog actually knows and degrades every
//! failure to an empty result. Nothing here touches engine state, so a
//! failed or slow call can never leave a partial mutation behind.

use tracing::warn;

use crate::domain::AppRecord;
use crate::domain::ports::RecommendationService;

/// Ask the recommendation collaborator for apps matching a prompt.
///
/// Returns matched catalog records in the collaborator's preference order,
/// skipping ids absent from the catalog. A blank prompt short-circuits to an
/// empty result without calling the collaborator; a collaborator failure is
/// logged and presented as an empty result, never an error.
pub async fn recommend_apps(
    service: &dyn RecommendationService,
    prompt: &str,
    catalog: &[AppRecord],
) -> Vec<AppRecord> {
    if prompt.trim().is_empty() || catalog.is_empty() {
        return Vec::new();
    }
    let ids = match service.recommend(prompt, catalog).await {
        Ok(ids) => ids,
        Err(error) => {
            warn!(%error, "recommendation call failed; presenting no recommendations");
            return Vec::new();
        }
    };
    ids.iter()
        .filter_map(|id| catalog.iter().find(|app| app.id == *id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppId;
    use crate::domain::ports::{MockRecommendationService, RecommendationServiceError};
    use crate::domain::{AppRecord, Category};

    fn app(id: &str, name: &str) -> AppRecord {
        AppRecord {
            id: AppId::new(id).expect("id"),
            name: name.to_owned(),
            description: String::new(),
            icon: String::new(),
            category: Category::Utilities,
            primary_url: format!("https://run.appvault.test/{id}"),
            failover_url: format!("https://backup.appvault.test/{id}"),
            is_premium: false,
            rating: 4.0,
            plays: 0,
        }
    }

    #[tokio::test]
    async fn unknown_ids_are_filtered_out() {
        let catalog = vec![app("calc", "CloudCalc"), app("paint", "PaintPro")];
        let mut service = MockRecommendationService::new();
        service.expect_recommend().times(1).returning(|_, _| {
            Ok(vec![
                AppId::new("paint").expect("id"),
                AppId::new("deleted-app").expect("id"),
                AppId::new("calc").expect("id"),
            ])
        });

        let results = recommend_apps(&service, "something creative", &catalog).await;
        let names: Vec<&str> = results.iter().map(|app| app.name.as_str()).collect();
        assert_eq!(names, vec!["PaintPro", "CloudCalc"]);
    }

    #[tokio::test]
    async fn failures_degrade_to_empty() {
        let catalog = vec![app("calc", "CloudCalc")];
        let mut service = MockRecommendationService::new();
        service
            .expect_recommend()
            .times(1)
            .returning(|_, _| Err(RecommendationServiceError::unreachable("timeout")));

        let results = recommend_apps(&service, "anything", &catalog).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn blank_prompt_skips_the_collaborator() {
        let catalog = vec![app("calc", "CloudCalc")];
        let mut service = MockRecommendationService::new();
        service.expect_recommend().times(0);

        let results = recommend_apps(&service, "   ", &catalog).await;
        assert!(results.is_empty());
    }
}
