//! Macro-generated test suite for `ArticleService` contract validation.
//!
//! The `article_service_tests!` macro generates a test module that validates
//! any `ArticleService` implementation: CRUD, ordering and paging, partial
//! updates, and concurrent access.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: get with random UUID returns None
//! - `test_update_partial`: patch title only, body untouched
//! - `test_update_nonexistent`: update unknown ID returns None
//! - `test_delete_existing` / `test_delete_nonexistent`
//!
//! ## Listing
//! - `test_list_empty`
//! - `test_list_sort_title_asc` / `test_list_sort_title_desc`
//! - `test_list_limit_offset`: page slices and total
//!
//! ## Edge Cases
//! - `test_concurrent_creates`: parallel creates from spawned tasks

/// Generate a full `ArticleService` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an instance implementing
/// `ArticleService + 'static`. It is re-evaluated for each test to ensure
/// isolation.
#[macro_export]
macro_rules! article_service_tests {
    ($factory:expr) => {
        mod article_service_contract_tests {
            use super::*;
            use article_api::core::query::{ListParams, SortField, SortOrder};
            use article_api::core::service::ArticleService;
            use article_api::entities::ArticlePatch;
            use std::sync::Arc;
            use uuid::Uuid;

            fn by_title(order: SortOrder, limit: u64, offset: u64) -> ListParams {
                ListParams {
                    sort_field: SortField::Title,
                    sort_order: order,
                    limit,
                    offset,
                }
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let created = service.create(draft("Title", "Body")).await.unwrap();
                assert_eq!(created.title, "Title");
                assert_eq!(created.body, "Body");
                assert_eq!(created.created_at, created.updated_at);

                let retrieved = service.get(&created.id).await.unwrap();
                assert!(retrieved.is_some(), "Article should exist after create");
                let retrieved = retrieved.unwrap();
                assert_eq!(retrieved.id, created.id);
                assert_eq!(retrieved.title, "Title");
                assert_eq!(retrieved.body, "Body");
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_update_partial() {
                let service = $factory;
                let created = service.create(draft("Title", "Body")).await.unwrap();

                let updated = service
                    .update(
                        &created.id,
                        ArticlePatch {
                            title: Some("Renamed".to_string()),
                            body: None,
                        },
                    )
                    .await
                    .unwrap()
                    .expect("existing article should update");

                assert_eq!(updated.id, created.id);
                assert_eq!(updated.title, "Renamed");
                assert_eq!(updated.body, "Body");
                assert!(updated.updated_at >= created.updated_at);

                let reloaded = service.get(&created.id).await.unwrap().unwrap();
                assert_eq!(reloaded.title, "Renamed");
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let result = service
                    .update(
                        &Uuid::new_v4(),
                        ArticlePatch {
                            title: Some("x".to_string()),
                            body: None,
                        },
                    )
                    .await
                    .unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let created = service.create(draft("Title", "Body")).await.unwrap();

                assert!(service.delete(&created.id).await.unwrap());
                assert!(service.get(&created.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                assert!(!service.delete(&Uuid::new_v4()).await.unwrap());
            }

            // ==================================================================
            // Listing
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let (articles, total) = service.list(&ListParams::default()).await.unwrap();
                assert!(articles.is_empty());
                assert_eq!(total, 0);
                assert_eq!(service.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_list_sort_title_asc() {
                let service = $factory;
                for title in ["Charlie", "Alpha", "Bravo"] {
                    service.create(draft(title, "body")).await.unwrap();
                }

                let (articles, total) = service
                    .list(&by_title(SortOrder::Asc, 50, 0))
                    .await
                    .unwrap();
                let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
                assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);
                assert_eq!(total, 3);
            }

            #[tokio::test]
            async fn test_list_sort_title_desc() {
                let service = $factory;
                for title in ["Charlie", "Alpha", "Bravo"] {
                    service.create(draft(title, "body")).await.unwrap();
                }

                let (articles, _) = service
                    .list(&by_title(SortOrder::Desc, 50, 0))
                    .await
                    .unwrap();
                let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
                assert_eq!(titles, vec!["Charlie", "Bravo", "Alpha"]);
            }

            #[tokio::test]
            async fn test_list_limit_offset() {
                let service = $factory;
                for title in ["a", "b", "c", "d", "e"] {
                    service.create(draft(title, "body")).await.unwrap();
                }

                let (page, total) = service
                    .list(&by_title(SortOrder::Asc, 2, 2))
                    .await
                    .unwrap();
                let titles: Vec<_> = page.iter().map(|a| a.title.as_str()).collect();
                assert_eq!(titles, vec!["c", "d"]);
                assert_eq!(total, 5);

                let (tail, _) = service
                    .list(&by_title(SortOrder::Asc, 2, 4))
                    .await
                    .unwrap();
                assert_eq!(tail.len(), 1);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service: Arc<dyn ArticleService> = Arc::new($factory);

                let handles: Vec<_> = (0..10)
                    .map(|i| {
                        let service = service.clone();
                        tokio::spawn(async move {
                            service
                                .create(draft(&format!("Article {}", i), "body"))
                                .await
                                .unwrap()
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(service.count().await.unwrap(), 10);
            }
        }
    };
}
