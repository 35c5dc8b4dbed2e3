use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Contest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Contest>>;
    async fn find_private_by_id(&self, id: &str) -> AppResult<Option<Contest>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoContestRepository {
    collection: Collection<Contest>,
}

impl MongoContestRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("contests");
        Self { collection }
    }
}

#[async_trait]
impl ContestRepository for MongoContestRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Contest>> {
        let contest = self.collection.find_one(doc! { "id": id }).await?;
        Ok(contest)
    }

    async fn find_private_by_id(&self, id: &str) -> AppResult<Option<Contest>> {
        let contest = self
            .collection
            .find_one(doc! { "id": id, "is_private": true })
            .await?;
        Ok(contest)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        log::info!("Created unique index on contests.id");

        Ok(())
    }
}
