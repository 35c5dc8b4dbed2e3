use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_document},
    options::{IndexOptions, UpdateOptions},
    Collection, IndexModel,
};

use crate::{
    db::{is_duplicate_key, Database},
    errors::AppResult,
    models::domain::{Registration, RegistrationOutcome, RegistrationTarget},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find(
        &self,
        user_id: &str,
        target: RegistrationTarget,
        target_id: &str,
    ) -> AppResult<Option<Registration>>;

    /// Inserts the registration unless one already exists for the same
    /// user and target. Safe under concurrent calls.
    async fn register(&self, registration: Registration) -> AppResult<RegistrationOutcome>;

    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoRegistrationRepository {
    collection: Collection<Registration>,
}

impl MongoRegistrationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("registrations");
        Self { collection }
    }
}

#[async_trait]
impl RegistrationRepository for MongoRegistrationRepository {
    async fn find(
        &self,
        user_id: &str,
        target: RegistrationTarget,
        target_id: &str,
    ) -> AppResult<Option<Registration>> {
        let registration = self
            .collection
            .find_one(doc! {
                "user_id": user_id,
                "target": target.as_str(),
                "target_id": target_id,
            })
            .await?;
        Ok(registration)
    }

    async fn register(&self, registration: Registration) -> AppResult<RegistrationOutcome> {
        let filter = doc! {
            "user_id": &registration.user_id,
            "target": registration.target.as_str(),
            "target_id": &registration.target_id,
        };
        let update = doc! { "$setOnInsert": to_document(&registration)? };
        let options = UpdateOptions::builder().upsert(true).build();

        match self
            .collection
            .update_one(filter, update)
            .with_options(options)
            .await
        {
            Ok(result) if result.upserted_id.is_some() => Ok(RegistrationOutcome::Created),
            Ok(_) => Ok(RegistrationOutcome::AlreadyRegistered),
            // A concurrent upsert for the same key won the race.
            Err(err) if is_duplicate_key(&err) => Ok(RegistrationOutcome::AlreadyRegistered),
            Err(err) => Err(err.into()),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let unique_pair = IndexModel::builder()
            .keys(doc! { "user_id": 1, "target": 1, "target_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_target_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(unique_pair).await?;
        log::info!("Created unique index on registrations.(user_id, target, target_id)");

        let by_target = IndexModel::builder()
            .keys(doc! { "target": 1, "target_id": 1 })
            .build();
        self.collection.create_index(by_target).await?;
        log::info!("Created index on registrations.(target, target_id)");

        Ok(())
    }
}
