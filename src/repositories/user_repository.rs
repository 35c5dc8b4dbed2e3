use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{is_duplicate_key, Database},
    errors::{AppError, AppResult},
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Stores the user unless one with the same email exists; returns the stored document.
    async fn create_if_absent(&self, user: User) -> AppResult<User>;
    /// Appends to the badge list. `None` when no user has this email.
    async fn push_badge(&self, email: &str, badge_url: &str) -> AppResult<Option<User>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn create_if_absent(&self, user: User) -> AppResult<User> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let result = self
            .collection
            .find_one_and_update(
                doc! { "email": &user.email },
                doc! { "$setOnInsert": to_document(&user)? },
            )
            .with_options(options)
            .await;

        let stored = match result {
            Ok(stored) => stored,
            Err(err) if is_duplicate_key(&err) => self.find_by_email(&user.email).await?,
            Err(err) => return Err(err.into()),
        };

        stored.ok_or_else(|| {
            AppError::InternalError(format!("User '{}' missing after upsert", user.email))
        })
    }

    async fn push_badge(&self, email: &str, badge_url: &str) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let user = self
            .collection
            .find_one_and_update(
                doc! { "email": email },
                doc! { "$push": { "badges": badge_url } },
            )
            .with_options(options)
            .await?;
        Ok(user)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on users.email");

        Ok(())
    }
}
