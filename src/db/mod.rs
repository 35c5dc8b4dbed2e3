use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{config::Config, errors::AppResult};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("Connected to MongoDB database '{}'", config.mongo_db_name);

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// True when the write was rejected by a unique index. Plain writes report
/// this as a write error; `findAndModify` reports it as a command error.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mongodb::error::{CommandError, Error, WriteError};

    fn write_error(code: i32) -> Error {
        let write_error: WriteError =
            bson::from_document(doc! { "code": code, "errmsg": "E11000" }).unwrap();
        Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    fn command_error(code: i32) -> Error {
        let command_error: CommandError = bson::from_document(
            doc! { "code": code, "codeName": "DuplicateKey", "errmsg": "E11000" },
        )
        .unwrap();
        Error::from(ErrorKind::Command(command_error))
    }

    #[test]
    fn test_duplicate_key_from_insert_or_update() {
        assert!(is_duplicate_key(&write_error(DUPLICATE_KEY_CODE)));
        assert!(!is_duplicate_key(&write_error(121)));
    }

    #[test]
    fn test_duplicate_key_from_find_and_modify() {
        assert!(is_duplicate_key(&command_error(DUPLICATE_KEY_CODE)));
        assert!(!is_duplicate_key(&command_error(13)));
    }

    #[test]
    fn test_database_structure() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Database>();
    }
}
