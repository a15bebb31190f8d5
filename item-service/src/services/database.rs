use crate::config::MongoConfig;
use crate::models::Item;
use mongodb::{
    bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

/// The process-wide MongoDB handle.
///
/// Cloning is cheap: the driver's client is reference counted, pools its own
/// connections and is safe to share across concurrent requests.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    /// Connect and ping once. The whole sequence, including SRV/TXT lookups
    /// for `mongodb+srv://` URIs, is bounded by `connect_timeout`; there is no
    /// retry, a failure here is fatal for the caller.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        let timeout = config.connect_timeout();
        tracing::info!(uri = %config.uri, "Connecting to MongoDB");

        let mongo = tokio::time::timeout(timeout, Self::connect_and_ping(config))
            .await
            .map_err(|_| {
                tracing::error!("MongoDB did not answer within {:?}", timeout);
                AppError::DatabaseError(anyhow::anyhow!(
                    "MongoDB connect timed out after {:?}",
                    timeout
                ))
            })??;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Successfully connected to MongoDB database"
        );
        Ok(mongo)
    }

    async fn connect_and_ping(config: &MongoConfig) -> Result<Self, AppError> {
        let timeout = config.connect_timeout();

        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB URI {}: {}", config.uri, e);
            AppError::from(e)
        })?;
        options.app_name = Some("item-service".to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", config.uri, e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);
        let mongo = Self {
            client,
            db,
            collection: config.collection.clone(),
        };

        mongo.health_check().await?;
        Ok(mongo)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn items(&self) -> Collection<Item> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
