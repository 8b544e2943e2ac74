use mongodb::{Client, Collection, Database};
use std::error::Error;

pub mod mongo_store;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::*;

pub const FAVORITES: &str = "favorites";
pub const PARTNERS: &str = "partners";
pub const CAMPSITES: &str = "campsites";
pub const USERS: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .rsplit('/')
            .next()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("nucampsite");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the service relies on
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // favorites(user) UNIQUE - at most one list per user
        let favorites = self.collection::<mongodb::bson::Document>(FAVORITES);
        let favorites_index = IndexModel::builder()
            .keys(doc! { "user": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match favorites.create_index(favorites_index).await {
            Ok(_) => log::info!("   ✅ Index created: favorites(user) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // partners(name) UNIQUE
        let partners = self.collection::<mongodb::bson::Document>(PARTNERS);
        let partners_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match partners.create_index(partners_index).await {
            Ok(_) => log::info!("   ✅ Index created: partners(name) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // users(user_id) - resolving comment authors
        let users = self.collection::<mongodb::bson::Document>(USERS);
        let users_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .build();

        match users.create_index(users_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(user_id)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
