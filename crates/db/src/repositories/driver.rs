//! Driver repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{drivers, trucks};

/// Error types for driver operations.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Driver not found.
    #[error("Driver not found: {0}")]
    NotFound(Uuid),

    /// Driver still owns trucks; deleting would orphan weight math.
    #[error("Driver still owns {count} truck(s) and cannot be deleted")]
    HasTrucks {
        /// Number of trucks registered to the driver.
        count: u64,
    },

    /// Driver name is empty.
    #[error("Driver name must not be empty")]
    EmptyName,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a driver.
#[derive(Debug, Clone)]
pub struct CreateDriverInput {
    /// Driver name.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// Driver repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct DriverRepository {
    db: DatabaseConnection,
}

impl DriverRepository {
    /// Creates a new driver repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the insert fails.
    pub async fn create(&self, input: CreateDriverInput) -> Result<drivers::Model, DriverError> {
        if input.name.trim().is_empty() {
            return Err(DriverError::EmptyName);
        }

        let now = chrono::Utc::now().into();
        let driver = drivers::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            phone: Set(input.phone),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(driver.insert(&self.db).await?)
    }

    /// Finds a driver by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<drivers::Model>, DriverError> {
        Ok(drivers::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists all drivers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<drivers::Model>, DriverError> {
        Ok(drivers::Entity::find()
            .order_by_desc(drivers::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Deletes a driver.
    ///
    /// Deletion is rejected while the driver still owns trucks, so
    /// truck empty weights never lose their owner. The schema enforces
    /// the same with ON DELETE RESTRICT; the explicit check gives the
    /// caller a useful error.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::HasTrucks` if trucks reference the driver,
    /// `DriverError::NotFound` if the driver does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), DriverError> {
        let truck_count = trucks::Entity::find()
            .filter(trucks::Column::DriverId.eq(id))
            .count(&self.db)
            .await?;
        if truck_count > 0 {
            return Err(DriverError::HasTrucks { count: truck_count });
        }

        let result = drivers::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DriverError::NotFound(id));
        }

        Ok(())
    }
}
