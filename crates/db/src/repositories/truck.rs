//! Truck repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{drivers, trucks};
use sabliere_core::weighing::MIN_EMPTY_WEIGHT;

/// Error types for truck operations.
#[derive(Debug, thiserror::Error)]
pub enum TruckError {
    /// Truck not found.
    #[error("Truck not found: {0}")]
    NotFound(Uuid),

    /// Owning driver not found.
    #[error("Driver not found: {0}")]
    DriverNotFound(Uuid),

    /// License plate already registered.
    #[error("License plate already registered: {0}")]
    DuplicatePlate(String),

    /// License plate is empty.
    #[error("License plate must not be empty")]
    EmptyPlate,

    /// Empty weight below the registration minimum.
    #[error("Truck empty weight too low: must be at least 2 tons")]
    EmptyWeightTooLow,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a truck.
#[derive(Debug, Clone)]
pub struct CreateTruckInput {
    /// License plate (unique).
    pub license_plate: String,
    /// Empty weight in tons.
    pub empty_weight: Decimal,
    /// Owning driver.
    pub driver_id: Uuid,
}

/// Input for updating a truck.
///
/// Empty weight is deliberately NOT updatable: it is fixed at
/// registration time and load-bearing for past transactions.
#[derive(Debug, Clone, Default)]
pub struct UpdateTruckInput {
    /// New license plate.
    pub license_plate: Option<String>,
    /// New owning driver.
    pub driver_id: Option<Uuid>,
}

/// Truck repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TruckRepository {
    db: DatabaseConnection,
}

impl TruckRepository {
    /// Creates a new truck repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new truck.
    ///
    /// The empty weight is validated here, at registration time, and
    /// re-checked by the weighbridge validator at transaction time.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or duplicate plate, a missing
    /// driver, or an empty weight below 2 tons.
    pub async fn create(&self, input: CreateTruckInput) -> Result<trucks::Model, TruckError> {
        if input.license_plate.trim().is_empty() {
            return Err(TruckError::EmptyPlate);
        }
        if input.empty_weight < MIN_EMPTY_WEIGHT {
            return Err(TruckError::EmptyWeightTooLow);
        }

        if drivers::Entity::find_by_id(input.driver_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(TruckError::DriverNotFound(input.driver_id));
        }

        if self.plate_exists(&input.license_plate).await? {
            return Err(TruckError::DuplicatePlate(input.license_plate));
        }

        let now = chrono::Utc::now().into();
        let truck = trucks::ActiveModel {
            id: Set(Uuid::now_v7()),
            license_plate: Set(input.license_plate),
            empty_weight: Set(input.empty_weight),
            driver_id: Set(input.driver_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(truck.insert(&self.db).await?)
    }

    /// Checks whether a license plate is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn plate_exists(&self, plate: &str) -> Result<bool, TruckError> {
        let count = trucks::Entity::find()
            .filter(trucks::Column::LicensePlate.eq(plate))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Finds a truck by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<trucks::Model>, TruckError> {
        Ok(trucks::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists all trucks with their drivers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
    ) -> Result<Vec<(trucks::Model, Option<drivers::Model>)>, TruckError> {
        Ok(trucks::Entity::find()
            .find_also_related(drivers::Entity)
            .order_by_desc(trucks::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Updates a truck's plate or owner.
    ///
    /// # Errors
    ///
    /// Returns `TruckError::NotFound` if the truck does not exist, or
    /// plate/driver errors as in `create`.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTruckInput,
    ) -> Result<trucks::Model, TruckError> {
        let truck = self
            .find_by_id(id)
            .await?
            .ok_or(TruckError::NotFound(id))?;

        let mut active: trucks::ActiveModel = truck.clone().into();

        if let Some(plate) = input.license_plate {
            if plate.trim().is_empty() {
                return Err(TruckError::EmptyPlate);
            }
            if plate != truck.license_plate && self.plate_exists(&plate).await? {
                return Err(TruckError::DuplicatePlate(plate));
            }
            active.license_plate = Set(plate);
        }

        if let Some(driver_id) = input.driver_id {
            if drivers::Entity::find_by_id(driver_id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(TruckError::DriverNotFound(driver_id));
            }
            active.driver_id = Set(driver_id);
        }

        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Deletes a truck.
    ///
    /// # Errors
    ///
    /// Returns `TruckError::NotFound` if the truck does not exist.
    /// Fails at the database level if transactions reference it.
    pub async fn delete(&self, id: Uuid) -> Result<(), TruckError> {
        let result = trucks::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(TruckError::NotFound(id));
        }
        Ok(())
    }
}
