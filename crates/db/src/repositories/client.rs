//! Client repository for database operations.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::clients;

/// Error types for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client not found.
    #[error("Client not found: {0}")]
    NotFound(Uuid),

    /// Client name is empty.
    #[error("Client name must not be empty")]
    EmptyName,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a client.
///
/// Email format is validated at the API boundary before this input is
/// built.
#[derive(Debug, Clone)]
pub struct CreateClientInput {
    /// Client name (required).
    pub name: String,
    /// Optional company.
    pub company: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
}

/// Client repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the insert fails.
    pub async fn create(&self, input: CreateClientInput) -> Result<clients::Model, ClientError> {
        if input.name.trim().is_empty() {
            return Err(ClientError::EmptyName);
        }

        let now = chrono::Utc::now().into();
        let client = clients::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            company: Set(input.company),
            phone: Set(input.phone),
            email: Set(input.email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(client.insert(&self.db).await?)
    }

    /// Finds a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<clients::Model>, ClientError> {
        Ok(clients::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists all clients, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<clients::Model>, ClientError> {
        Ok(clients::Entity::find()
            .order_by_desc(clients::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
