use serde::Serialize;

/// A stored project record, as returned by the API
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub location: String,
    pub sector: String,
    pub email: String,
}

/// Input that already passed validation and is ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCreate {
    pub name: String,
    pub owner: String,
    pub location: String,
    pub sector: String,
    pub email: String,
}

impl Project {
    /// Build the stored record from validated input and the identity the store assigned
    pub fn from_create(id: i64, input: ProjectCreate) -> Self {
        Self {
            id,
            name: input.name,
            owner: input.owner,
            location: input.location,
            sector: input.sector,
            email: input.email,
        }
    }
}
