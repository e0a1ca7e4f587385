use std::str::FromStr;

use anyhow::Result;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{ConnectOptions, Connection, Sqlite};

use crate::config::Config;
use crate::models::{Project, ProjectCreate};
use crate::store::{ProjectSession, ProjectStore, StoreResult};

const CREATE_PROJECT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS project (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        owner TEXT NOT NULL,
        location TEXT NOT NULL,
        sector TEXT NOT NULL,
        email TEXT NOT NULL
    )
"#;

const CREATE_NAME_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_project_name ON project (name)";

/// Database connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new Database instance with a connection pool.
    ///
    /// The database file is created if it does not exist yet.
    pub async fn new(config: &Config) -> Result<Self> {
        let statement_level = if config.echo_sql {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Off
        };

        let options = SqliteConnectOptions::from_str(config.database_url())?
            .create_if_missing(true)
            .log_statements(statement_level);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the project table and its index if they are missing
    pub async fn create_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(CREATE_PROJECT_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_NAME_INDEX).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Wait for every connection to be returned and close the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One pooled connection, returned to the pool on drop
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
}

impl ProjectStore for Database {
    type Session = SqliteSession;

    async fn open_session(&self) -> StoreResult<SqliteSession> {
        let conn = self.get_pool().acquire().await?;
        Ok(SqliteSession { conn })
    }
}

impl ProjectSession for SqliteSession {
    async fn create(&mut self, input: ProjectCreate) -> StoreResult<Project> {
        let mut tx = self.conn.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO project (name, owner, location, sector, email)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.owner)
        .bind(&input.location)
        .bind(&input.sector)
        .bind(&input.email)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Project::from_create(id, input))
    }

    async fn list(&mut self) -> StoreResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, owner, location, sector, email FROM project ORDER BY id ASC",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(projects)
    }
}

/// Initialize the database connection pool and make sure the schema exists
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    tracing::info!("creating database and tables if they do not exist");
    db.create_schema().await?;
    tracing::info!("database and tables ready");

    Ok(db)
}
