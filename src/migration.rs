//! Database bootstrap: create the database if missing, then the entity tables.
//! Every statement is idempotent, so this runs on each start.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// DDL for the schema, both entity tables and their lookup indexes, in dependency order.
pub fn table_ddl(schema: &str) -> Vec<String> {
    let s = quote(schema);
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", s),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {}."account" (
                "id" BIGSERIAL PRIMARY KEY,
                "name" VARCHAR(200) NOT NULL,
                "email" VARCHAR(200) NOT NULL UNIQUE,
                "password" VARCHAR(200) NOT NULL,
                "creation_date" TIMESTAMP NOT NULL DEFAULT NOW()
            )"#,
            s
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {}."listing" (
                "id" BIGSERIAL PRIMARY KEY,
                "title" VARCHAR(200) NOT NULL,
                "description" TEXT NOT NULL DEFAULT '',
                "creation_date" TIMESTAMP NOT NULL DEFAULT NOW(),
                "user_id" BIGINT NOT NULL REFERENCES {}."account" ("id") ON DELETE CASCADE
            )"#,
            s, s
        ),
        format!(r#"CREATE INDEX IF NOT EXISTS "listing_title_idx" ON {}."listing" ("title")"#, s),
        format!(
            r#"CREATE INDEX IF NOT EXISTS "listing_description_idx" ON {}."listing" ("description")"#,
            s
        ),
        format!(r#"CREATE INDEX IF NOT EXISTS "listing_user_id_idx" ON {}."listing" ("user_id")"#, s),
    ]
}

/// Create the schema and entity tables when they do not exist yet.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for sql in table_ddl(schema) {
        tracing::debug!(sql = %sql, "ddl");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "entity tables ready");
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        message: e.to_string(),
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url.rfind('/').ok_or_else(|| ConfigError::Invalid {
        key: "DATABASE_URL",
        message: "no path".into(),
    })? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}
