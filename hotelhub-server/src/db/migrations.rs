//! Schema migrations
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so this runs on each
//! startup and via `hotelhub migrate`.

use sqlx::PgPool;

/// Table definitions in dependency order
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL,
            password TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "bookings",
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id SERIAL PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone_no VARCHAR(20),
            datetime TIMESTAMPTZ NOT NULL,
            no_of_people INTEGER NOT NULL,
            special_request TEXT
        )
        "#,
    ),
    (
        "contact_us",
        r#"
        CREATE TABLE IF NOT EXISTS contact_us (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            subject TEXT NOT NULL,
            message TEXT NOT NULL
        )
        "#,
    ),
    (
        "services",
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id SERIAL PRIMARY KEY,
            image_path TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    ),
    (
        "team_members",
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            id SERIAL PRIMARY KEY,
            image_path TEXT NOT NULL,
            name TEXT NOT NULL,
            designation TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    ),
    (
        "events",
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id SERIAL PRIMARY KEY,
            pic_path TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL
        )
        "#,
    ),
    (
        "occasions",
        r#"
        CREATE TABLE IF NOT EXISTS occasions (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            heading TEXT NOT NULL,
            description TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            standard_price DOUBLE PRECISION NOT NULL,
            outstandard_price DOUBLE PRECISION NOT NULL,
            tags JSONB NOT NULL DEFAULT '[]'::jsonb,
            images JSONB NOT NULL DEFAULT '[]'::jsonb
        )
        "#,
    ),
    (
        "menu_headings",
        r#"
        CREATE TABLE IF NOT EXISTS menu_headings (
            id SERIAL PRIMARY KEY,
            heading TEXT NOT NULL,
            heading_image TEXT NOT NULL
        )
        "#,
    ),
    (
        "dishes",
        r#"
        CREATE TABLE IF NOT EXISTS dishes (
            id SERIAL PRIMARY KEY,
            heading_id INTEGER NOT NULL REFERENCES menu_headings(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            image TEXT NOT NULL
        )
        "#,
    ),
    (
        "menu_displays",
        r#"
        CREATE TABLE IF NOT EXISTS menu_displays (
            id SERIAL PRIMARY KEY,
            occasion_id INTEGER NOT NULL UNIQUE REFERENCES occasions(id) ON DELETE CASCADE,
            title TEXT NOT NULL
        )
        "#,
    ),
    (
        "packages",
        r#"
        CREATE TABLE IF NOT EXISTS packages (
            id SERIAL PRIMARY KEY,
            occasion_id INTEGER NOT NULL REFERENCES occasions(id) ON DELETE CASCADE,
            name TEXT NOT NULL
        )
        "#,
    ),
    (
        "subpackages",
        r#"
        CREATE TABLE IF NOT EXISTS subpackages (
            id SERIAL PRIMARY KEY,
            package_id INTEGER NOT NULL REFERENCES packages(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL
        )
        "#,
    ),
];

/// Columns added after a table first shipped
const ADDED_COLUMNS: &[&str] =
    &["ALTER TABLE bookings ADD COLUMN IF NOT EXISTS phone_no VARCHAR(20)"];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_bookings_user ON bookings(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_dishes_heading ON dishes(heading_id)",
    "CREATE INDEX IF NOT EXISTS idx_packages_occasion ON packages(occasion_id)",
    "CREATE INDEX IF NOT EXISTS idx_subpackages_package ON subpackages(package_id)",
];

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    for (table, ddl) in TABLES {
        tracing::debug!(table, "ensuring table");
        sqlx::query(ddl).execute(pool).await?;
    }

    for ddl in ADDED_COLUMNS.iter().chain(INDEXES) {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("Migrations complete");
    Ok(())
}
