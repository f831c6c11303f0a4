//! Menu display repository
//!
//! An occasion's menu display is one `menu_displays` row plus the
//! occasion's packages, each owning priced subpackages. Creation and
//! removal both run in a single transaction so the hierarchy is never
//! left half-built or orphaned.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::NewMenuDisplay;
use super::DbError;

/// Subpackage record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Subpackage {
    pub id: i32,
    #[serde(skip)]
    pub package_id: i32,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, FromRow)]
struct PackageRow {
    id: i32,
    occasion_id: i32,
    name: String,
}

#[derive(Debug, Clone, FromRow)]
struct DisplayRow {
    id: i32,
    occasion_id: i32,
    title: String,
}

/// Package with its subpackages
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    pub id: i32,
    pub name: String,
    pub subpackages: Vec<Subpackage>,
}

/// Full menu display for one occasion
#[derive(Debug, Clone, Serialize)]
pub struct MenuDisplay {
    pub id: i32,
    pub occasion_id: i32,
    pub title: String,
    pub packages: Vec<Package>,
}

/// Rows removed by a cascading delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub subpackages: u64,
    pub packages: u64,
    pub displays: u64,
}

/// Menu display repository
pub struct MenuDisplayRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuDisplayRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the display, its packages and subpackages (atomic).
    pub async fn create(&self, display: &NewMenuDisplay) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_occasion(&mut tx, display.occasion_id).await?;

        let (display_id,): (i32,) = sqlx::query_as(
            "INSERT INTO menu_displays (occasion_id, title) VALUES ($1, $2) RETURNING id",
        )
        .bind(display.occasion_id)
        .bind(&display.title)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            DbError::conflict_on_unique(
                e,
                "menu display",
                "Occasion already has a menu display.",
            )
        })?;

        for package in &display.packages {
            let (package_id,): (i32,) = sqlx::query_as(
                "INSERT INTO packages (occasion_id, name) VALUES ($1, $2) RETURNING id",
            )
            .bind(display.occasion_id)
            .bind(&package.name)
            .fetch_one(&mut *tx)
            .await?;

            if package.subpackages.is_empty() {
                continue;
            }

            let mut builder =
                sqlx::QueryBuilder::new("INSERT INTO subpackages (package_id, name, price) ");
            builder.push_values(&package.subpackages, |mut b, sub| {
                b.push_bind(package_id).push_bind(&sub.name).push_bind(sub.price);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(display_id)
    }

    /// Get the display attached to an occasion.
    pub async fn get(&self, occasion_id: i32) -> Result<MenuDisplay, DbError> {
        let display: DisplayRow = sqlx::query_as(
            "SELECT id, occasion_id, title FROM menu_displays WHERE occasion_id = $1",
        )
        .bind(occasion_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("menu display", occasion_id))?;

        let mut displays = self.assemble(vec![display]).await?;
        displays
            .pop()
            .ok_or_else(|| DbError::not_found("menu display", occasion_id))
    }

    pub async fn list_all(&self) -> Result<Vec<MenuDisplay>, DbError> {
        let displays: Vec<DisplayRow> =
            sqlx::query_as("SELECT id, occasion_id, title FROM menu_displays ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        self.assemble(displays).await
    }

    /// Attach packages and subpackages to display rows (two queries, no N+1).
    async fn assemble(&self, displays: Vec<DisplayRow>) -> Result<Vec<MenuDisplay>, DbError> {
        if displays.is_empty() {
            return Ok(Vec::new());
        }

        let occasion_ids: Vec<i32> = displays.iter().map(|d| d.occasion_id).collect();

        let packages: Vec<PackageRow> = sqlx::query_as(
            "SELECT id, occasion_id, name FROM packages WHERE occasion_id = ANY($1) ORDER BY id",
        )
        .bind(occasion_ids)
        .fetch_all(self.pool)
        .await?;

        let package_ids: Vec<i32> = packages.iter().map(|p| p.id).collect();

        let subpackages: Vec<Subpackage> = sqlx::query_as(
            "SELECT id, package_id, name, price FROM subpackages WHERE package_id = ANY($1) ORDER BY id",
        )
        .bind(package_ids)
        .fetch_all(self.pool)
        .await?;

        let mut subs_by_package: HashMap<i32, Vec<Subpackage>> = HashMap::new();
        for sub in subpackages {
            subs_by_package.entry(sub.package_id).or_default().push(sub);
        }

        let mut packages_by_occasion: HashMap<i32, Vec<Package>> = HashMap::new();
        for pkg in packages {
            packages_by_occasion
                .entry(pkg.occasion_id)
                .or_default()
                .push(Package {
                    subpackages: subs_by_package.remove(&pkg.id).unwrap_or_default(),
                    id: pkg.id,
                    name: pkg.name,
                });
        }

        Ok(displays
            .into_iter()
            .map(|d| MenuDisplay {
                packages: packages_by_occasion
                    .remove(&d.occasion_id)
                    .unwrap_or_default(),
                id: d.id,
                occasion_id: d.occasion_id,
                title: d.title,
            })
            .collect())
    }

    /// Remove an occasion's menu display with all packages and subpackages.
    ///
    /// Fails with `NotFound` when the occasion doesn't exist. The three
    /// deletes commit together or not at all.
    pub async fn delete_for_occasion(&self, occasion_id: i32) -> Result<CascadeReport, DbError> {
        let mut tx = self.pool.begin().await?;

        ensure_occasion(&mut tx, occasion_id).await?;
        let report = delete_cascade(&mut tx, occasion_id).await?;

        tx.commit().await?;

        tracing::info!(
            occasion_id,
            subpackages = report.subpackages,
            packages = report.packages,
            "menu display deleted"
        );
        Ok(report)
    }
}

async fn ensure_occasion(conn: &mut PgConnection, occasion_id: i32) -> Result<(), DbError> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM occasions WHERE id = $1)")
            .bind(occasion_id)
            .fetch_one(&mut *conn)
            .await?;

    if !exists {
        return Err(DbError::not_found("occasion", occasion_id));
    }
    Ok(())
}

/// Delete subpackages, then packages, then display rows for an occasion.
///
/// Runs on the caller's connection so it can take part in the caller's
/// transaction; it does not commit.
pub async fn delete_cascade(
    conn: &mut PgConnection,
    occasion_id: i32,
) -> Result<CascadeReport, DbError> {
    let subpackages = sqlx::query(
        r#"
        DELETE FROM subpackages
        WHERE package_id IN (SELECT id FROM packages WHERE occasion_id = $1)
        "#,
    )
    .bind(occasion_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    let packages = sqlx::query("DELETE FROM packages WHERE occasion_id = $1")
        .bind(occasion_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let displays = sqlx::query("DELETE FROM menu_displays WHERE occasion_id = $1")
        .bind(occasion_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(CascadeReport {
        subpackages,
        packages,
        displays,
    })
}
