// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! `cargo xtask ci` is what CI runs: clippy and format checks, a build, the
//! workspace tests, and a migration check for the hotel ledger database.
//!
//! ### Migration Verification
//!
//! `cargo xtask verify-migrations` applies the embedded `SQLite` migrations
//! to an in-memory database, introspects the resulting schema, and fails if
//! a table, unique constraint, foreign key, or the partial index that keeps
//! one active stay per client is missing. No external services are needed.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build every workspace target
    #[command(visible_alias = "b")]
    Build,

    /// Run clippy and the format check
    #[command(visible_alias = "l")]
    Lint,

    /// Reformat the workspace
    #[command(visible_alias = "fmt")]
    Format,

    /// Run the workspace tests
    #[command(visible_alias = "t")]
    Test,

    /// Apply the `SQLite` migrations in memory and check the resulting schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Lint => lint(),
            Self::Format => run_cargo_nightly(&["fmt", "--all"]),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()
}

fn build() -> Result<()> {
    run_cargo(&["build", "--workspace", "--all-targets"])
}

/// Clippy with warnings denied, then the nightly format check
fn lint() -> Result<()> {
    run_cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    run_cargo_nightly(&["fmt", "--all", "--check"])
}

/// Unit and server tests, then doc tests
fn test() -> Result<()> {
    run_cargo(&["test", "--workspace", "--all-targets"])?;
    run_cargo(&["test", "--workspace", "--doc"])
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify the migrations produce the schema the ledger relies on.
///
/// ## What This Command Does
///
/// 1. Opens an in-memory `SQLite` database with foreign keys enabled
/// 2. Applies every migration under `crates/persistence/migrations`
/// 3. Introspects tables, columns, unique constraints, foreign keys and indexes
/// 4. Compares the result with the expected hotel ledger layout
///
/// ## Failures
///
/// The command fails if a migration does not apply, or if any expected
/// table, unique constraint, foreign key or index is missing.
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Applying SQLite migrations");
    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply SQLite migrations: {}", e))?;

    tracing::info!("Introspecting SQLite schema");
    let schema = introspect_sqlite_schema(&mut conn)?;

    tracing::info!("Comparing with the expected layout");
    check_expected_layout(&schema)?;

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Introspected tables keyed by name
type Schema = BTreeMap<String, Table>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<Vec<String>>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    declared_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
    unique: bool,
    partial: bool,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
        #[diesel(sql_type = Text)]
        origin: String,
        #[diesel(sql_type = Integer)]
        partial: i32,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema::new();

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            if col.pk > 0 {
                table_info.primary_keys.insert(col.name.clone());
            }
            table_info.columns.insert(
                col.name,
                Column {
                    declared_type: col.r#type.to_uppercase(),
                    nullable: col.notnull == 0,
                },
            );
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            let column_names: Vec<String> = index_columns.into_iter().map(|c| c.name).collect();

            // origin 'u' is a UNIQUE column or table constraint
            if idx.origin == "u" {
                table_info.unique_constraints.insert(column_names);
            } else if !idx.name.starts_with("sqlite_autoindex_") {
                table_info.indexes.insert(Index {
                    name: idx.name,
                    columns: column_names,
                    unique: idx.unique != 0,
                    partial: idx.partial != 0,
                });
            }
        }

        schema.insert(table.name, table_info);
    }

    Ok(schema)
}

const EXPECTED_TABLES: [&str; 5] = [
    "cleaning_assignments",
    "clients",
    "employees",
    "rooms",
    "stays",
];

const EXPECTED_UNIQUE: [(&str, &[&str]); 3] = [
    ("rooms", &["number"]),
    ("clients", &["passport_number"]),
    ("cleaning_assignments", &["employee_id", "weekday", "floor"]),
];

const EXPECTED_FOREIGN_KEYS: [(&str, &str, &str, &str); 3] = [
    ("stays", "client_id", "clients", "client_id"),
    ("stays", "room_id", "rooms", "room_id"),
    (
        "cleaning_assignments",
        "employee_id",
        "employees",
        "employee_id",
    ),
];

/// Columns that must accept NULL; every other expected column is NOT NULL.
const NULLABLE_COLUMNS: [(&str, &str); 2] =
    [("stays", "check_out"), ("employees", "termination_date")];

fn table<'s>(schema: &'s Schema, name: &str) -> Result<&'s Table> {
    schema
        .get(name)
        .ok_or_else(|| color_eyre::eyre::eyre!("Table '{name}' is missing"))
}

/// Check the introspected schema against the hotel ledger layout
fn check_expected_layout(schema: &Schema) -> Result<()> {
    let actual: BTreeSet<&str> = schema.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = EXPECTED_TABLES.into_iter().collect();
    if actual != expected {
        return Err(color_eyre::eyre::eyre!(
            "Table set mismatch: expected {:?}, found {:?}",
            expected,
            actual
        ));
    }

    for (name, columns) in EXPECTED_UNIQUE {
        let wanted: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
        if !table(schema, name)?.unique_constraints.contains(&wanted) {
            return Err(color_eyre::eyre::eyre!(
                "Table '{name}' has no unique constraint on {columns:?}"
            ));
        }
    }

    for (from_table, from_column, to_table, to_column) in EXPECTED_FOREIGN_KEYS {
        let wanted = ForeignKey {
            from_column: from_column.to_string(),
            to_table: to_table.to_string(),
            to_column: to_column.to_string(),
        };
        if !table(schema, from_table)?.foreign_keys.contains(&wanted) {
            return Err(color_eyre::eyre::eyre!(
                "Missing foreign key {from_table}.{from_column} -> {to_table}.{to_column}"
            ));
        }
    }

    for (name, info) in schema {
        if info.primary_keys.len() != 1 {
            return Err(color_eyre::eyre::eyre!(
                "Table '{name}' should have a single-column primary key, found {:?}",
                info.primary_keys
            ));
        }
        for (column, col) in &info.columns {
            let may_be_null = NULLABLE_COLUMNS.contains(&(name.as_str(), column.as_str()));
            if col.nullable && !may_be_null && !info.primary_keys.contains(column) {
                return Err(color_eyre::eyre::eyre!(
                    "Column {name}.{column} ({}) should be NOT NULL",
                    col.declared_type
                ));
            }
        }
    }

    let stays = table(schema, "stays")?;
    let one_active_stay = stays.indexes.iter().any(|idx| {
        idx.unique && idx.partial && idx.columns == ["client_id".to_string()]
    });
    if !one_active_stay {
        return Err(color_eyre::eyre::eyre!(
            "Table 'stays' has no partial unique index on client_id for active stays"
        ));
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
