// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the Innkeep workspace.
//!
//! - `cargo xtask ci` runs lint, dependency checks, build and tests
//! - `cargo xtask init-database <path>` creates or upgrades a database file
//! - `cargo xtask verify-migrations` applies the `SQLite` migrations to an
//!   in-memory database, checks the resulting schema carries the constraints
//!   the persistence layer relies on, then reverts them
//!
//! Everything here shells out to cargo or to external tools except the
//! migration check, which embeds the persistence crate's migrations.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

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

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    /// Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in the project
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Create a database file, or bring an existing one up to date
    #[command(visible_alias = "db")]
    InitDatabase {
        /// Path of the `SQLite` database file
        path: String,
    },

    /// Apply and revert the `SQLite` migrations and check the schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Coverage => coverage(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::FixTypos => fix_typos(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::InitDatabase { path } => init_database(&path),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Fix typos in the project
fn fix_typos() -> Result<()> {
    cmd!("typos", "-w").run_with_trace()?;
    Ok(())
}

/// Run lib tests, then doc tests
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

// ============================================================================
// Migration verification
// ============================================================================

/// Apply pending migrations to a database file, creating it if needed.
fn init_database(path: &str) -> Result<()> {
    let mut conn = SqliteConnection::establish(path)
        .wrap_err(format!("Failed to open SQLite database at {path}"))?;
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(&mut conn)
        .wrap_err("Failed to enable WAL mode")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations to {path}: {e}"))?;
    tracing::info!(path, applied = applied.len(), "Database is up to date");
    Ok(())
}

/// Tables the persistence layer expects, with the foreign keys each carries
/// as `(column, referenced table)`.
const EXPECTED_TABLES: &[(&str, &[(&str, &str)])] = &[
    ("rooms", &[]),
    ("clients", &[]),
    (
        "occupancy",
        &[("client_id", "clients"), ("room_id", "rooms")],
    ),
    ("report_cache", &[]),
];

/// Partial unique indexes that enforce occupancy and cache rules.
const EXPECTED_UNIQUE_INDEXES: &[(&str, &str)] = &[
    ("occupancy", "idx_occupancy_active_pair"),
    ("occupancy", "idx_occupancy_active_room"),
    ("report_cache", "idx_report_cache_valid_key"),
];

/// Apply and revert the `SQLite` migrations against an in-memory database.
///
/// ## What This Command Does
///
/// 1. Applies every embedded migration with foreign keys enabled
/// 2. Introspects tables, foreign keys and unique indexes
/// 3. Fails if any expected table, foreign key or unique index is missing
/// 4. Reverts every migration and fails if any table is left behind
fn verify_migrations() -> Result<()> {
    tracing::info!("Applying SQLite migrations");
    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    let schema = introspect_sqlite_schema(&mut conn)?;
    check_expected_schema(&schema)?;
    tracing::info!(tables = schema.tables.len(), "Schema carries every expected constraint");

    tracing::info!("Reverting SQLite migrations");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert SQLite migrations: {e}"))?;
    let leftover = introspect_sqlite_schema(&mut conn)?;
    if !leftover.tables.is_empty() {
        let names: Vec<&String> = leftover.tables.keys().collect();
        return Err(eyre!("Tables left after reverting migrations: {names:?}"));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Table {
    columns: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_indexes: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
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
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;
        table_info.columns = columns.into_iter().map(|col| col.name).collect();

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;
        table_info.foreign_keys = fks
            .into_iter()
            .map(|fk| ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
            })
            .collect();

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;
        table_info.unique_indexes = indexes
            .into_iter()
            .filter(|idx| idx.unique == 1)
            .map(|idx| idx.name)
            .collect();

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

fn check_expected_schema(schema: &Schema) -> Result<()> {
    let mut problems: Vec<String> = Vec::new();

    for (name, foreign_keys) in EXPECTED_TABLES {
        let Some(table) = schema.tables.get(*name) else {
            problems.push(format!("missing table {name}"));
            continue;
        };
        for (column, target) in *foreign_keys {
            let expected = ForeignKey {
                from_column: (*column).to_string(),
                to_table: (*target).to_string(),
            };
            if !table.foreign_keys.contains(&expected) {
                problems.push(format!("{name}.{column} does not reference {target}"));
            }
        }
    }

    for (table_name, index) in EXPECTED_UNIQUE_INDEXES {
        let present = schema
            .tables
            .get(*table_name)
            .is_some_and(|table| table.unique_indexes.contains(*index));
        if !present {
            problems.push(format!("missing unique index {index} on {table_name}"));
        }
    }

    for (name, table) in &schema.tables {
        tracing::debug!(table = %name, columns = table.columns.len(), "Introspected table");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        for problem in &problems {
            tracing::error!("{problem}");
        }
        Err(eyre!("Schema verification found {} problems", problems.len()))
    }
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
