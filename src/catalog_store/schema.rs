//! SQLite schema definitions for the release catalog.
//!
//! The layout follows the MusicBrainz relational model: every entity has an
//! integer `id` primary key and, where it is publicly addressable, a unique
//! text `gid` (a UUID). Superseded gids live in parallel `*_gid_redirect`
//! tables pointing at the canonical row. Small taxonomies (status, packaging,
//! formats, types...) are label tables of `(id, name)`.

use super::resolver::GidEntity;
use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, SqlType, Table, VersionedSchema};

// =============================================================================
// Label Tables
// =============================================================================

macro_rules! label_table {
    ($name:expr) => {
        Table {
            name: $name,
            columns: &[
                sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
                sqlite_column!("name", &SqlType::Text, non_null = true),
            ],
            indices: &[],
            unique_constraints: &[],
        }
    };
}

const RELEASE_STATUS_TABLE: Table = label_table!("release_status");
const RELEASE_PACKAGING_TABLE: Table = label_table!("release_packaging");
const LANGUAGE_TABLE: Table = label_table!("language");
const SCRIPT_TABLE: Table = label_table!("script");
const RELEASE_GROUP_PRIMARY_TYPE_TABLE: Table = label_table!("release_group_primary_type");
const RELEASE_GROUP_SECONDARY_TYPE_TABLE: Table = label_table!("release_group_secondary_type");
const MEDIUM_FORMAT_TABLE: Table = label_table!("medium_format");
const ARTIST_CREDIT_TABLE: Table = label_table!("artist_credit");

macro_rules! references {
    ($fk_name:ident, $table:expr) => {
        const $fk_name: ForeignKey = ForeignKey {
            foreign_table: $table,
            foreign_column: "id",
        };
    };
}

references!(ARTIST_CREDIT_FK, "artist_credit");
references!(RELEASE_GROUP_PRIMARY_TYPE_FK, "release_group_primary_type");
references!(RELEASE_GROUP_FK, "release_group");
references!(RELEASE_GROUP_SECONDARY_TYPE_FK, "release_group_secondary_type");
references!(RELEASE_FK, "release");
references!(RELEASE_STATUS_FK, "release_status");
references!(RELEASE_PACKAGING_FK, "release_packaging");
references!(LANGUAGE_FK, "language");
references!(SCRIPT_FK, "script");
references!(MEDIUM_FORMAT_FK, "medium_format");
references!(MEDIUM_FK, "medium");

// =============================================================================
// Release Group
// =============================================================================

const RELEASE_GROUP_TABLE: Table = Table {
    name: "release_group",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("gid", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "artist_credit",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_CREDIT_FK)
        ),
        sqlite_column!(
            "type",
            &SqlType::Integer,
            foreign_key = Some(&RELEASE_GROUP_PRIMARY_TYPE_FK)
        ),
    ],
    indices: &[("idx_release_group_gid", "gid")],
    unique_constraints: &[&["gid"]],
};

const RELEASE_GROUP_GID_REDIRECT_TABLE: Table = Table {
    name: "release_group_gid_redirect",
    columns: &[
        sqlite_column!("gid", &SqlType::Text, non_null = true),
        sqlite_column!(
            "new_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RELEASE_GROUP_FK)
        ),
    ],
    indices: &[("idx_release_group_gid_redirect_gid", "gid")],
    unique_constraints: &[&["gid"]],
};

/// Release group <-> secondary type. Storage order is the listing order.
const RELEASE_GROUP_SECONDARY_TYPE_JOIN_TABLE: Table = Table {
    name: "release_group_secondary_type_join",
    columns: &[
        sqlite_column!(
            "release_group",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RELEASE_GROUP_FK)
        ),
        sqlite_column!(
            "secondary_type",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RELEASE_GROUP_SECONDARY_TYPE_FK)
        ),
    ],
    indices: &[(
        "idx_release_group_secondary_type_join_release_group",
        "release_group",
    )],
    unique_constraints: &[&["release_group", "secondary_type"]],
};

// =============================================================================
// Release
// =============================================================================

const RELEASE_TABLE: Table = Table {
    name: "release",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("gid", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "artist_credit",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_CREDIT_FK)
        ),
        sqlite_column!(
            "release_group",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RELEASE_GROUP_FK)
        ),
        sqlite_column!(
            "status",
            &SqlType::Integer,
            foreign_key = Some(&RELEASE_STATUS_FK)
        ),
        sqlite_column!(
            "packaging",
            &SqlType::Integer,
            foreign_key = Some(&RELEASE_PACKAGING_FK)
        ),
        sqlite_column!(
            "language",
            &SqlType::Integer,
            foreign_key = Some(&LANGUAGE_FK)
        ),
        sqlite_column!(
            "script",
            &SqlType::Integer,
            foreign_key = Some(&SCRIPT_FK)
        ),
    ],
    indices: &[
        ("idx_release_gid", "gid"),
        ("idx_release_release_group", "release_group"),
    ],
    unique_constraints: &[&["gid"]],
};

const RELEASE_GID_REDIRECT_TABLE: Table = Table {
    name: "release_gid_redirect",
    columns: &[
        sqlite_column!("gid", &SqlType::Text, non_null = true),
        sqlite_column!(
            "new_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RELEASE_FK)
        ),
    ],
    indices: &[("idx_release_gid_redirect_gid", "gid")],
    unique_constraints: &[&["gid"]],
};

// =============================================================================
// Medium and Track
// =============================================================================

const MEDIUM_TABLE: Table = Table {
    name: "medium",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "release",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RELEASE_FK)
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "format",
            &SqlType::Integer,
            foreign_key = Some(&MEDIUM_FORMAT_FK)
        ),
        sqlite_column!("name", &SqlType::Text),
    ],
    indices: &[("idx_medium_release", "release")],
    unique_constraints: &[&["release", "position"]],
};

const TRACK_TABLE: Table = Table {
    name: "track",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("gid", &SqlType::Text, non_null = true),
        sqlite_column!(
            "medium",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&MEDIUM_FK)
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
        sqlite_column!("number", &SqlType::Text, non_null = true), // free text, e.g. "A1"
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "artist_credit",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_CREDIT_FK)
        ),
        sqlite_column!("length", &SqlType::Integer), // milliseconds
    ],
    indices: &[("idx_track_gid", "gid"), ("idx_track_medium", "medium")],
    unique_constraints: &[&["gid"]],
};

// =============================================================================
// Addressable entities
// =============================================================================

/// Releases, addressable by gid with redirects.
pub enum ReleaseEntity {}

impl GidEntity for ReleaseEntity {
    const TABLE: &'static str = RELEASE_TABLE.name;
    const REDIRECT_TABLE: &'static str = RELEASE_GID_REDIRECT_TABLE.name;
}

/// Release groups, addressable by gid with redirects.
pub enum ReleaseGroupEntity {}

impl GidEntity for ReleaseGroupEntity {
    const TABLE: &'static str = RELEASE_GROUP_TABLE.name;
    const REDIRECT_TABLE: &'static str = RELEASE_GROUP_GID_REDIRECT_TABLE.name;
}

// =============================================================================
// Versioned Schema Definition
// =============================================================================

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        RELEASE_STATUS_TABLE,
        RELEASE_PACKAGING_TABLE,
        LANGUAGE_TABLE,
        SCRIPT_TABLE,
        RELEASE_GROUP_PRIMARY_TYPE_TABLE,
        RELEASE_GROUP_SECONDARY_TYPE_TABLE,
        MEDIUM_FORMAT_TABLE,
        ARTIST_CREDIT_TABLE,
        RELEASE_GROUP_TABLE,
        RELEASE_GROUP_GID_REDIRECT_TABLE,
        RELEASE_GROUP_SECONDARY_TYPE_JOIN_TABLE,
        RELEASE_TABLE,
        RELEASE_GID_REDIRECT_TABLE,
        MEDIUM_TABLE,
        TRACK_TABLE,
    ],
}];
