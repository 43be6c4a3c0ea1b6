mod assembler;
mod models;
mod resolver;
mod schema;
mod session;
mod store;
mod trait_def;

pub use assembler::{assemble_release, PlainReleaseQuery, ReleaseQuery};
pub use models::*;
pub use resolver::{resolve_by_gid, EntityQuery, GidEntity, Resolution};
pub use schema::{ReleaseEntity, ReleaseGroupEntity, CATALOG_VERSIONED_SCHEMAS};
pub use session::CatalogSession;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
