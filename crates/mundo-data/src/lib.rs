#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Content documents and their storage for the Mundo site.
//!
//! Layout: `model/` (typed documents), `document.rs` (collection contract and
//! patch merging), `filter.rs` (listing filters), `store.rs` (backend trait),
//! `memory.rs` and `postgres.rs` (backends), `repository.rs` (typed facade).

pub mod document;
pub mod error;
pub mod filter;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod repository;
pub mod store;

pub use document::{Collection, Document, apply_patch};
pub use error::{DataError, Result as DataResult};
pub use filter::{PropertyFilter, ReviewFilter};
pub use memory::MemoryStore;
pub use model::{
    AdminUser, AdminUserView, HeroKind, HeroMedia, MediaRef, NewAdminUser, NewHeroMedia,
    NewPromotionBanner, NewProperty, NewReview, PromotionBanner, Property, PropertyKind, Review,
};
pub use postgres::{PgStore, run_migrations};
pub use repository::{Repository, new_id};
pub use store::ContentStore;
