#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Local upload folder for listing, review, and hero media.
//!
//! Layout: `bucket.rs` (buckets, kinds, policy, content types), `store.rs`
//! (filesystem reads and writes), `error.rs` (error type).

pub mod bucket;
pub mod error;
pub mod store;

pub use bucket::{
    Bucket, IMAGE_EXTENSIONS, MediaKind, UploadPolicy, VIDEO_EXTENSIONS, content_type_for,
    extension_of,
};
pub use error::{MediaError, MediaResult};
pub use store::{MediaStore, OpenedFile, StoredFile, UPLOAD_URL_PREFIX, parse_local_url};
