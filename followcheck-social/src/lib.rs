//! Social network session client and friendship logic for followcheck.
//!
//! [`instagram`] wraps the private API behind a session capability,
//! [`feed`] defines the paginated-source interface and its drainer, and
//! [`reconcile`] computes the derived friendship lists from a fetched
//! followers/following pair.
pub mod feed;
pub mod instagram;
pub mod reconcile;

pub use instagram::InstagramSession;
