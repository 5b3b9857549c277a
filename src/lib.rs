//! `repeater` is the engine behind repeating-card editors.
//!
//! A repeater manages an ordered list of caller-defined records. Records may
//! be appended, prepended, removed, updated and reordered; which of those
//! actions is currently allowed depends on each record's position. Order
//! changes are narrated through an injected [`Announcer`], and keyboard focus
//! can be walked between entries with a [`FocusNavigator`].
//!
//! The pieces, leaf-first:
//! - [`state::ControllableState`] decides who owns the current value.
//! - [`engine::ops`] holds the pure sequence transforms.
//! - [`constraint::Constraints`] derives per-position permissions.
//! - [`focus::FocusNavigator`] walks focus over a registry of entries.
//! - [`Reorderable`] ties all of them together.
//!
//! ```
//! use repeater::Options;
//! use repeater::Reorderable;
//!
//! let mut list = Reorderable::new(vec!["a", "b", "c"], Options::default());
//! list.move_item(0, -1);
//! assert_eq!(list.items()[2].data, "a");
//! ```

#![warn(missing_docs, unused)]

pub mod announce;
pub mod config;
pub mod constraint;
pub mod engine;
pub mod error;
pub mod focus;
pub mod state;

pub use announce::Announcement;
pub use announce::Announcer;
pub use config::Config;
pub use constraint::Constraints;
pub use constraint::Permissions;
pub use engine::AddAffordance;
pub use engine::Collection;
pub use engine::Item;
pub use engine::ItemId;
pub use engine::Merge;
pub use engine::Options;
pub use engine::Reorderable;
pub use error::Error;
pub use focus::FocusNavigator;
pub use state::ControllableState;
pub use state::StateOwner;
