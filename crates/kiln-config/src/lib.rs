//! Build configuration provider for kiln static sites.
//!
//! The provider turns a [`Profile`] into a [`SiteSetup`]: an immutable
//! configuration record plus the ordered list of build-time registrations
//! (filters, passthrough copies) a host applies before building.

pub mod config;
pub mod date;
pub mod dirs;
pub mod engine;
pub mod profile;
pub mod registration;

pub use config::{provide, BuildConfig, ConfigBuilder, SiteSetup};
pub use date::{html_date_string, parse_date, Clock, FixedClock, SystemClock};
pub use dirs::{DirectoryMapping, ResolvedDirs};
pub use engine::EngineId;
pub use profile::{Profile, ProfileError};
pub use registration::{BuiltinFilter, PassthroughRule, Registration};
