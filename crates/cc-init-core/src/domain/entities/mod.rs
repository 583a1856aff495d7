pub mod asset;
pub mod common;
pub mod layout;

pub use crate::domain::DomainError;
pub use asset::AssetEntry;
pub use common::{EntryKind, FileMode, FileStat, RelativePath};
pub use layout::DeploymentLayout;
