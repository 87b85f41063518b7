#![forbid(unsafe_code)]

pub mod archive;
pub mod assets;
pub mod builder;
pub mod color;
pub mod error;
pub mod kind;
pub mod manifest;
pub mod signing;
pub mod store;

pub use builder::*;
pub use error::PassError;
pub use kind::{FieldGroup, PassKind};
pub use signing::SigningCredentials;
pub use store::ShareStore;
