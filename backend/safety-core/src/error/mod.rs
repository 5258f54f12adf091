pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod link;
pub mod notify;
pub mod position;

pub use catalog::CatalogError;
pub use config::ConfigError;
pub use dispatch::DispatchError;
pub use link::LinkError;
pub use notify::NotifyError;
pub use position::PositionError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Position(#[from] PositionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    Link(#[from] LinkError),
}
