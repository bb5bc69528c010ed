pub mod dispatch;
pub mod render;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fakes;

pub use crate::domain::model::{DomainPolicy, IngressPolicy, PolicyList};
pub use crate::domain::ports::{ConfigProvider, Directory, PolicyClient};
pub use crate::domain::warnings::{Reported, Warnings};
pub use crate::utils::error::Result;
