pub mod accelerator;
pub mod assembler;
pub mod export;
pub mod extractor;
pub mod impact;
pub mod reference;

pub use crate::domain::model::{EconomicImpact, RequestParameters, RfiResponse};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
