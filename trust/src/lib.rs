//! Trust lifecycle engine for the VESTA escrow.
//!
//! A trust ties one settlor, one beneficiary, and one asset under a fixed
//! deposit/withdrawal installment schedule. This crate owns the registry of
//! trusts and the engine that enforces every lifecycle transition.

pub mod engine;
pub mod error;
pub mod event;
pub mod gateway;
pub mod record;
pub mod registry;

pub use engine::{EngineConfig, TrustEngine, WithdrawSpacing};
pub use error::TrustError;
pub use event::{EventBus, EventSink, TrustEvent};
pub use gateway::{AssetGateway, GatewayError};
pub use record::{TrustSetting, TrustStatus};
pub use registry::TrustRegistry;
