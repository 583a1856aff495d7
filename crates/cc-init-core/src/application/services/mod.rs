//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: "read the template bundle" and "deploy it".

pub mod deploy_engine;
pub mod template_manager;

pub use deploy_engine::{DeployOptions, DeploymentEngine, RunPhase};
pub use template_manager::TemplateManager;
