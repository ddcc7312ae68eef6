//! # orchkit-scaffold
//!
//! Template discovery, plan building, plan execution and the doctor check.
//!
//! Build a plan with [`plan_init`], [`plan_upgrade`] or [`plan_add_stack`],
//! preview it with [`PlanItem::disposition`], then hand it to [`apply_plan`].
//! [`doctor::run`] inspects a scaffolded tree independently.

pub mod discovery;
pub mod doctor;
pub mod error;
pub mod library;
pub mod plan;
pub mod writer;

pub use doctor::{CheckOutcome, DoctorReport};
pub use error::ScaffoldError;
pub use library::TemplateLibrary;
pub use plan::{
    build_plan, plan_add_stack, plan_init, plan_upgrade, Disposition, PlanItem, ScaffoldCtx,
    DEFAULT_EVIDENCE_ROOT, DEFAULT_STACK,
};
pub use writer::{apply_plan, WriteResult};
