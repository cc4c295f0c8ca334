//! Core types and validation rules for the Antay contact pipeline.
//!
//! Both ends of the pipeline depend on this crate: the terminal form validates
//! a [`draft::SubmissionDraft`] before sending it, and the HTTP endpoint
//! re-validates the [`wire::ContactRequest`] it receives. Neither side trusts
//! the other's pass, so the rules live here exactly once.
//!
//! This crate is deliberately free of HTTP and email dependencies; delivery
//! backends implement [`notify::Notifier`].

pub mod draft;
pub mod error;
pub mod html;
pub mod notify;
pub mod validate;
pub mod wire;

pub use draft::{Field, SubmissionDraft};
pub use error::{Error, Result};
pub use notify::{Notification, Notifier};
pub use validate::{Rules, ValidationErrorSet, is_valid_email, validate, validate_request};
pub use wire::{ContactRequest, ContactResponse, SubmissionResult};
