//! Client side of the Antay contact pipeline.
//!
//! [`FormController`] owns the draft, validates it, sends it through a
//! [`Transport`], and reports the outcome through a [`Toaster`]. The
//! `antay-contact` binary puts a terminal UI on top of it.

pub mod controller;
pub mod error;
pub mod toast;
pub mod transport;

pub use controller::{
  FormController, FormOptions, FormStatus, PendingSubmit, SubmitOutcome, SubmitStep,
};
pub use error::TransportError;
pub use toast::{Toast, ToastKind, ToastLog, Toaster};
pub use transport::{ApiTransport, HostedFormTransport, Transport};
