//! Guardrail Engine
//!
//! Admission-control checks run before executing client operations. Each
//! guardrail reads its limits from live configuration on every call and
//! either lets the operation through, lets it through with a warning for the
//! client, or aborts it. System and superuser callers are never checked.
//!
//! # Example
//!
//! ```
//! use guardrail_engine::{ClientContext, ClientWarnings, ConfigSource, Guardrails, GuardrailsConfig};
//!
//! let source = ConfigSource::new(GuardrailsConfig {
//!     tables_warn_threshold: 100,
//!     tables_abort_threshold: 200,
//!     ..Default::default()
//! });
//! let guardrails = Guardrails::new(&source);
//!
//! let mut warnings = ClientWarnings::new();
//! let outcome = guardrails.tables.guard(150, "ks.events", ClientContext::User);
//! warnings.record(&guardrails.tables, outcome).unwrap();
//! assert_eq!(warnings.len(), 1);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod guardrail;
pub mod ordered_set;
pub mod outcome;
pub mod source;
pub mod warnings;

// Guardrail kinds
pub mod disable_flag;
pub mod threshold;
pub mod values;

pub mod registry;

// Re-exports
pub use client::ClientContext;
pub use config::{ConsistencyLevel, GuardrailsConfig, ThresholdConfig, ValuesConfig, DISABLED};
pub use error::{GuardrailError, Result};
pub use guardrail::{Guardrail, Supplier};
pub use ordered_set::OrderedSet;
pub use outcome::Outcome;
pub use source::ConfigSource;
pub use warnings::ClientWarnings;

pub use disable_flag::DisableFlag;
pub use registry::Guardrails;
pub use threshold::{MessageFormatter, Threshold};
pub use values::Values;
