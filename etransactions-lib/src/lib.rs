//! e-Transactions payment request library.
//!
//! Builds the signed parameter set posted to the e-Transactions (Paybox)
//! hosted payment page: validated field values, the canonical ordered
//! string, its HMAC signature, and the hidden form inputs that carry them.
//!
//! The crate does no I/O. Rendering a page around the inputs, redirecting
//! the customer and handling the gateway callback are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use etransactions_lib::TransactionData;
//! use serde_json::json;
//!
//! let transaction = TransactionData::from_data(&json!({
//!     "total": 10.0,
//!     "rang": 7,
//!     "site": 1234567,
//!     "id": 123,
//!     "devise": "EUR",
//!     "command": "some-customer-id",
//!     "hash": "SHA512",
//!     "holder": "this-is-me@somewhere.tld",
//!     "time": 1600424772,
//!     "feedback": "Mt:M",
//!     "secret": "123456789aef",
//! }))?;
//!
//! assert!(transaction
//!     .to_serialized_string()
//!     .starts_with("PBX_SITE=1234567&PBX_RANG=007&PBX_IDENTIFIANT=123"));
//!
//! let form = transaction.to_form()?;
//! assert!(form.ends_with("\">"));
//! # Ok::<(), etransactions_lib::EtransactionsError>(())
//! ```
//!
//! # Features
//!
//! - `tracing`: spans on the factory, signing and form rendering, and
//!   `debug` events on rejected values. The secret is never recorded.

pub mod config;
pub mod errors;
pub mod feedback;
pub mod form;
pub mod input;
pub mod parameters;
pub mod prelude;
pub mod signer;
pub mod transaction;
pub mod values;

pub use config::{
    Clock, FixedClock, GatewayConfig, GatewayEnvironment, SystemClock, TransactionDefaults,
};
pub use errors::{
    ErrorCode, EtransactionsError, MissingFieldsError, ValueError, ValueErrorKind,
};
pub use feedback::FeedbackResponse;
pub use form::FormField;
pub use parameters::ParameterConstructor;
pub use signer::HmacValue;
pub use transaction::{TransactionCallbacks, TransactionData};
pub use values::{
    CommandValue, Devise, DeviseValue, FeedbackValue, HashAlgorithm, HashValue, HolderValue,
    IdValue, RangValue, SecretValue, SiteValue, TimeValue, TotalValue, UrlKind, UrlValue,
    WireValue,
};

/// Common result alias for request building.
pub type Result<T> = std::result::Result<T, EtransactionsError>;
