//! Prelude module for convenient imports.
//!
//! ```rust
//! use etransactions_lib::prelude::*;
//! ```

// Container and output
pub use crate::form::FormField;
pub use crate::parameters::ParameterConstructor;
pub use crate::signer::HmacValue;
pub use crate::transaction::{TransactionCallbacks, TransactionData};

// Field values
pub use crate::values::{
    CommandValue, Devise, DeviseValue, FeedbackValue, HashAlgorithm, HashValue, HolderValue,
    IdValue, RangValue, SecretValue, SiteValue, TimeValue, TotalValue, UrlKind, UrlValue,
    WireValue,
};

// Configuration
pub use crate::config::{GatewayConfig, GatewayEnvironment, TransactionDefaults};

// Error handling
pub use crate::errors::{EtransactionsError, ErrorCode, ValueError};
pub use crate::Result;

// Gateway feedback
pub use crate::feedback::FeedbackResponse;
