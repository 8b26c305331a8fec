//! Defaults and gateway configuration.
//!
//! Every default the factory applies (currency, hash algorithm, "now",
//! empty feedback template) is resolved here, in one place.
//!
//! # Environment Variables
//!
//! [`GatewayConfig::from_env`] reads:
//! - `ETRANSACTIONS_SITE` - merchant site number
//! - `ETRANSACTIONS_RANG` - rank (1 to 3 digits)
//! - `ETRANSACTIONS_ID` - merchant identifier
//! - `ETRANSACTIONS_SECRET` - HMAC key, hexadecimal
//! - `ETRANSACTIONS_ENV` - `production` or `preproduction` (optional)
//! - `ETRANSACTIONS_DEVISE` - default currency, e.g. `EUR` or `978` (optional)
//! - `ETRANSACTIONS_HASH` - default algorithm, e.g. `SHA512` (optional)

use crate::errors::{EtransactionsError, ValueError, ValueErrorKind};
use crate::transaction::{TransactionCallbacks, TransactionData};
use crate::values::{
    json_type, raw_integer, CommandValue, Devise, DeviseValue, FeedbackValue, HashAlgorithm,
    HashValue, HolderValue, IdValue, RangValue, SecretValue, SiteValue, TimeValue, TotalValue,
    UrlKind, UrlValue,
};
use crate::input::OptionalInput;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Source of the current time.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a unix timestamp. Out-of-range values read as the epoch.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

/// Optional fields after defaults were applied.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub devise: DeviseValue,
    pub hash: HashValue,
    pub time: TimeValue,
    pub feedback: FeedbackValue,
    pub callbacks: TransactionCallbacks,
}

/// Defaults applied to optional inputs.
#[derive(Debug, Clone)]
pub struct TransactionDefaults {
    pub devise: Devise,
    pub hash: HashAlgorithm,
    clock: Arc<dyn Clock>,
}

impl Default for TransactionDefaults {
    fn default() -> Self {
        Self {
            devise: Devise::default(),
            hash: HashAlgorithm::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl TransactionDefaults {
    pub fn new(devise: Devise, hash: HashAlgorithm) -> Self {
        Self {
            devise,
            hash,
            ..Self::default()
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_devise(mut self, devise: Devise) -> Self {
        self.devise = devise;
        self
    }

    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn now(&self) -> TimeValue {
        TimeValue::from_datetime(self.clock.now())
    }

    pub fn resolve_devise(&self, raw: Option<&Value>) -> std::result::Result<DeviseValue, ValueError> {
        match present(raw) {
            Some(raw) => DeviseValue::from_raw(raw),
            None => Ok(DeviseValue::new(self.devise)),
        }
    }

    pub fn resolve_hash(&self, raw: Option<&Value>) -> std::result::Result<HashValue, ValueError> {
        match present(raw) {
            Some(raw) => HashValue::from_raw(raw),
            None => Ok(HashValue::new(self.hash)),
        }
    }

    /// Absent, `null` or `0` mean "now".
    pub fn resolve_time(&self, raw: Option<&Value>) -> std::result::Result<TimeValue, ValueError> {
        let Some(raw) = present(raw) else {
            return Ok(self.now());
        };
        match raw_integer("time", raw)? {
            0 => Ok(self.now()),
            secs => TimeValue::from_timestamp(secs),
        }
    }

    pub fn resolve_feedback(
        &self,
        raw: Option<&Value>,
    ) -> std::result::Result<FeedbackValue, ValueError> {
        match present(raw) {
            Some(raw) => FeedbackValue::from_raw(raw),
            None => Ok(FeedbackValue::default()),
        }
    }

    /// `callbacks` must be an object; its `done`, `denied` and `canceled`
    /// entries are optional and other keys are ignored.
    pub fn resolve_callbacks(
        &self,
        raw: Option<&Value>,
    ) -> std::result::Result<TransactionCallbacks, ValueError> {
        let mut callbacks = TransactionCallbacks::default();
        let Some(raw) = present(raw) else {
            return Ok(callbacks);
        };
        let map = raw.as_object().ok_or_else(|| {
            ValueError::new(
                "callbacks",
                ValueErrorKind::WrongType,
                format!("expected an object, got {}", json_type(raw)),
            )
        })?;
        for kind in UrlKind::ALL {
            if let Some(url) = present(map.get(kind.input_key())) {
                callbacks.set(UrlValue::from_raw(url, kind)?);
            }
        }
        Ok(callbacks)
    }

    /// Resolves every optional input, failing on the first invalid one.
    pub fn resolve(&self, input: &OptionalInput<'_>) -> std::result::Result<ResolvedOptions, ValueError> {
        Ok(ResolvedOptions {
            feedback: self.resolve_feedback(input.feedback)?,
            time: self.resolve_time(input.time)?,
            devise: self.resolve_devise(input.devise)?,
            hash: self.resolve_hash(input.hash)?,
            callbacks: self.resolve_callbacks(input.callbacks)?,
        })
    }
}

/// Explicit `null` counts as absent.
fn present(raw: Option<&Value>) -> Option<&Value> {
    raw.filter(|v| !v.is_null())
}

/// Which gateway platform receives the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    #[default]
    Production,
    /// Test platform, accepts test cards only.
    Preproduction,
}

impl GatewayEnvironment {
    /// Hosted payment page, the form action for the rendered fields.
    pub fn payment_url(&self) -> &'static str {
        match self {
            Self::Production => "https://tpeweb.e-transactions.fr/cgi/MYchoix_pagepaiement.cgi",
            Self::Preproduction => {
                "https://recette-tpeweb.e-transactions.fr/cgi/MYchoix_pagepaiement.cgi"
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Preproduction => "preproduction",
        }
    }
}

impl FromStr for GatewayEnvironment {
    type Err = EtransactionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "preproduction" | "preprod" | "test" => Ok(Self::Preproduction),
            other => Err(EtransactionsError::config(
                "ETRANSACTIONS_ENV",
                format!("unknown environment '{}'", other),
            )),
        }
    }
}

/// Merchant credentials and defaults.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub site: u64,
    pub rang: u16,
    pub id: u64,
    /// HMAC key, hexadecimal. Never serialized.
    #[serde(skip_serializing)]
    pub secret: String,
    #[serde(default)]
    pub environment: GatewayEnvironment,
    #[serde(default)]
    pub devise: Devise,
    #[serde(default)]
    pub hash: HashAlgorithm,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("site", &self.site)
            .field("rang", &self.rang)
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("devise", &self.devise)
            .field("hash", &self.hash)
            .finish()
    }
}

impl GatewayConfig {
    pub fn new(site: u64, rang: u16, id: u64, secret: impl Into<String>) -> Self {
        Self {
            site,
            rang,
            id,
            secret: secret.into(),
            environment: GatewayEnvironment::default(),
            devise: Devise::default(),
            hash: HashAlgorithm::default(),
        }
    }

    pub fn with_environment(mut self, environment: GatewayEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_devise(mut self, devise: Devise) -> Self {
        self.devise = devise;
        self
    }

    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    /// Loads the configuration from `ETRANSACTIONS_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| EtransactionsError::config(key, "not set"))
        };
        let site = parse_var("ETRANSACTIONS_SITE", &required("ETRANSACTIONS_SITE")?)?;
        let rang = parse_var("ETRANSACTIONS_RANG", &required("ETRANSACTIONS_RANG")?)?;
        let id = parse_var("ETRANSACTIONS_ID", &required("ETRANSACTIONS_ID")?)?;
        let secret = required("ETRANSACTIONS_SECRET")?;

        let mut config = Self::new(site, rang, id, secret);
        if let Some(env) = lookup("ETRANSACTIONS_ENV") {
            config.environment = env.parse()?;
        }
        if let Some(devise) = lookup("ETRANSACTIONS_DEVISE") {
            config.devise = devise
                .parse()
                .map_err(|e: ValueError| EtransactionsError::config("ETRANSACTIONS_DEVISE", e.to_string()))?;
        }
        if let Some(hash) = lookup("ETRANSACTIONS_HASH") {
            config.hash = hash
                .parse()
                .map_err(|e: ValueError| EtransactionsError::config("ETRANSACTIONS_HASH", e.to_string()))?;
        }
        Ok(config)
    }

    pub fn defaults(&self) -> TransactionDefaults {
        TransactionDefaults::new(self.devise, self.hash)
    }

    /// A container with the merchant fields and defaults filled in.
    ///
    /// Fails if any configured credential is invalid.
    pub fn transaction(
        &self,
        total: TotalValue,
        command: CommandValue,
        holder: HolderValue,
    ) -> Result<TransactionData> {
        self.transaction_with(total, command, holder, &self.defaults())
    }

    pub fn transaction_with(
        &self,
        total: TotalValue,
        command: CommandValue,
        holder: HolderValue,
        defaults: &TransactionDefaults,
    ) -> Result<TransactionData> {
        let mut transaction = TransactionData::new();
        transaction.set_site(SiteValue::new(self.site)?);
        transaction.set_rang(RangValue::new(self.rang)?);
        transaction.set_id(IdValue::new(self.id)?);
        transaction.set_secret(SecretValue::new(self.secret.as_str())?);
        transaction.set_devise(DeviseValue::new(defaults.devise));
        transaction.set_hash(HashValue::new(defaults.hash));
        transaction.set_time(defaults.now());
        transaction.set_feedback(FeedbackValue::default());
        transaction.set_total(total);
        transaction.set_command(command);
        transaction.set_holder(holder);
        Ok(transaction)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| EtransactionsError::config(key, e.to_string()))
}
