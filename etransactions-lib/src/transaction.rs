//! Transaction container.
//!
//! [`TransactionData`] holds one optional slot per gateway field. It is
//! built empty and filled through setters, or built in one go from a raw
//! JSON mapping with [`TransactionData::from_data`]. Output (serialized
//! string, signature, rendered fields) is recomputed on every call.

use crate::config::{ResolvedOptions, TransactionDefaults};
use crate::errors::{EtransactionsError, MissingFieldsError};
use crate::form::{render_hidden_inputs, FormField};
use crate::input::{self, OptionalInput, RequiredFields, REQUIRED_KEYS};
use crate::parameters::ParameterConstructor;
use crate::signer::HmacValue;
use crate::values::{
    CommandValue, DeviseValue, FeedbackValue, HashValue, HolderValue, IdValue, RangValue,
    SecretValue, SiteValue, TimeValue, TotalValue, UrlKind, UrlValue, WireValue,
};
use crate::Result;
use serde_json::{Map, Value};
use std::fmt;

/// Zero to three return URLs, one per [`UrlKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionCallbacks {
    done: Option<UrlValue>,
    denied: Option<UrlValue>,
    canceled: Option<UrlValue>,
}

impl TransactionCallbacks {
    /// Stores `url` in the slot of its kind, replacing any previous one.
    pub fn set(&mut self, url: UrlValue) {
        let kind = url.kind();
        *self.slot_mut(kind) = Some(url);
    }

    pub fn remove(&mut self, kind: UrlKind) -> Option<UrlValue> {
        self.slot_mut(kind).take()
    }

    pub fn get(&self, kind: UrlKind) -> Option<&UrlValue> {
        match kind {
            UrlKind::Done => self.done.as_ref(),
            UrlKind::Denied => self.denied.as_ref(),
            UrlKind::Canceled => self.canceled.as_ref(),
        }
    }

    /// Present URLs in render order: done, denied, canceled.
    pub fn iter(&self) -> impl Iterator<Item = &UrlValue> {
        UrlKind::ALL.into_iter().filter_map(move |kind| self.get(kind))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut(&mut self, kind: UrlKind) -> &mut Option<UrlValue> {
        match kind {
            UrlKind::Done => &mut self.done,
            UrlKind::Denied => &mut self.denied,
            UrlKind::Canceled => &mut self.canceled,
        }
    }
}

/// Every field of one payment request.
#[derive(Debug, Clone, Default)]
pub struct TransactionData {
    total: Option<TotalValue>,
    site: Option<SiteValue>,
    rang: Option<RangValue>,
    id: Option<IdValue>,
    devise: Option<DeviseValue>,
    command: Option<CommandValue>,
    hash: Option<HashValue>,
    holder: Option<HolderValue>,
    time: Option<TimeValue>,
    feedback: Option<FeedbackValue>,
    secret: Option<SecretValue>,
    callbacks: TransactionCallbacks,
}

impl TransactionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a complete container from a raw mapping, with the default
    /// currency, hash algorithm and clock.
    ///
    /// ```rust
    /// use etransactions_lib::TransactionData;
    /// use serde_json::json;
    ///
    /// let transaction = TransactionData::from_data(&json!({
    ///     "total": 10.0,
    ///     "rang": 7,
    ///     "site": 1234567,
    ///     "id": 123,
    ///     "command": "some-customer-id",
    ///     "holder": "this-is-me@somewhere.tld",
    ///     "secret": "123456789aef",
    /// }))
    /// .unwrap();
    /// assert!(transaction.is_valid());
    /// ```
    pub fn from_data(data: &Value) -> Result<Self> {
        Self::from_data_with(data, &TransactionDefaults::default())
    }

    /// Like [`from_data`](Self::from_data), resolving optional inputs
    /// through `defaults`.
    ///
    /// All missing required keys are reported together. Then the first
    /// rejected value aborts the call.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(data, defaults)))]
    pub fn from_data_with(data: &Value, defaults: &TransactionDefaults) -> Result<Self> {
        let Some(map) = data.as_object() else {
            return Err(MissingFieldsError {
                missing: REQUIRED_KEYS.to_vec(),
            }
            .into());
        };
        input::check_required_keys(map)?;

        let required = RequiredFields::from_map(map)?;
        let options = defaults.resolve(&OptionalInput::from_map(map))?;
        let transaction = Self::from_parts(required, options);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            site = ?transaction.site.as_ref().map(|s| s.value()),
            callbacks = transaction.callbacks.len(),
            "transaction data built"
        );

        Ok(transaction)
    }

    pub fn from_parts(required: RequiredFields, options: ResolvedOptions) -> Self {
        Self {
            total: Some(required.total),
            site: Some(required.site),
            rang: Some(required.rang),
            id: Some(required.id),
            devise: Some(options.devise),
            command: Some(required.command),
            hash: Some(options.hash),
            holder: Some(required.holder),
            time: Some(options.time),
            feedback: Some(options.feedback),
            secret: Some(required.secret),
            callbacks: options.callbacks,
        }
    }

    pub fn missing_required_keys(data: &Map<String, Value>) -> Vec<&'static str> {
        input::missing_required_keys(data)
    }

    pub fn are_required_keys_present(data: &Map<String, Value>) -> bool {
        input::are_required_keys_present(data)
    }

    pub fn set_total(&mut self, total: TotalValue) -> &mut Self {
        self.total = Some(total);
        self
    }

    pub fn total(&self) -> Option<&TotalValue> {
        self.total.as_ref()
    }

    pub fn set_site(&mut self, site: SiteValue) -> &mut Self {
        self.site = Some(site);
        self
    }

    pub fn site(&self) -> Option<&SiteValue> {
        self.site.as_ref()
    }

    pub fn set_rang(&mut self, rang: RangValue) -> &mut Self {
        self.rang = Some(rang);
        self
    }

    pub fn rang(&self) -> Option<&RangValue> {
        self.rang.as_ref()
    }

    pub fn set_id(&mut self, id: IdValue) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<&IdValue> {
        self.id.as_ref()
    }

    pub fn set_devise(&mut self, devise: DeviseValue) -> &mut Self {
        self.devise = Some(devise);
        self
    }

    pub fn devise(&self) -> Option<&DeviseValue> {
        self.devise.as_ref()
    }

    pub fn set_command(&mut self, command: CommandValue) -> &mut Self {
        self.command = Some(command);
        self
    }

    pub fn command(&self) -> Option<&CommandValue> {
        self.command.as_ref()
    }

    pub fn set_hash(&mut self, hash: HashValue) -> &mut Self {
        self.hash = Some(hash);
        self
    }

    pub fn hash(&self) -> Option<&HashValue> {
        self.hash.as_ref()
    }

    pub fn set_holder(&mut self, holder: HolderValue) -> &mut Self {
        self.holder = Some(holder);
        self
    }

    pub fn holder(&self) -> Option<&HolderValue> {
        self.holder.as_ref()
    }

    pub fn set_time(&mut self, time: TimeValue) -> &mut Self {
        self.time = Some(time);
        self
    }

    pub fn time(&self) -> Option<&TimeValue> {
        self.time.as_ref()
    }

    pub fn set_feedback(&mut self, feedback: FeedbackValue) -> &mut Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn feedback(&self) -> Option<&FeedbackValue> {
        self.feedback.as_ref()
    }

    pub fn set_secret(&mut self, secret: SecretValue) -> &mut Self {
        self.secret = Some(secret);
        self
    }

    pub fn secret(&self) -> Option<&SecretValue> {
        self.secret.as_ref()
    }

    pub fn set_callback(&mut self, url: UrlValue) -> &mut Self {
        self.callbacks.set(url);
        self
    }

    pub fn callbacks(&self) -> &TransactionCallbacks {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut TransactionCallbacks {
        &mut self.callbacks
    }

    /// True when site, rang, id, devise, command, feedback, total, hash and
    /// time are set. Secret, holder and callbacks are not checked.
    pub fn is_valid(&self) -> bool {
        self.site.is_some()
            && self.rang.is_some()
            && self.id.is_some()
            && self.devise.is_some()
            && self.command.is_some()
            && self.feedback.is_some()
            && self.total.is_some()
            && self.hash.is_some()
            && self.time.is_some()
    }

    /// Input keys of the fields signing needs that are still unset.
    pub fn unset_fields(&self) -> Vec<&'static str> {
        let slots = [
            ("site", self.site.is_some()),
            ("rang", self.rang.is_some()),
            ("id", self.id.is_some()),
            ("devise", self.devise.is_some()),
            ("command", self.command.is_some()),
            ("feedback", self.feedback.is_some()),
            ("holder", self.holder.is_some()),
            ("total", self.total.is_some()),
            ("hash", self.hash.is_some()),
            ("secret", self.secret.is_some()),
        ];
        slots
            .into_iter()
            .filter(|(_, set)| !set)
            .map(|(key, _)| key)
            .collect()
    }

    /// The canonical `&`-joined string the signature covers.
    pub fn to_serialized_string(&self) -> String {
        ParameterConstructor::new(self).serialize()
    }

    /// Rendered fields without the signature: the signed core fields, then
    /// `PBX_TIME`, then the present callbacks.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields: Vec<FormField> = ParameterConstructor::new(self)
            .values()
            .into_iter()
            .map(|value| value.to_field())
            .collect();
        if let Some(time) = &self.time {
            fields.push(time.to_field());
        }
        fields.extend(self.callbacks.iter().map(|url| url.to_field()));
        fields
    }

    /// Signature over [`to_serialized_string`](Self::to_serialized_string).
    ///
    /// Fails with [`EtransactionsError::Incomplete`] unless every signed
    /// field and the secret are set.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn sign(&self) -> Result<HmacValue> {
        let unset = self.unset_fields();
        let (Some(secret), Some(hash), true) = (&self.secret, &self.hash, unset.is_empty()) else {
            return Err(EtransactionsError::Incomplete(unset));
        };
        HmacValue::compute(secret, &self.to_serialized_string(), hash)
    }

    /// [`fields`](Self::fields) followed by `PBX_HMAC`.
    pub fn to_signed_fields(&self) -> Result<Vec<FormField>> {
        let signature = self.sign()?;
        let mut fields = self.fields();
        fields.push(signature.to_field());
        Ok(fields)
    }

    /// Hidden inputs for [`to_signed_fields`](Self::to_signed_fields).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn to_form(&self) -> Result<String> {
        let fields = self.to_signed_fields()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(fields = fields.len(), "rendered payment form");
        Ok(render_hidden_inputs(&fields))
    }
}

impl fmt::Display for TransactionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_serialized_string())
    }
}
