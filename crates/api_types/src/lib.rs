use serde::{Deserialize, Serialize};

/// Helpers for signals bound to `<input>` elements, which reach the server
/// either as JSON numbers or as the raw text the user typed.
mod lenient {
    use std::{fmt::Display, str::FromStr};

    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    /// Accept a number, a numeric string or `null`.
    ///
    /// An empty string means the user cleared the input and maps to the
    /// type's default.
    pub fn number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr + Default,
        T::Err: Display,
    {
        match Option::<Raw<T>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(value)) => Ok(Some(value)),
            Some(Raw::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(Some(T::default()));
                }
                text.parse()
                    .map(Some)
                    .map_err(|err| D::Error::custom(format!("invalid number {text:?}: {err}")))
            }
        }
    }
}

pub mod form {
    use super::*;

    /// Signals the browser sends with a validation request.
    ///
    /// Every field is optional: only the fields present overwrite the stored
    /// form. Unknown signals (error messages, UI flags) are ignored.
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomerSignals {
        pub name: Option<String>,
        pub gstin: Option<String>,
        /// Tax rate in percent.
        #[serde(default, deserialize_with = "lenient::number")]
        pub gst: Option<f64>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub phone_ext: Option<String>,
        pub remark: Option<String>,
        pub shop_no: Option<String>,
        pub line1: Option<String>,
        pub line2: Option<String>,
        pub line3: Option<String>,
        pub city: Option<String>,
        pub state: Option<String>,
        #[serde(default, deserialize_with = "lenient::number")]
        pub postal_code: Option<u32>,
        /// Line items. When present, replaces the stored list as a whole.
        pub products: Option<Vec<ProductSignals>>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductSignals {
        #[serde(default, deserialize_with = "lenient::number")]
        pub quantity: Option<i64>,
        #[serde(default, deserialize_with = "lenient::number")]
        pub sell_price: Option<f64>,
        #[serde(default, deserialize_with = "lenient::number")]
        pub discount: Option<f64>,
        pub serial_number: Option<String>,
        pub product_name: Option<String>,
        pub hsn: Option<String>,
    }
}

pub mod signals {
    use serde::ser::SerializeMap;

    use super::*;

    /// Partial client state carrying one field's validation outcome.
    ///
    /// Serializes to `{"hasError": bool, "<errorKey>": "<reason>"}`. A valid
    /// outcome sends `false` and an empty reason so the client clears any
    /// message it still shows. Keys in `cleared` are sent as `""` after the
    /// field's own key.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SignalsPatch {
        pub has_error: bool,
        pub error_key: String,
        pub error: String,
        pub cleared: Vec<String>,
    }

    impl SignalsPatch {
        pub fn valid(error_key: impl Into<String>) -> Self {
            Self {
                has_error: false,
                error_key: error_key.into(),
                error: String::new(),
                cleared: Vec::new(),
            }
        }

        pub fn invalid(error_key: impl Into<String>, reason: impl Into<String>) -> Self {
            Self {
                has_error: true,
                error_key: error_key.into(),
                error: reason.into(),
                cleared: Vec::new(),
            }
        }

        /// Also send an empty reason for each of `keys`.
        pub fn clearing<I, K>(mut self, keys: I) -> Self
        where
            I: IntoIterator<Item = K>,
            K: Into<String>,
        {
            self.cleared.extend(keys.into_iter().map(Into::into));
            self
        }
    }

    impl Serialize for SignalsPatch {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            let mut map = serializer.serialize_map(Some(2 + self.cleared.len()))?;
            map.serialize_entry("hasError", &self.has_error)?;
            map.serialize_entry(&self.error_key, &self.error)?;
            for key in &self.cleared {
                map.serialize_entry(key, "")?;
            }
            map.end()
        }
    }
}

pub mod state {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StateView {
        pub name: String,
        pub min_code: u32,
        pub max_code: u32,
        pub cities: Vec<String>,
    }

    /// Response body for listing states, sorted by name.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StateList {
        pub states: Vec<StateView>,
    }
}
