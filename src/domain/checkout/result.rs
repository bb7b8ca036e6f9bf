//! What an invocation hands back to the mobile client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which payment provider a deployment talks to.
///
/// The two variants are alternatives; exactly one is active per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderVariant {
    /// Preference-based checkout (Mercado Pago).
    MercadoPago,
    /// Intent-based checkout (Stripe).
    Stripe,
}

impl ProviderVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderVariant::MercadoPago => "mercadopago",
            ProviderVariant::Stripe => "stripe",
        }
    }

    /// Name of the callable function the mobile client invokes.
    pub fn function_name(&self) -> &'static str {
        match self {
            ProviderVariant::MercadoPago => "createPaymentPreference",
            ProviderVariant::Stripe => "createPaymentIntent",
        }
    }
}

impl fmt::Display for ProviderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-issued handle the client uses to finish checkout on-device.
///
/// Serializes to exactly one of `{"preferenceId": ..}` or
/// `{"clientSecret": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentResult {
    Preference {
        #[serde(rename = "preferenceId")]
        preference_id: String,
    },
    ClientSecret {
        #[serde(rename = "clientSecret")]
        client_secret: String,
    },
}

impl PaymentResult {
    pub fn preference(id: impl Into<String>) -> Self {
        PaymentResult::Preference {
            preference_id: id.into(),
        }
    }

    pub fn client_secret(secret: impl Into<String>) -> Self {
        PaymentResult::ClientSecret {
            client_secret: secret.into(),
        }
    }

    /// The provider variant that produces this kind of result.
    pub fn variant(&self) -> ProviderVariant {
        match self {
            PaymentResult::Preference { .. } => ProviderVariant::MercadoPago,
            PaymentResult::ClientSecret { .. } => ProviderVariant::Stripe,
        }
    }
}

// Client secrets grant the holder the ability to confirm the charge.
impl fmt::Display for PaymentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentResult::Preference { preference_id } => {
                write!(f, "preference {}", preference_id)
            }
            PaymentResult::ClientSecret { .. } => f.write_str("client secret [REDACTED]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preference_serializes_to_single_field() {
        let value = serde_json::to_value(PaymentResult::preference("PREF-123")).unwrap();
        assert_eq!(value, json!({"preferenceId": "PREF-123"}));
    }

    #[test]
    fn client_secret_serializes_to_single_field() {
        let value = serde_json::to_value(PaymentResult::client_secret("secret_abc")).unwrap();
        assert_eq!(value, json!({"clientSecret": "secret_abc"}));
    }

    #[test]
    fn result_knows_its_variant() {
        assert_eq!(
            PaymentResult::preference("p").variant(),
            ProviderVariant::MercadoPago
        );
        assert_eq!(
            PaymentResult::client_secret("s").variant(),
            ProviderVariant::Stripe
        );
    }

    #[test]
    fn display_redacts_client_secret() {
        let shown = PaymentResult::client_secret("pi_1_secret_xyz").to_string();
        assert!(!shown.contains("pi_1_secret_xyz"));
    }

    #[test]
    fn provider_variant_deserializes_lowercase() {
        let variant: ProviderVariant = serde_json::from_str(r#""stripe""#).unwrap();
        assert_eq!(variant, ProviderVariant::Stripe);
        let variant: ProviderVariant = serde_json::from_str(r#""mercadopago""#).unwrap();
        assert_eq!(variant, ProviderVariant::MercadoPago);

        for unknown in [r#""mercado_pago""#, r#""Stripe""#, r#""paypal""#] {
            assert!(serde_json::from_str::<ProviderVariant>(unknown).is_err());
        }
    }

    #[test]
    fn function_names_match_client_calls() {
        assert_eq!(
            ProviderVariant::MercadoPago.function_name(),
            "createPaymentPreference"
        );
        assert_eq!(ProviderVariant::Stripe.function_name(), "createPaymentIntent");
    }
}
