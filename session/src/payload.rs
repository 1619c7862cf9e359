//! Tier-specific submission payloads.
//!
//! The payload is a tagged union keyed on the tier, so the coordinator
//! matches it exhaustively and a payload can never be submitted against
//! the wrong tier without that being a visible, typed error.

use serde::{Deserialize, Serialize};

use veriflow_types::VerificationLevel;

/// Data collected by one tier's form, tagged with the tier it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "data", rename_all = "lowercase")]
pub enum VerificationPayload {
    Basic(BasicData),
    Standard(StandardData),
    Advanced(AdvancedData),
    Enhanced(EnhancedData),
}

impl VerificationPayload {
    /// The tier this payload belongs to.
    pub fn level(&self) -> VerificationLevel {
        match self {
            VerificationPayload::Basic(_) => VerificationLevel::Basic,
            VerificationPayload::Standard(_) => VerificationLevel::Standard,
            VerificationPayload::Advanced(_) => VerificationLevel::Advanced,
            VerificationPayload::Enhanced(_) => VerificationLevel::Enhanced,
        }
    }
}

/// Entry-tier personal details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicData {
    pub full_name: String,
    pub date_of_birth: String,
    pub country: String,
}

/// Identity document details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardData {
    pub document_type: String,
    pub document_number: String,
    /// References to captured document images, opaque to this core.
    pub document_images: Vec<String>,
}

/// Proof of address and source of funds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedData {
    pub proof_of_address: String,
    pub source_of_funds: String,
}

/// Enhanced due diligence material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedData {
    pub enhanced_due_diligence: String,
    pub references: Vec<String>,
}

/// User consent collected alongside a submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    pub consent_given: bool,
    pub terms_accepted: bool,
}

impl Consent {
    /// Both boxes ticked.
    pub fn is_complete(&self) -> bool {
        self.consent_given && self.terms_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_reports_its_tier() {
        let p = VerificationPayload::Standard(StandardData {
            document_type: "passport".into(),
            document_number: "X123".into(),
            document_images: vec!["img-1".into()],
        });
        assert_eq!(p.level(), VerificationLevel::Standard);
    }

    #[test]
    fn wire_shape_is_level_plus_data() {
        let p = VerificationPayload::Basic(BasicData {
            full_name: "Ada Lovelace".into(),
            date_of_birth: "1815-12-10".into(),
            country: "GB".into(),
        });
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["level"], "basic");
        assert_eq!(json["data"]["country"], "GB");

        let back: VerificationPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn consent_requires_both_flags() {
        assert!(!Consent::default().is_complete());
        assert!(!Consent {
            consent_given: true,
            terms_accepted: false
        }
        .is_complete());
        assert!(Consent {
            consent_given: true,
            terms_accepted: true
        }
        .is_complete());
    }
}
