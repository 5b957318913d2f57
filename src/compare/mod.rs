//! Cross-backend response comparison
//!
//! Three independent checks. Status and structure are hard gates and return an
//! error on mismatch; latency only ever logs a warning.

pub mod json;
pub mod xml;

use log::{error, info, warn};

use crate::api::CapturedResponse;
use crate::error::{ParityError, Result, Side};

pub use json::compare_json_keys;
pub use xml::child_tag_names;

/// Which structural path a passing comparison took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralMatch {
    JsonKeys,
    XmlTags,
    RawText,
}

/// Result of the soft latency check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyCheck {
    pub legacy_secs: f64,
    pub gateway_secs: f64,
    pub difference: f64,
    pub threshold: f64,
    pub within_threshold: bool,
}

/// Status codes must be equal
pub fn check_status(legacy: &CapturedResponse, gateway: &CapturedResponse) -> Result<()> {
    if legacy.status() == gateway.status() {
        info!("✅ Status code check passed: {}", legacy.status());
        Ok(())
    } else {
        error!(
            "❌ Status code mismatch: legacy={}, gateway={}",
            legacy.status(),
            gateway.status()
        );
        Err(ParityError::StatusMismatch {
            legacy: legacy.status(),
            gateway: gateway.status(),
        })
    }
}

/// Compare elapsed times against `threshold` seconds; a breach is logged, never returned
pub fn check_latency(legacy_secs: f64, gateway_secs: f64, threshold: f64) -> LatencyCheck {
    let difference = (legacy_secs - gateway_secs).abs();
    let within_threshold = difference <= threshold;

    if within_threshold {
        info!(
            "✅ Response time within threshold: legacy={:.3}s, gateway={:.3}s",
            legacy_secs, gateway_secs
        );
    } else {
        warn!(
            "⚠️ Response time difference > {}s: legacy={:.3}s, gateway={:.3}s",
            threshold, legacy_secs, gateway_secs
        );
    }

    LatencyCheck {
        legacy_secs,
        gateway_secs,
        difference,
        threshold,
        within_threshold,
    }
}

/// Compare response shape
///
/// JSON objects on both sides compare by top-level keys. Otherwise an `xml`
/// content type on the legacy response compares root child tags. Anything
/// else compares trimmed bodies verbatim.
pub fn check_structure(legacy: &CapturedResponse, gateway: &CapturedResponse) -> Result<StructuralMatch> {
    if let (Some(a), Some(b)) = (legacy.json_object(), gateway.json_object()) {
        if compare_json_keys(&a, &b) {
            info!("✅ JSON schema validation passed");
            return Ok(StructuralMatch::JsonKeys);
        }
        let err = ParityError::JsonKeyMismatch {
            legacy: json::top_level_keys(&a).into_iter().collect(),
            gateway: json::top_level_keys(&b).into_iter().collect(),
        };
        error!("❌ {}", err);
        return Err(err);
    }

    if legacy.content_type().contains("xml") {
        let legacy_tags = child_tag_names(legacy.text()).map_err(|e| malformed(Side::Legacy, e))?;
        let gateway_tags = child_tag_names(gateway.text()).map_err(|e| malformed(Side::Gateway, e))?;
        if legacy_tags == gateway_tags {
            info!("✅ XML schema validation passed");
            return Ok(StructuralMatch::XmlTags);
        }
        let err = ParityError::XmlTagMismatch {
            legacy: legacy_tags.into_iter().collect(),
            gateway: gateway_tags.into_iter().collect(),
        };
        error!("❌ {}", err);
        return Err(err);
    }

    let legacy_text = legacy.text().trim();
    let gateway_text = gateway.text().trim();
    if legacy_text == gateway_text {
        info!("✅ Raw text validation passed");
        Ok(StructuralMatch::RawText)
    } else {
        let err = ParityError::TextMismatch {
            legacy: legacy_text.to_string(),
            gateway: gateway_text.to_string(),
        };
        error!("❌ {}", err);
        Err(err)
    }
}

fn malformed(side: Side, err: roxmltree::Error) -> ParityError {
    let err = ParityError::MalformedXml {
        side,
        reason: err.to_string(),
    };
    error!("❌ {}", err);
    err
}
