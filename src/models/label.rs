use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GazeError, Result};

/// Behavioural category assigned to a sample or event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Placeholder before any classifier has run.
    Unclassified,
    Fixation,
    Saccade,
    #[serde(rename = "PSO")]
    Pso,
    #[serde(rename = "Smooth Pursuit")]
    SmoothPursuit,
    Blink,
    /// Sample could not be assessed (no velocity, degenerate window, short event).
    Undefined,
}

impl Default for Label {
    fn default() -> Self {
        Label::Unclassified
    }
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Unclassified => "Unclassified",
            Label::Fixation => "Fixation",
            Label::Saccade => "Saccade",
            Label::Pso => "PSO",
            Label::SmoothPursuit => "Smooth Pursuit",
            Label::Blink => "Blink",
            Label::Undefined => "Undefined",
        }
    }

    /// Map an NSLR-HMM class code onto the label set.
    ///
    /// NSLR-HMM reports 1 = fixation, 2 = saccade, 3 = PSO, 4 = smooth pursuit.
    pub fn from_nslr_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Label::Fixation),
            2 => Ok(Label::Saccade),
            3 => Ok(Label::Pso),
            4 => Ok(Label::SmoothPursuit),
            other => Err(GazeError::invalid(format!(
                "unknown NSLR-HMM class code {}",
                other
            ))),
        }
    }

    /// Map a REMoDNaV event code onto the label set.
    ///
    /// Saccade and PSO sub-types (ISAC, HPSO, LPSO, IHPS, ILPS) collapse onto
    /// `Saccade` and `Pso`.
    pub fn from_remodnav_code(code: &str) -> Result<Self> {
        match code.trim() {
            "FIXA" => Ok(Label::Fixation),
            "SACC" | "ISAC" => Ok(Label::Saccade),
            "PURS" => Ok(Label::SmoothPursuit),
            "HPSO" | "LPSO" | "IHPS" | "ILPS" => Ok(Label::Pso),
            other => Err(GazeError::invalid(format!(
                "unknown REMoDNaV event code '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn remodnav_subtypes_collapse() {
        assert_eq!(Label::from_remodnav_code("ISAC").unwrap(), Label::Saccade);
        assert_eq!(Label::from_remodnav_code("ILPS").unwrap(), Label::Pso);
        assert_eq!(Label::from_remodnav_code("PURS").unwrap(), Label::SmoothPursuit);
        assert_matches!(
            Label::from_remodnav_code("BLNK"),
            Err(GazeError::InvalidInput(_))
        );
    }

    #[test]
    fn nslr_codes() {
        assert_eq!(Label::from_nslr_code(1).unwrap(), Label::Fixation);
        assert_eq!(Label::from_nslr_code(3).unwrap(), Label::Pso);
        assert!(Label::from_nslr_code(0).is_err());
    }

    #[test]
    fn serializes_with_display_names() {
        let json = serde_json::to_string(&vec![Label::Pso, Label::SmoothPursuit]).unwrap();
        assert_eq!(json, r#"["PSO","Smooth Pursuit"]"#);
        assert_eq!(Label::Pso.to_string(), "PSO");
    }
}
