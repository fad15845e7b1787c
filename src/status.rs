use serde::Serialize;

/// Display category derived from a bill's free-text status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Introduced,
    Committee,
    Passed,
    Enacted,
}

impl StatusCategory {
    /// Classify a status string. First match wins; unknown statuses read as introduced.
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("introduced") {
            StatusCategory::Introduced
        } else if status.contains("committee") {
            StatusCategory::Committee
        } else if status.contains("passed") {
            StatusCategory::Passed
        } else if status.contains("enacted") || status.contains("signed") {
            StatusCategory::Enacted
        } else {
            StatusCategory::Introduced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Introduced => "introduced",
            StatusCategory::Committee => "committee",
            StatusCategory::Passed => "passed",
            StatusCategory::Enacted => "enacted",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusCategory::Introduced => "status-introduced",
            StatusCategory::Committee => "status-committee",
            StatusCategory::Passed => "status-passed",
            StatusCategory::Enacted => "status-enacted",
        }
    }
}

/// Words that mark a bill as no longer moving
const INACTIVE_MARKERS: &[&str] = &["enacted", "vetoed", "failed"];

/// Whether a status describes a bill still in play.
///
/// `dead` only counts as inactive when tracking several jurisdictions.
pub fn is_active(status: &str, multi_jurisdiction: bool) -> bool {
    let status = status.to_lowercase();
    let finished = INACTIVE_MARKERS.iter().any(|m| status.contains(m))
        || (multi_jurisdiction && status.contains("dead"));
    !finished
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_statuses() {
        assert_eq!(StatusCategory::classify("Introduced in Senate"), StatusCategory::Introduced);
        assert_eq!(StatusCategory::classify("In Committee Review"), StatusCategory::Committee);
        assert_eq!(StatusCategory::classify("Signed by Governor"), StatusCategory::Enacted);
        assert_eq!(StatusCategory::classify("PASSED HOUSE"), StatusCategory::Passed);
        assert_eq!(StatusCategory::classify("Enacted"), StatusCategory::Enacted);
    }

    #[test]
    fn first_match_wins() {
        // "introduced" outranks "committee"
        assert_eq!(
            StatusCategory::classify("Introduced and referred to committee"),
            StatusCategory::Introduced
        );
        assert_eq!(
            StatusCategory::classify("Passed committee"),
            StatusCategory::Committee
        );
    }

    #[test]
    fn unknown_status_defaults_to_introduced() {
        assert_eq!(StatusCategory::classify("Vetoed"), StatusCategory::Introduced);
        assert_eq!(StatusCategory::classify(""), StatusCategory::Introduced);
        assert_eq!(StatusCategory::Introduced.css_class(), "status-introduced");
    }

    #[test]
    fn dead_is_inactive_only_for_multi_jurisdiction() {
        assert!(is_active("Dead", false));
        assert!(!is_active("Dead", true));
        assert!(!is_active("Vetoed by Governor", false));
        assert!(is_active("Passed House", true));
    }
}
