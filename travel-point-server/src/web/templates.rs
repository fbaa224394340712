//! Askama templates for the web frontend.

use askama::Template;

use crate::reference::FacilityRecord;
use crate::resolver::{ERROR_MARKER, LookupResult, LookupStatus};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the address and facility forms.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub municipality: String,
    pub towns: Vec<String>,
    pub facilities: Vec<FacilityOption>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Lookup result fragment.
#[derive(Template)]
#[template(path = "lookup_result.html")]
pub struct LookupResultTemplate {
    pub result: LookupView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Facility entry in the picklist.
#[derive(Debug, Clone)]
pub struct FacilityOption {
    pub name: String,
    pub address: String,
}

impl FacilityOption {
    /// Create from a facility record.
    pub fn from_record(record: &FacilityRecord) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone(),
        }
    }
}

/// Lookup result view model for templates.
#[derive(Debug, Clone)]
pub struct LookupView {
    /// Travel point label, or the error message without its marker
    pub message: String,
    pub matched_town: String,
    pub matched_range_description: String,
    pub status: LookupStatus,
}

impl LookupView {
    /// Create from a lookup result.
    pub fn from_result(result: &LookupResult) -> Self {
        let message = result
            .point
            .strip_prefix(ERROR_MARKER)
            .unwrap_or(&result.point)
            .to_string();

        Self {
            message,
            matched_town: result.matched_town.clone(),
            matched_range_description: result.matched_range_description.clone(),
            status: result.status(),
        }
    }

    /// CSS class for the result box.
    pub fn css_class(&self) -> &'static str {
        match self.status {
            LookupStatus::Resolved => "ok",
            LookupStatus::Ambiguous => "ambiguous",
            LookupStatus::Failed => "error",
        }
    }

    /// Heading shown above the result.
    pub fn heading(&self) -> &'static str {
        match self.status {
            LookupStatus::Resolved => "旅費算定地点",
            LookupStatus::Ambiguous => "旅費算定地点（いずれか）",
            LookupStatus::Failed => "判定できません",
        }
    }

    /// Whether to show the matched town and range.
    pub fn has_match_details(&self) -> bool {
        !self.matched_town.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(point: &str, town: &str, range: &str) -> LookupResult {
        LookupResult {
            point: point.into(),
            matched_town: town.into(),
            matched_range_description: range.into(),
        }
    }

    #[test]
    fn resolved_view() {
        let view = LookupView::from_result(&result("本渡", "浄南町", "0〜5"));
        assert_eq!(view.message, "本渡");
        assert_eq!(view.css_class(), "ok");
        assert_eq!(view.heading(), "旅費算定地点");
        assert!(view.has_match_details());
    }

    #[test]
    fn ambiguous_view() {
        let view = LookupView::from_result(&result("本渡 or 佐伊津", "本渡町広瀬", "2080〜"));
        assert_eq!(view.message, "本渡 or 佐伊津");
        assert_eq!(view.css_class(), "ambiguous");
    }

    #[test]
    fn error_view_strips_marker() {
        let view = LookupView::from_result(&result("エラー: 町名「x」が見つかりません", "", ""));
        assert_eq!(view.message, "町名「x」が見つかりません");
        assert_eq!(view.css_class(), "error");
        assert!(!view.has_match_details());
    }

    #[test]
    fn render_fragment() {
        let template = LookupResultTemplate {
            result: LookupView::from_result(&result("佐伊津", "本渡町広瀬", "1470〜2080")),
        };
        let html = template.render().unwrap();
        assert!(html.contains("class=\"result ok\""));
        assert!(html.contains("佐伊津"));
        assert!(html.contains("1470〜2080"));
    }

    #[test]
    fn render_index() {
        let template = IndexTemplate {
            municipality: "天草市".into(),
            towns: vec!["浄南町".into()],
            facilities: vec![FacilityOption {
                name: "天草市役所".into(),
                address: "熊本県天草市東浜町8番1号".into(),
            }],
        };
        let html = template.render().unwrap();
        assert!(html.contains("浄南町"));
        assert!(html.contains("天草市役所"));
    }
}
