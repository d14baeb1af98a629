use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a content type supports, looked up by type instead of dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Sub-directory the type is written to inside a dumped pack
    pub folder: &'static str,
    /// Prefix of normalized file names ("script-Foo.yml")
    pub file_prefix: &'static str,
    /// Key under `contentItems` in metadata.json
    pub metadata_key: &'static str,
    /// Whether items of this type are written during a dump at all
    pub dumpable: bool,
    /// Whether the platform accepts the item on its own (outside a pack zip)
    pub individually_uploadable: bool,
    /// Platform endpoint for individual uploads
    pub upload_endpoint: Option<&'static str>,
}

/// Closed set of content types known to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentType {
    Integration,
    Script,
    Playbook,
    TestPlaybook,
    Classifier,
    Mapper,
    Dashboard,
    IncidentField,
    IncidentType,
    IndicatorField,
    IndicatorType,
    Layout,
    CaseLayout,
    CaseField,
    Report,
    Widget,
    Wizard,
    Job,
    List,
    PreProcessRule,
    ParsingRule,
    ModelingRule,
    CorrelationRule,
    #[serde(rename = "XSIAMDashboard")]
    XsiamDashboard,
    #[serde(rename = "XSIAMReport")]
    XsiamReport,
    Trigger,
    LayoutRule,
    Pack,
}

const fn uploadable(
    folder: &'static str,
    file_prefix: &'static str,
    metadata_key: &'static str,
    endpoint: &'static str,
) -> Capabilities {
    Capabilities {
        folder,
        file_prefix,
        metadata_key,
        dumpable: true,
        individually_uploadable: true,
        upload_endpoint: Some(endpoint),
    }
}

const fn bundle_only(
    folder: &'static str,
    file_prefix: &'static str,
    metadata_key: &'static str,
) -> Capabilities {
    Capabilities {
        folder,
        file_prefix,
        metadata_key,
        dumpable: true,
        individually_uploadable: false,
        upload_endpoint: None,
    }
}

impl ContentType {
    pub const ALL: [ContentType; 28] = [
        ContentType::Integration,
        ContentType::Script,
        ContentType::Playbook,
        ContentType::TestPlaybook,
        ContentType::Classifier,
        ContentType::Mapper,
        ContentType::Dashboard,
        ContentType::IncidentField,
        ContentType::IncidentType,
        ContentType::IndicatorField,
        ContentType::IndicatorType,
        ContentType::Layout,
        ContentType::CaseLayout,
        ContentType::CaseField,
        ContentType::Report,
        ContentType::Widget,
        ContentType::Wizard,
        ContentType::Job,
        ContentType::List,
        ContentType::PreProcessRule,
        ContentType::ParsingRule,
        ContentType::ModelingRule,
        ContentType::CorrelationRule,
        ContentType::XsiamDashboard,
        ContentType::XsiamReport,
        ContentType::Trigger,
        ContentType::LayoutRule,
        ContentType::Pack,
    ];

    pub fn capabilities(&self) -> Capabilities {
        match self {
            ContentType::Integration => uploadable(
                "Integrations",
                "integration",
                "integration",
                "/settings/integration-conf/upload",
            ),
            ContentType::Script => {
                uploadable("Scripts", "script", "automation", "/automation/import")
            }
            ContentType::Playbook => {
                uploadable("Playbooks", "playbook", "playbook", "/playbook/save/yaml")
            }
            ContentType::TestPlaybook => uploadable(
                "TestPlaybooks",
                "playbook",
                "testplaybook",
                "/playbook/save/yaml",
            ),
            ContentType::Classifier => {
                uploadable("Classifiers", "classifier", "classifier", "/classifier/import")
            }
            ContentType::Mapper => {
                uploadable("Classifiers", "classifier-mapper", "mapper", "/classifier/import")
            }
            ContentType::Dashboard => {
                uploadable("Dashboards", "dashboard", "dashboard", "/dashboards/import")
            }
            ContentType::IncidentField => uploadable(
                "IncidentFields",
                "incidentfield",
                "incidentfield",
                "/incidentfields/import",
            ),
            ContentType::IncidentType => uploadable(
                "IncidentTypes",
                "incidenttype",
                "incidenttype",
                "/incidenttype/import",
            ),
            ContentType::IndicatorField => uploadable(
                "IndicatorFields",
                "incidentfield-indicatorfield",
                "indicatorfield",
                "/indicatorfields/import",
            ),
            ContentType::IndicatorType => uploadable(
                "IndicatorTypes",
                "reputation",
                "reputation",
                "/reputation/import",
            ),
            ContentType::Layout => uploadable(
                "Layouts",
                "layoutscontainer",
                "layoutscontainer",
                "/layouts/import",
            ),
            ContentType::CaseLayout => uploadable(
                "CaseLayouts",
                "layoutscontainer",
                "caselayout",
                "/layouts/import",
            ),
            ContentType::CaseField => {
                uploadable("CaseFields", "casefield", "casefield", "/incidentfields/import")
            }
            ContentType::Report => uploadable("Reports", "report", "report", "/reports/upload"),
            ContentType::Widget => uploadable("Widgets", "widget", "widget", "/widgets/import"),
            ContentType::Wizard => uploadable("Wizards", "wizard", "wizard", "/wizards/import"),
            ContentType::Job => uploadable("Jobs", "job", "job", "/jobs/import"),
            ContentType::List => uploadable("Lists", "list", "list", "/lists/import"),
            ContentType::PreProcessRule => uploadable(
                "PreProcessRules",
                "preprocessrule",
                "preprocessrule",
                "/preprocess/rules/import",
            ),
            ContentType::ParsingRule => bundle_only("ParsingRules", "parsingrule", "parsingrule"),
            ContentType::ModelingRule => {
                bundle_only("ModelingRules", "modelingrule", "modelingrule")
            }
            ContentType::CorrelationRule => {
                bundle_only("CorrelationRules", "correlationrule", "correlationrule")
            }
            ContentType::XsiamDashboard => {
                bundle_only("XSIAMDashboards", "xsiamdashboard", "xsiamdashboard")
            }
            ContentType::XsiamReport => bundle_only("XSIAMReports", "xsiamreport", "xsiamreport"),
            ContentType::Trigger => bundle_only("Triggers", "trigger", "trigger"),
            ContentType::LayoutRule => bundle_only("LayoutRules", "layoutrule", "layoutrule"),
            ContentType::Pack => Capabilities {
                folder: "Packs",
                file_prefix: "pack",
                metadata_key: "pack",
                dumpable: false,
                individually_uploadable: false,
                upload_endpoint: None,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Integration => "Integration",
            ContentType::Script => "Script",
            ContentType::Playbook => "Playbook",
            ContentType::TestPlaybook => "TestPlaybook",
            ContentType::Classifier => "Classifier",
            ContentType::Mapper => "Mapper",
            ContentType::Dashboard => "Dashboard",
            ContentType::IncidentField => "IncidentField",
            ContentType::IncidentType => "IncidentType",
            ContentType::IndicatorField => "IndicatorField",
            ContentType::IndicatorType => "IndicatorType",
            ContentType::Layout => "Layout",
            ContentType::CaseLayout => "CaseLayout",
            ContentType::CaseField => "CaseField",
            ContentType::Report => "Report",
            ContentType::Widget => "Widget",
            ContentType::Wizard => "Wizard",
            ContentType::Job => "Job",
            ContentType::List => "List",
            ContentType::PreProcessRule => "PreProcessRule",
            ContentType::ParsingRule => "ParsingRule",
            ContentType::ModelingRule => "ModelingRule",
            ContentType::CorrelationRule => "CorrelationRule",
            ContentType::XsiamDashboard => "XSIAMDashboard",
            ContentType::XsiamReport => "XSIAMReport",
            ContentType::Trigger => "Trigger",
            ContentType::LayoutRule => "LayoutRule",
            ContentType::Pack => "Pack",
        }
    }

    /// Output folder inside a dumped pack
    ///
    /// The server stores case layouts with the regular layouts, so the
    /// `CaseLayouts` source folder is written as `Layouts`.
    pub fn output_folder(&self) -> &'static str {
        match self.capabilities().folder {
            "CaseLayouts" => "Layouts",
            folder => folder,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown content type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_round_trip_through_from_str() {
        for content_type in ContentType::ALL {
            assert_eq!(ContentType::from_str(content_type.as_str()).unwrap(), content_type);
        }
    }

    #[test]
    fn test_case_layouts_are_written_under_layouts() {
        assert_eq!(ContentType::CaseLayout.capabilities().folder, "CaseLayouts");
        assert_eq!(ContentType::CaseLayout.output_folder(), "Layouts");
        assert_eq!(ContentType::Layout.output_folder(), "Layouts");
    }

    #[test]
    fn test_xsiam_types_are_bundle_only() {
        for content_type in [
            ContentType::ParsingRule,
            ContentType::ModelingRule,
            ContentType::CorrelationRule,
            ContentType::XsiamDashboard,
            ContentType::XsiamReport,
            ContentType::Trigger,
            ContentType::LayoutRule,
        ] {
            let caps = content_type.capabilities();
            assert!(!caps.individually_uploadable, "{content_type}");
            assert!(caps.upload_endpoint.is_none());
            assert!(caps.dumpable);
        }
    }

    #[test]
    fn test_uploadable_types_have_endpoints() {
        for content_type in ContentType::ALL {
            let caps = content_type.capabilities();
            assert_eq!(caps.individually_uploadable, caps.upload_endpoint.is_some());
        }
    }

    #[test]
    fn test_pack_is_never_dumped_as_an_item() {
        assert!(!ContentType::Pack.capabilities().dumpable);
    }

    #[test]
    fn test_serde_names_for_xsiam_types() {
        let json = serde_json::to_string(&ContentType::XsiamDashboard).unwrap();
        assert_eq!(json, "\"XSIAMDashboard\"");
        let parsed: ContentType = serde_json::from_str("\"IncidentField\"").unwrap();
        assert_eq!(parsed, ContentType::IncidentField);
    }

    #[test]
    fn test_from_str_unknown() {
        assert!(ContentType::from_str("Spaceship").is_err());
    }
}
