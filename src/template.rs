//! Template identifiers: which project kind to generate and for which build tool.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of project or artifact to generate.
///
/// The name doubles as the folder below the build flavor inside the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum TemplateKind {
    Activator,
    JspPortlet,
    MvcPortlet,
    Portlet,
    Service,
    ServiceBuilder,
    ServiceWrapper,
}

impl TemplateKind {
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Activator => "activator",
            TemplateKind::JspPortlet => "jspportlet",
            TemplateKind::MvcPortlet => "mvcportlet",
            TemplateKind::Portlet => "portlet",
            TemplateKind::Service => "service",
            TemplateKind::ServiceBuilder => "servicebuilder",
            TemplateKind::ServiceWrapper => "servicewrapper",
        }
    }

    /// Kinds whose generated class must end with `Portlet`.
    pub fn is_portlet(&self) -> bool {
        matches!(
            self,
            TemplateKind::Portlet | TemplateKind::JspPortlet | TemplateKind::ServiceBuilder
        )
    }

    /// Kinds that wrap or implement an existing service and need its name.
    pub fn requires_service(&self) -> bool {
        matches!(self, TemplateKind::Service | TemplateKind::ServiceWrapper)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build tooling of the generated project.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildFlavor {
    #[default]
    Gradle,
    Maven,
}

impl BuildFlavor {
    pub fn name(&self) -> &'static str {
        match self {
            BuildFlavor::Gradle => "gradle",
            BuildFlavor::Maven => "maven",
        }
    }
}

impl fmt::Display for BuildFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_value_names() {
        for kind in TemplateKind::value_variants() {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.name());
        }
    }

    #[test]
    fn test_portlet_kinds() {
        assert!(TemplateKind::Portlet.is_portlet());
        assert!(TemplateKind::JspPortlet.is_portlet());
        assert!(TemplateKind::ServiceBuilder.is_portlet());
        assert!(!TemplateKind::MvcPortlet.is_portlet());
        assert!(!TemplateKind::Service.is_portlet());
    }

    #[test]
    fn test_default_build_flavor() {
        assert_eq!(BuildFlavor::default(), BuildFlavor::Gradle);
        assert_eq!(BuildFlavor::Maven.to_string(), "maven");
    }
}
