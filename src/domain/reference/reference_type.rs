use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::reference::error::ReferenceError;

/// Resource types that get their own reference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceType {
    Project,
    ProjectGroup,
    Provider,
    Region,
    Collector,
    Plugin,
    Secret,
    ServiceAccount,
    TrustedAccount,
    User,
    Webhook,
    Protocol,
    PublicDashboard,
    PrivateDashboard,
    CloudServiceType,
}

/// Static description of how one type is listed and keyed.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceDescriptor {
    /// List endpoint below the API base
    pub endpoint: &'static str,
    /// Canonical id field of a list record
    pub id_field: &'static str,
    /// Human-readable name field of a list record
    pub name_field: &'static str,
    /// Extra fields requested alongside id and name
    pub extra_fields: &'static [&'static str],
    pub link_template: Option<&'static str>,
}

impl ReferenceType {
    pub const ALL: [ReferenceType; 15] = [
        ReferenceType::Project,
        ReferenceType::ProjectGroup,
        ReferenceType::Provider,
        ReferenceType::Region,
        ReferenceType::Collector,
        ReferenceType::Plugin,
        ReferenceType::Secret,
        ReferenceType::ServiceAccount,
        ReferenceType::TrustedAccount,
        ReferenceType::User,
        ReferenceType::Webhook,
        ReferenceType::Protocol,
        ReferenceType::PublicDashboard,
        ReferenceType::PrivateDashboard,
        ReferenceType::CloudServiceType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Project => "project",
            ReferenceType::ProjectGroup => "project-group",
            ReferenceType::Provider => "provider",
            ReferenceType::Region => "region",
            ReferenceType::Collector => "collector",
            ReferenceType::Plugin => "plugin",
            ReferenceType::Secret => "secret",
            ReferenceType::ServiceAccount => "service-account",
            ReferenceType::TrustedAccount => "trusted-account",
            ReferenceType::User => "user",
            ReferenceType::Webhook => "webhook",
            ReferenceType::Protocol => "protocol",
            ReferenceType::PublicDashboard => "public-dashboard",
            ReferenceType::PrivateDashboard => "private-dashboard",
            ReferenceType::CloudServiceType => "cloud-service-type",
        }
    }

    pub fn descriptor(&self) -> ReferenceDescriptor {
        match self {
            ReferenceType::Project => ReferenceDescriptor {
                endpoint: "identity/project/list",
                id_field: "project_id",
                name_field: "name",
                extra_fields: &["project_group_id", "project_type"],
                link_template: Some("/project/{key}"),
            },
            ReferenceType::ProjectGroup => ReferenceDescriptor {
                endpoint: "identity/project-group/list",
                id_field: "project_group_id",
                name_field: "name",
                extra_fields: &["parent_group_id"],
                link_template: Some("/project?select_pg={key}"),
            },
            ReferenceType::Provider => ReferenceDescriptor {
                endpoint: "identity/provider/list",
                id_field: "provider",
                name_field: "name",
                extra_fields: &["tags"],
                link_template: None,
            },
            ReferenceType::Region => ReferenceDescriptor {
                endpoint: "inventory/region/list",
                id_field: "region_code",
                name_field: "name",
                extra_fields: &["provider", "tags"],
                link_template: None,
            },
            ReferenceType::Collector => ReferenceDescriptor {
                endpoint: "inventory/collector/list",
                id_field: "collector_id",
                name_field: "name",
                extra_fields: &["tags", "plugin_info"],
                link_template: Some("/asset-inventory/collector/{key}"),
            },
            ReferenceType::Plugin => ReferenceDescriptor {
                endpoint: "repository/plugin/list",
                id_field: "plugin_id",
                name_field: "name",
                extra_fields: &["tags"],
                link_template: None,
            },
            ReferenceType::Secret => ReferenceDescriptor {
                endpoint: "secret/secret/list",
                id_field: "secret_id",
                name_field: "name",
                extra_fields: &["provider"],
                link_template: None,
            },
            ReferenceType::ServiceAccount => ReferenceDescriptor {
                endpoint: "identity/service-account/list",
                id_field: "service_account_id",
                name_field: "name",
                extra_fields: &["provider", "project_id"],
                link_template: Some("/asset-inventory/service-account/{key}"),
            },
            ReferenceType::TrustedAccount => ReferenceDescriptor {
                endpoint: "identity/trusted-account/list",
                id_field: "trusted_account_id",
                name_field: "name",
                extra_fields: &["provider"],
                link_template: Some("/asset-inventory/service-account/{key}"),
            },
            ReferenceType::User => ReferenceDescriptor {
                endpoint: "identity/user/list",
                id_field: "user_id",
                name_field: "name",
                extra_fields: &["email"],
                link_template: None,
            },
            ReferenceType::Webhook => ReferenceDescriptor {
                endpoint: "monitoring/webhook/list",
                id_field: "webhook_id",
                name_field: "name",
                extra_fields: &["project_id"],
                link_template: None,
            },
            ReferenceType::Protocol => ReferenceDescriptor {
                endpoint: "notification/protocol/list",
                id_field: "protocol_id",
                name_field: "name",
                extra_fields: &["protocol_type", "tags"],
                link_template: None,
            },
            ReferenceType::PublicDashboard => ReferenceDescriptor {
                endpoint: "dashboard/public-dashboard/list",
                id_field: "public_dashboard_id",
                name_field: "name",
                extra_fields: &[],
                link_template: Some("/dashboards/{key}"),
            },
            ReferenceType::PrivateDashboard => ReferenceDescriptor {
                endpoint: "dashboard/private-dashboard/list",
                id_field: "private_dashboard_id",
                name_field: "name",
                extra_fields: &[],
                link_template: Some("/dashboards/{key}"),
            },
            ReferenceType::CloudServiceType => ReferenceDescriptor {
                endpoint: "inventory/cloud-service-type/list",
                id_field: "cloud_service_type_id",
                name_field: "name",
                extra_fields: &["provider", "group", "tags"],
                link_template: None,
            },
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceType {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ReferenceError::UnknownType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn string_form_matches_serde() {
        for t in ReferenceType::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json.as_str(), Some(t.as_str()));
            assert_eq!(t.as_str().parse::<ReferenceType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = "galaxy".parse::<ReferenceType>().unwrap_err();
        assert!(matches!(err, ReferenceError::UnknownType(ref s) if s == "galaxy"));
    }

    #[test]
    fn descriptors_are_distinct() {
        let endpoints: HashSet<_> = ReferenceType::ALL
            .iter()
            .map(|t| t.descriptor().endpoint)
            .collect();
        assert_eq!(endpoints.len(), ReferenceType::ALL.len());

        for t in ReferenceType::ALL {
            let d = t.descriptor();
            assert!(d.endpoint.ends_with("/list"), "{t}: {}", d.endpoint);
            assert!(!d.id_field.is_empty());
            assert!(!d.name_field.is_empty());
        }
    }
}
