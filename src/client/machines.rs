// This file is part of the terraform-provider-octopusdeploy project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};

/// Endpoint through which the server reaches a machine.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Endpoint {
    pub communication_style: String,
    #[serde(default)]
    pub thumbprint: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_id: Option<String>,
    #[serde(default)]
    pub certificate_signature_algorithm: String,
}

/// A machine registered as a deployment target.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeploymentTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub endpoint: Option<Endpoint>,
    pub environment_ids: Vec<String>,
    pub roles: Vec<String>,
    pub health_status: String,
    pub status_summary: String,
    pub has_latest_calamari: bool,
    pub is_disabled: bool,
    pub is_in_process: bool,
    pub machine_policy_id: String,
    pub shell_name: String,
    pub shell_version: String,
    pub space_id: String,
    pub tenanted_deployment_participation: String,
    pub tenant_ids: Vec<String>,
    pub tenant_tags: Vec<String>,
    pub thumbprint: String,
    pub uri: String,
}

impl DeploymentTarget {
    pub fn get_id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn communication_style(&self) -> &str {
        self.endpoint
            .as_ref()
            .map_or("", |endpoint| endpoint.communication_style.as_str())
    }
}

/// Filters accepted by the machines collection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachinesQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub communication_styles: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub deployment_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub health_statuses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(skip_serializing_if = "super::is_false")]
    pub is_disabled: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub partial_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shell_names: Vec<String>,
    #[serde(skip_serializing_if = "super::is_zero")]
    pub skip: i64,
    #[serde(skip_serializing_if = "super::is_zero")]
    pub take: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tenant_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tenant_tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub thumbprint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_parameters() {
        assert_eq!(serde_json::to_string(&MachinesQuery::default()).unwrap(), "{}");
    }

    #[test]
    fn query_parameters_are_camel_case() {
        let query = MachinesQuery {
            communication_styles: vec!["TentaclePassive".to_owned()],
            is_disabled: true,
            partial_name: "prod".to_owned(),
            take: 5,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({
                "communicationStyles": ["TentaclePassive"],
                "isDisabled": true,
                "partialName": "prod",
                "take": 5,
            })
        );
    }

    #[test]
    fn deployment_target_reads_pascal_case() {
        let target: DeploymentTarget = serde_json::from_value(serde_json::json!({
            "Id": "Machines-1",
            "Name": "web-01",
            "Endpoint": { "CommunicationStyle": "TentaclePassive", "Uri": "https://web-01:10933/" },
            "EnvironmentIds": ["Environments-1"],
            "IsDisabled": true,
        }))
        .unwrap();

        assert_eq!(target.get_id(), "Machines-1");
        assert_eq!(target.communication_style(), "TentaclePassive");
        assert_eq!(target.environment_ids, ["Environments-1"]);
        assert!(target.is_disabled);
        assert!(target.roles.is_empty());
    }
}
