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
use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};
use tf_provider::{Diagnostics, Schema};

use crate::schema::{fill_default_int, to_schema, FieldDefault, FieldSchema, SchemaMap};
use crate::utils::{WithNormalize, WithSchema};

/// One listening tentacle as exposed by the data source.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTargetState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub environments: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub roles: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub health_status: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub status_summary: ValueString<'a>,
    pub has_latest_calamari: Value<bool>,
    pub is_disabled: Value<bool>,
    pub is_in_process: Value<bool>,
    #[serde(borrow = "'a")]
    pub machine_policy_id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub shell_name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub shell_version: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub space_id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub tenanted_deployment_participation: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub tenants: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub tenant_tags: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub thumbprint: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub tentacle_url: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub proxy_id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub certificate_signature_algorithm: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningTentaclesState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub deployment_id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub environments: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub health_statuses: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub ids: ValueList<ValueString<'a>>,
    pub is_disabled: Value<bool>,
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub partial_name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub roles: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub shell_names: ValueList<ValueString<'a>>,
    pub skip: ValueNumber,
    pub take: ValueNumber,
    #[serde(borrow = "'a")]
    pub tenants: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub tenant_tags: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub thumbprint: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub listening_tentacles: ValueList<Value<DeploymentTargetState<'a>>>,
}

pub fn get_listening_tentacle_deployment_target_schema() -> SchemaMap {
    let string =
        |description: &'static str| FieldSchema::string().describe(description).computed();
    let list =
        |description: &'static str| FieldSchema::string_list().describe(description).computed();
    let flag =
        |description: &'static str| FieldSchema::bool().describe(description).computed();

    SchemaMap::from([
        ("id", string("ID of the deployment target")),
        ("name", string("Name of the deployment target")),
        ("environments", list("Environments the deployment target belongs to")),
        ("roles", list("Roles of the deployment target")),
        ("health_status", string("Last known health status")),
        ("status_summary", string("Summary of the last health check")),
        ("has_latest_calamari", flag("Whether the latest Calamari is installed")),
        ("is_disabled", flag("Whether the deployment target is disabled")),
        ("is_in_process", flag("Whether a task is running against the deployment target")),
        ("machine_policy_id", string("ID of the machine policy")),
        ("shell_name", string("Name of the default shell")),
        ("shell_version", string("Version of the default shell")),
        ("space_id", string("ID of the space")),
        (
            "tenanted_deployment_participation",
            string("Participation in tenanted deployments"),
        ),
        ("tenants", list("IDs of the tenants")),
        ("tenant_tags", list("Tenant tags")),
        ("thumbprint", string("Thumbprint of the tentacle certificate")),
        ("tentacle_url", string("URL the server uses to reach the tentacle")),
        ("proxy_id", string("ID of the proxy used to reach the tentacle")),
        (
            "certificate_signature_algorithm",
            string("Signature algorithm of the tentacle certificate"),
        ),
    ])
}

pub fn get_listening_tentacle_deployment_target_data_schema() -> SchemaMap {
    let filter =
        |description: &'static str| FieldSchema::string_list().describe(description).optional();
    let search =
        |description: &'static str| FieldSchema::string().describe(description).optional();

    SchemaMap::from([
        ("id", FieldSchema::string().computed()),
        ("deployment_id", search("Query and/or search by deployment ID")),
        ("environments", filter("Query and/or search by a list of environment IDs")),
        ("health_statuses", filter("Query and/or search by a list of health statuses")),
        ("ids", filter("Query and/or search by a list of IDs")),
        (
            "is_disabled",
            FieldSchema::bool()
                .describe("Query and/or search by disabled state")
                .optional(),
        ),
        ("name", search("Query and/or search by name")),
        ("partial_name", search("Query and/or search by partial name")),
        ("roles", filter("Query and/or search by a list of roles")),
        ("shell_names", filter("Query and/or search by a list of shell names")),
        (
            "skip",
            FieldSchema::int()
                .describe("Indicates the number of items to skip in the response")
                .optional()
                .with_default(FieldDefault::Int(0)),
        ),
        (
            "take",
            FieldSchema::int()
                .describe("Indicates the number of items to take (or return) in the response")
                .optional()
                .with_default(FieldDefault::Int(1)),
        ),
        ("tenants", filter("Query and/or search by a list of tenant IDs")),
        ("tenant_tags", filter("Query and/or search by a list of tenant tags")),
        ("thumbprint", search("Query and/or search by thumbprint")),
        (
            "listening_tentacles",
            FieldSchema::nested_list(get_listening_tentacle_deployment_target_schema())
                .describe("A list of listening tentacle deployment targets that match the filter(s)")
                .computed(),
        ),
    ])
}

impl<'a> WithSchema for ListeningTentaclesState<'a> {
    fn fields() -> SchemaMap {
        get_listening_tentacle_deployment_target_data_schema()
    }

    fn schema() -> Schema {
        to_schema(
            "Provides information about existing listening tentacle deployment targets.",
            &Self::fields(),
        )
    }
}

impl<'a> WithNormalize for ListeningTentaclesState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        let fields = Self::fields();
        fill_default_int(&mut self.skip, &fields, "skip");
        fill_default_int(&mut self.take, &fields, "take");
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{FieldType, Presence};

    use super::*;

    #[test]
    fn listening_tentacles_are_computed() {
        let schema = get_listening_tentacle_deployment_target_data_schema();
        let FieldType::Nested(element) = &schema["listening_tentacles"].field_type else {
            panic!("`listening_tentacles` should be a nested list");
        };

        assert!(element
            .values()
            .all(|field| field.presence == Presence::Computed));
        assert_eq!(schema["id"].presence, Presence::Computed);
        assert!(schema
            .iter()
            .filter(|(name, _)| !matches!(**name, "id" | "listening_tentacles"))
            .all(|(_, field)| field.presence == Presence::Optional));
    }

    #[test]
    fn normalize_fills_pagination() {
        let mut state = ListeningTentaclesState {
            take: Value::Value(5),
            ..Default::default()
        };
        state.normalize(&mut Diagnostics::default());

        assert_eq!(state.skip, Value::Value(0));
        assert_eq!(state.take, Value::Value(5));
    }
}
