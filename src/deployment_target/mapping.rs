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

use tf_provider::value::{Value, ValueString};

use crate::client::{DeploymentTarget, Endpoint, MachinesQuery, TENTACLE_PASSIVE};
use crate::utils::{expand_array, flatten_array, owned};

use super::state::{DeploymentTargetState, ListeningTentaclesState};

/// Machines query restricted to listening tentacles.
pub fn expand_machines_query(state: &ListeningTentaclesState) -> MachinesQuery {
    MachinesQuery {
        communication_styles: vec![TENTACLE_PASSIVE.to_owned()],
        deployment_id: state.deployment_id.as_str().to_owned(),
        environment_ids: expand_array(&state.environments),
        health_statuses: expand_array(&state.health_statuses),
        ids: expand_array(&state.ids),
        is_disabled: state.is_disabled.unwrap_or_default(),
        name: state.name.as_str().to_owned(),
        partial_name: state.partial_name.as_str().to_owned(),
        roles: expand_array(&state.roles),
        shell_names: expand_array(&state.shell_names),
        skip: state.skip.unwrap_or_default(),
        take: state.take.unwrap_or_default(),
        tenant_ids: expand_array(&state.tenants),
        tenant_tags: expand_array(&state.tenant_tags),
        thumbprint: state.thumbprint.as_str().to_owned(),
    }
}

pub fn flatten_listening_tentacle_deployment_target<'a>(
    target: &DeploymentTarget,
) -> Value<DeploymentTargetState<'a>> {
    let endpoint = target.endpoint.as_ref();
    let from_endpoint = |field: fn(&Endpoint) -> &str| -> ValueString<'a> {
        endpoint.map_or(Value::Null, |endpoint| owned(field(endpoint)))
    };

    Value::Value(DeploymentTargetState {
        id: owned(target.get_id()),
        name: owned(&target.name),
        environments: flatten_array(&target.environment_ids),
        roles: flatten_array(&target.roles),
        health_status: owned(&target.health_status),
        status_summary: owned(&target.status_summary),
        has_latest_calamari: Value::Value(target.has_latest_calamari),
        is_disabled: Value::Value(target.is_disabled),
        is_in_process: Value::Value(target.is_in_process),
        machine_policy_id: owned(&target.machine_policy_id),
        shell_name: owned(&target.shell_name),
        shell_version: owned(&target.shell_version),
        space_id: owned(&target.space_id),
        tenanted_deployment_participation: owned(&target.tenanted_deployment_participation),
        tenants: flatten_array(&target.tenant_ids),
        tenant_tags: flatten_array(&target.tenant_tags),
        thumbprint: from_endpoint(|endpoint| endpoint.thumbprint.as_str()),
        tentacle_url: from_endpoint(|endpoint| endpoint.uri.as_str()),
        proxy_id: from_endpoint(|endpoint| endpoint.proxy_id.as_deref().unwrap_or_default()),
        certificate_signature_algorithm: from_endpoint(|endpoint| {
            endpoint.certificate_signature_algorithm.as_str()
        }),
    })
}
