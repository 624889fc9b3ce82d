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

use std::borrow::Cow;

use async_trait::async_trait;

use tf_provider::{DataSource, Diagnostics, Schema, Value, ValueEmpty};

use crate::client::{Client, ClientHandle};
use crate::utils::{joined, synthetic_id, WithNormalize, WithSchema};

use super::mapping::{expand_machines_query, flatten_listening_tentacle_deployment_target};
use super::state::ListeningTentaclesState;

#[derive(Debug)]
pub struct ListeningTentacleDeploymentTargetsDataSource<C: Client> {
    pub(super) client: ClientHandle<C>,
}

impl<C: Client> ListeningTentacleDeploymentTargetsDataSource<C> {
    pub fn new(client: ClientHandle<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C> DataSource for ListeningTentacleDeploymentTargetsDataSource<C>
where
    C: Client,
{
    type State<'a> = ListeningTentaclesState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ListeningTentaclesState::schema())
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::State<'a>) -> Option<()> {
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = self.client.get(diags)?;

        let mut state = config;
        state.normalize(diags);

        let query = expand_machines_query(&state);
        tracing::debug!(
            environments = %joined(&query.environment_ids, ","),
            roles = %joined(&query.roles, ","),
            partial_name = %query.partial_name,
            skip = query.skip,
            take = query.take,
            "querying listening tentacles"
        );

        let deployment_targets = match client.get_machines(&query).await {
            Ok(deployment_targets) => deployment_targets,
            Err(err) => {
                diags.root_error(
                    "Failed to query listening tentacle deployment targets",
                    err.to_string(),
                );
                return None;
            }
        };
        tracing::debug!(
            count = deployment_targets.items.len(),
            total = deployment_targets.total_results,
            "listening tentacles found"
        );

        state.listening_tentacles = Value::Value(
            deployment_targets
                .items
                .iter()
                .map(flatten_listening_tentacle_deployment_target)
                .collect(),
        );
        state.id = Value::Value(Cow::Owned(synthetic_id(
            "ListeningTentacleDeploymentTargets",
        )));

        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{
        memory::InMemoryClient, DeploymentTarget, Endpoint, MachinesQuery, TENTACLE_PASSIVE,
    };

    use super::*;

    fn tentacle(id: usize, name: &str, communication_style: &str) -> DeploymentTarget {
        DeploymentTarget {
            id: Some(format!("Machines-{id}")),
            name: name.to_owned(),
            endpoint: Some(Endpoint {
                communication_style: communication_style.to_owned(),
                uri: format!("https://{name}:10933/"),
                ..Default::default()
            }),
            environment_ids: vec!["Environments-1".to_owned()],
            roles: vec!["web".to_owned()],
            health_status: "Healthy".to_owned(),
            ..Default::default()
        }
    }

    fn fleet() -> Vec<DeploymentTarget> {
        let matching = (0..5).map(|i| tentacle(i, &format!("prod-web-{i}"), TENTACLE_PASSIVE));
        let other_names =
            (5..12).map(|i| tentacle(i, &format!("staging-web-{i}"), TENTACLE_PASSIVE));
        let polling = (12..15).map(|i| tentacle(i, &format!("prod-poll-{i}"), "TentacleActive"));
        matching.chain(other_names).chain(polling).collect()
    }

    fn data_source(
        client: InMemoryClient,
    ) -> ListeningTentacleDeploymentTargetsDataSource<InMemoryClient> {
        ListeningTentacleDeploymentTargetsDataSource::new(ClientHandle::ready(client))
    }

    #[tokio::test]
    async fn read_partial_name_with_take() {
        let data_source = data_source(InMemoryClient::with_machines(fleet()));
        let mut diags = Diagnostics::default();
        let config = ListeningTentaclesState {
            partial_name: Value::Value("prod".into()),
            take: Value::Value(5),
            ..Default::default()
        };

        let state = data_source
            .read(&mut diags, config, Default::default())
            .await
            .unwrap();

        assert!(diags.errors.is_empty());
        let tentacles = state.listening_tentacles.as_ref_option().unwrap();
        assert_eq!(tentacles.len(), 5);
        for tentacle in tentacles {
            let tentacle = tentacle.as_ref_option().unwrap();
            assert!(tentacle.name.as_str().starts_with("prod-web-"));
        }
        assert!(state
            .id
            .as_str()
            .starts_with("ListeningTentacleDeploymentTargets "));
    }

    #[tokio::test]
    async fn read_sends_configured_query() {
        let client = InMemoryClient::with_machines(fleet());
        let data_source = data_source(client);
        let mut diags = Diagnostics::default();
        let config = ListeningTentaclesState {
            roles: Value::Value(vec![Value::Value("web".into())]),
            ..Default::default()
        };

        let state = data_source
            .read(&mut diags, config, Default::default())
            .await
            .unwrap();
        assert_eq!(state.take, Value::Value(1));

        let client = data_source.client.get(&mut diags).unwrap();
        let queries = client.queries.lock().unwrap();
        assert_eq!(
            queries.as_slice(),
            [MachinesQuery {
                communication_styles: vec![TENTACLE_PASSIVE.to_owned()],
                roles: vec!["web".to_owned()],
                take: 1,
                ..Default::default()
            }]
        );
    }

    #[tokio::test]
    async fn disabled_targets_are_filtered_only_on_request() {
        let mut machines = fleet();
        machines[0].is_disabled = true;
        let data_source = data_source(InMemoryClient::with_machines(machines));
        let mut diags = Diagnostics::default();

        let names = |state: &ListeningTentaclesState| {
            state
                .listening_tentacles
                .as_ref_option()
                .into_iter()
                .flatten()
                .filter_map(|tentacle| tentacle.as_ref_option())
                .map(|tentacle| tentacle.name.as_str().to_owned())
                .collect::<Vec<_>>()
        };

        let config = ListeningTentaclesState {
            partial_name: Value::Value("prod-web".into()),
            take: Value::Value(10),
            ..Default::default()
        };
        let all = data_source
            .read(&mut diags, config.clone(), Default::default())
            .await
            .unwrap();
        assert_eq!(names(&all).len(), 5);

        let disabled = data_source
            .read(
                &mut diags,
                ListeningTentaclesState {
                    is_disabled: Value::Value(true),
                    ..config
                },
                Default::default(),
            )
            .await
            .unwrap();
        assert_eq!(names(&disabled), ["prod-web-0"]);
    }

    #[tokio::test]
    async fn read_failure_leaves_state_untouched() {
        let data_source = data_source(InMemoryClient::failing("connection refused"));
        let mut diags = Diagnostics::default();

        let state = data_source
            .read(&mut diags, Default::default(), Default::default())
            .await;

        assert!(state.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn read_requires_configured_provider() {
        let data_source =
            ListeningTentacleDeploymentTargetsDataSource::<InMemoryClient>::new(Default::default());
        let mut diags = Diagnostics::default();

        let state = data_source
            .read(&mut diags, Default::default(), Default::default())
            .await;

        assert!(state.is_none());
        assert!(!diags.errors.is_empty());
    }
}
