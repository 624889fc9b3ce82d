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

use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{schema::Schema, AttributePath, Diagnostics, Resource};

use crate::client::{Client, ClientHandle};
use crate::utils::{WithSchema, WithValidate};

use super::mapping::{expand_environment, set_environment};
use super::state::EnvironmentState;

#[derive(Debug)]
pub struct EnvironmentResource<C: Client> {
    pub(super) client: ClientHandle<C>,
}

impl<C: Client> EnvironmentResource<C> {
    pub fn new(client: ClientHandle<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C> Resource for EnvironmentResource<C>
where
    C: Client,
{
    type State<'a> = EnvironmentState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(EnvironmentState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags)?;
        let id = state.id.as_str();
        tracing::debug!(id, "reading environment");

        match client.get_environment_by_id(id).await {
            Ok(Some(environment)) => {
                let mut state = state.clone();
                set_environment(&mut state, &environment);
                Some((state, private_state))
            }
            Ok(None) => {
                diags.error(
                    "Environment not found",
                    format!("The environment `{id}` no longer exists on the Octopus server."),
                    AttributePath::new("id"),
                );
                None
            }
            Err(err) => {
                diags.root_error("Failed to read environment", err.to_string());
                None
            }
        }
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        state.id = Value::Unknown;
        if state.sort_order.is_null() {
            state.sort_order = Value::Unknown;
        }

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<tf_provider::AttributePath>,
    )> {
        let mut state = proposed_state;
        state.id = prior_state.id;
        if state.sort_order.is_null() {
            state.sort_order = prior_state.sort_order;
        }

        Some((state, prior_private_state, Vec::new()))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags)?;
        let environment = expand_environment(&planned_state);
        tracing::debug!(name = %environment.name, "creating environment");

        match client.add_environment(&environment).await {
            Ok(created) => {
                let mut state = planned_state;
                set_environment(&mut state, &created);
                Some((state, private_state))
            }
            Err(err) => {
                diags.root_error("Failed to create environment", err.to_string());
                None
            }
        }
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags)?;
        let environment = expand_environment(&planned_state);
        tracing::debug!(id = environment.get_id(), "updating environment");

        match client.update_environment(&environment).await {
            Ok(updated) => {
                let mut state = planned_state;
                set_environment(&mut state, &updated);
                Some((state, private_state))
            }
            Err(err) => {
                diags.root_error("Failed to update environment", err.to_string());
                None
            }
        }
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let client = self.client.get(diags)?;
        let id = state.id.as_str();
        tracing::debug!(id, "deleting environment");

        if let Err(err) = client.delete_environment_by_id(id).await {
            diags.root_error("Failed to delete environment", err.to_string());
            return None;
        }
        Some(())
    }

    async fn import<'a>(
        &self,
        _diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let state = EnvironmentState {
            id: Value::Value(Cow::Owned(id)),
            ..Default::default()
        };
        Some((state, Default::default()))
    }
}
