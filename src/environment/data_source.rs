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
use crate::schema::fill_default_int;
use crate::utils::{synthetic_id, WithNormalize, WithSchema};

use super::mapping::{expand_environments_query, flatten_environment};
use super::state::EnvironmentsState;

#[derive(Debug)]
pub struct EnvironmentsDataSource<C: Client> {
    pub(super) client: ClientHandle<C>,
}

impl<C: Client> EnvironmentsDataSource<C> {
    pub fn new(client: ClientHandle<C>) -> Self {
        Self { client }
    }
}

impl<'a> WithNormalize for EnvironmentsState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        let fields = Self::fields();
        fill_default_int(&mut self.skip, &fields, "skip");
        fill_default_int(&mut self.take, &fields, "take");
    }
}

#[async_trait]
impl<C> DataSource for EnvironmentsDataSource<C>
where
    C: Client,
{
    type State<'a> = EnvironmentsState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(EnvironmentsState::schema())
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

        let query = expand_environments_query(&state);
        tracing::debug!(?query, "querying environments");

        let environments = match client.get_environments(&query).await {
            Ok(environments) => environments,
            Err(err) => {
                diags.root_error("Failed to query environments", err.to_string());
                return None;
            }
        };
        tracing::debug!(count = environments.items.len(), "environments found");

        state.environments = Value::Value(
            environments
                .items
                .iter()
                .map(|environment| flatten_environment(Some(environment)))
                .collect(),
        );
        state.id = Value::Value(Cow::Owned(synthetic_id("Environments")));

        Some(state)
    }
}
