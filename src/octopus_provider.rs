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

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tf_provider::value::ValueString;
use tf_provider::{map, AttributePath, Diagnostics, Provider, Schema, ValueEmpty};

use crate::client::{ClientConfig, ClientHandle, Connector};
use crate::deployment_target::ListeningTentacleDeploymentTargetsDataSource;
use crate::environment::{EnvironmentResource, EnvironmentsDataSource};
use crate::schema::{to_schema, FieldSchema, SchemaMap};

pub const ADDRESS_ENV: &str = "OCTOPUS_URL";
pub const API_KEY_ENV: &str = "OCTOPUS_APIKEY";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    #[serde(borrow = "'a")]
    pub address: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub api_key: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub space_id: ValueString<'a>,
}

pub fn get_provider_schema() -> SchemaMap {
    SchemaMap::from([
        (
            "address",
            FieldSchema::string()
                .describe("The endpoint of the Octopus REST API (defaults to `OCTOPUS_URL`)")
                .optional(),
        ),
        (
            "api_key",
            FieldSchema::string()
                .describe("The API key to use with the Octopus REST API (defaults to `OCTOPUS_APIKEY`)")
                .optional()
                .sensitive(),
        ),
        (
            "space_id",
            FieldSchema::string()
                .describe("The space ID to target")
                .optional(),
        ),
    ])
}

impl<'a> ProviderConfig<'a> {
    /// Resolve the connection settings, falling back to `lookup` for unset
    /// attributes.
    pub fn resolve<F>(&self, diags: &mut Diagnostics, lookup: F) -> Option<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut setting = |name: &'static str, value: &ValueString, env: &str| {
            let resolved = value
                .as_deref_option()
                .map(str::to_owned)
                .or_else(|| lookup(env))
                .filter(|value| !value.is_empty());
            if resolved.is_none() {
                diags.error(
                    format!("Missing `{name}`"),
                    format!("`{name}` must be set in the provider block or through `{env}`."),
                    AttributePath::new(name),
                );
            }
            resolved
        };

        let address = setting("address", &self.address, ADDRESS_ENV);
        let api_key = setting("api_key", &self.api_key, API_KEY_ENV);

        Some(ClientConfig {
            address: address?,
            api_key: api_key?,
            space_id: self
                .space_id
                .as_deref_option()
                .filter(|space| !space.is_empty())
                .map(str::to_owned),
        })
    }
}

#[derive(Debug, Default)]
pub struct OctopusProvider<K: Connector> {
    connector: K,
    client: ClientHandle<K::Client>,
}

impl<K: Connector> OctopusProvider<K> {
    pub fn new(connector: K) -> Self {
        Self {
            connector,
            client: ClientHandle::default(),
        }
    }
}

#[async_trait]
impl<K: Connector> Provider for OctopusProvider<K> {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(to_schema("octopusdeploy", &get_provider_schema()))
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::Config<'a>) -> Option<()> {
        Some(())
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let config = config.resolve(diags, |name| std::env::var(name).ok())?;
        tracing::info!(
            address = %config.address,
            space_id = config.space_id.as_deref().unwrap_or_default(),
            %terraform_version,
            "configuring Octopus Deploy client"
        );

        let client = match self.connector.connect(&config).await {
            Ok(client) => client,
            Err(err) => {
                diags.root_error("Failed to connect to Octopus Deploy", err.to_string());
                return None;
            }
        };
        if let Err(err) = self.client.install(client) {
            diags.root_error("Failed to configure provider", err.to_string());
            return None;
        }
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<std::collections::HashMap<String, Box<dyn tf_provider::resource::DynamicResource>>>
    {
        Some(map! {
            "environment" => EnvironmentResource::new(self.client.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<
        std::collections::HashMap<String, Box<dyn tf_provider::data_source::DynamicDataSource>>,
    > {
        Some(map! {
            "environments" => EnvironmentsDataSource::new(self.client.clone()),
            "listening_tentacle_deployment_targets" =>
                ListeningTentacleDeploymentTargetsDataSource::new(self.client.clone()),
        })
    }
}
