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

use std::fmt::Debug;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::Diagnostics;
use tokio::sync::OnceCell;

mod environments;
mod machines;
#[cfg(test)]
pub(crate) mod memory;

pub use environments::{Environment, EnvironmentsQuery};
pub use machines::{DeploymentTarget, Endpoint, MachinesQuery};

/// Communication style of a listening tentacle endpoint.
pub const TENTACLE_PASSIVE: &str = "TentaclePassive";

fn is_false(value: &bool) -> bool {
    !value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// A page of items returned by a collection endpoint.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resources<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub items_per_page: i64,
    #[serde(default)]
    pub total_results: i64,
}

impl<T> Resources<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len() as i64;
        Self {
            items,
            items_per_page: total,
            total_results: total,
        }
    }
}

/// Octopus Deploy API operations used by the provider.
///
/// Transport, authentication and retries are the implementor's business.
#[async_trait]
pub trait Client: Send + Sync + Debug + 'static {
    /// query the machines endpoint
    async fn get_machines(&self, query: &MachinesQuery) -> Result<Resources<DeploymentTarget>>;

    /// query the environments endpoint
    async fn get_environments(&self, query: &EnvironmentsQuery) -> Result<Resources<Environment>>;

    /// Fetch a single environment, `None` if it does not exist
    async fn get_environment_by_id(&self, id: &str) -> Result<Option<Environment>>;

    async fn add_environment(&self, environment: &Environment) -> Result<Environment>;

    async fn update_environment(&self, environment: &Environment) -> Result<Environment>;

    async fn delete_environment_by_id(&self, id: &str) -> Result<()>;
}

/// Resolved provider configuration handed to a [`Connector`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub address: String,
    pub api_key: String,
    pub space_id: Option<String>,
}

/// Builds a [`Client`] once the provider block is known.
#[async_trait]
pub trait Connector: Send + Sync + Debug + 'static {
    type Client: Client;

    async fn connect(&self, config: &ClientConfig) -> Result<Self::Client>;
}

/// Client shared between the provider and its resources.
///
/// Empty until the provider is configured.
#[derive(Debug)]
pub struct ClientHandle<C> {
    cell: Arc<OnceCell<C>>,
}

impl<C> Clone for ClientHandle<C> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<C> Default for ClientHandle<C> {
    fn default() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
        }
    }
}

impl<C: Client> ClientHandle<C> {
    /// Handle already holding a client
    #[cfg(test)]
    pub(crate) fn ready(client: C) -> Self {
        Self {
            cell: Arc::new(OnceCell::new_with(Some(client))),
        }
    }

    pub fn install(&self, client: C) -> Result<()> {
        self.cell
            .set(client)
            .map_err(|_| anyhow!("the Octopus Deploy client has already been configured"))
    }

    pub fn get(&self, diags: &mut Diagnostics) -> Option<&C> {
        let client = self.cell.get();
        if client.is_none() {
            diags.root_error(
                "Provider not configured",
                "The Octopus Deploy provider must be configured before its resources and data sources can be used.",
            );
        }
        client
    }
}
