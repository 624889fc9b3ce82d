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

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{
    Client, ClientConfig, Connector, DeploymentTarget, Environment, EnvironmentsQuery,
    MachinesQuery, Resources,
};

/// Octopus server kept in memory.
#[derive(Debug, Default)]
pub(crate) struct InMemoryClient {
    pub machines: Vec<DeploymentTarget>,
    pub environments: Mutex<BTreeMap<String, Environment>>,
    pub failure: Option<String>,
    pub next_id: Mutex<u64>,
    pub queries: Mutex<Vec<MachinesQuery>>,
}

impl InMemoryClient {
    pub fn with_machines(machines: Vec<DeploymentTarget>) -> Self {
        Self {
            machines,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Default::default()
        }
    }

    pub fn insert_environment(&self, environment: Environment) {
        self.environments
            .lock()
            .unwrap()
            .insert(environment.get_id().to_owned(), environment);
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        }
    }
}

fn matches_any(filter: &[String], values: &[String]) -> bool {
    filter.is_empty() || filter.iter().any(|f| values.contains(f))
}

fn matches_name(name: &str, exact: &str, partial: &str) -> bool {
    (exact.is_empty() || name == exact)
        && (partial.is_empty() || name.to_lowercase().contains(&partial.to_lowercase()))
}

fn page<T>(items: impl Iterator<Item = T>, skip: i64, take: i64) -> Resources<T> {
    let items = items.skip(skip.max(0) as usize).take(take.max(0) as usize);
    Resources::new(items.collect())
}

#[async_trait]
impl Client for InMemoryClient {
    async fn get_machines(&self, query: &MachinesQuery) -> Result<Resources<DeploymentTarget>> {
        self.check()?;
        self.queries.lock().unwrap().push(query.clone());

        let found = self.machines.iter().filter(|machine| {
            (query.communication_styles.is_empty()
                || query
                    .communication_styles
                    .iter()
                    .any(|style| style == machine.communication_style()))
                && (query.ids.is_empty() || query.ids.iter().any(|id| id == machine.get_id()))
                && matches_name(&machine.name, &query.name, &query.partial_name)
                && matches_any(&query.environment_ids, &machine.environment_ids)
                && matches_any(&query.roles, &machine.roles)
                && (query.health_statuses.is_empty()
                    || query.health_statuses.contains(&machine.health_status))
                && (!query.is_disabled || machine.is_disabled)
        });

        Ok(page(found.cloned(), query.skip, query.take))
    }

    async fn get_environments(&self, query: &EnvironmentsQuery) -> Result<Resources<Environment>> {
        self.check()?;
        let environments = self.environments.lock().unwrap();

        let found = environments.values().filter(|environment| {
            (query.ids.is_empty() || query.ids.iter().any(|id| id == environment.get_id()))
                && matches_name(&environment.name, &query.name, &query.partial_name)
        });

        Ok(page(found.cloned(), query.skip, query.take))
    }

    async fn get_environment_by_id(&self, id: &str) -> Result<Option<Environment>> {
        self.check()?;
        Ok(self.environments.lock().unwrap().get(id).cloned())
    }

    async fn add_environment(&self, environment: &Environment) -> Result<Environment> {
        self.check()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let mut environments = self.environments.lock().unwrap();
        let mut created = environment.clone();
        created.id = Some(format!("Environments-{}", *next_id));
        created.sort_order = environments.len() as i64;
        environments.insert(created.get_id().to_owned(), created.clone());
        Ok(created)
    }

    async fn update_environment(&self, environment: &Environment) -> Result<Environment> {
        self.check()?;
        let mut environments = self.environments.lock().unwrap();
        let Some(existing) = environments.get_mut(environment.get_id()) else {
            return Err(anyhow!("environment {} not found", environment.get_id()));
        };
        let sort_order = existing.sort_order;
        *existing = environment.clone();
        existing.sort_order = sort_order;
        Ok(existing.clone())
    }

    async fn delete_environment_by_id(&self, id: &str) -> Result<()> {
        self.check()?;
        self.environments
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| anyhow!("environment {id} not found"))
    }
}

/// Connector that checks the configuration it receives.
#[derive(Debug, Default)]
pub(crate) struct InMemoryConnector {
    pub seen: Mutex<Option<ClientConfig>>,
}

#[async_trait]
impl Connector for InMemoryConnector {
    type Client = InMemoryClient;

    async fn connect(&self, config: &ClientConfig) -> Result<Self::Client> {
        if config.api_key == "API-INVALID" {
            return Err(anyhow!("invalid API key"));
        }
        *self.seen.lock().unwrap() = Some(config.clone());
        Ok(InMemoryClient::default())
    }
}
