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

//! Terraform provider for Octopus Deploy.
//!
//! The provider maps Terraform state to the Octopus API structures in
//! [`client`]. Talking to the server is delegated to a [`client::Connector`]
//! supplied by the caller of [`serve`].

use anyhow::Result;

pub mod client;
pub mod deployment_target;
pub mod environment;
pub mod logging;
pub mod octopus_provider;
pub mod schema;
mod utils;

pub use octopus_provider::{OctopusProvider, ProviderConfig};

/// Name under which the provider registers with Terraform
pub const PROVIDER_NAME: &str = "octopusdeploy";

/// Run the plugin server until Terraform shuts it down.
pub async fn serve<K: client::Connector>(connector: K) -> Result<()> {
    logging::try_init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting provider");

    tf_provider::serve(PROVIDER_NAME, OctopusProvider::new(connector)).await
}
