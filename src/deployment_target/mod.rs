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

mod data_source;
mod mapping;
mod state;

pub use data_source::ListeningTentacleDeploymentTargetsDataSource;
pub use mapping::{expand_machines_query, flatten_listening_tentacle_deployment_target};
pub use state::{
    get_listening_tentacle_deployment_target_data_schema,
    get_listening_tentacle_deployment_target_schema, DeploymentTargetState,
    ListeningTentaclesState,
};
