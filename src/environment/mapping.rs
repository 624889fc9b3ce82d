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

use tf_provider::value::Value;

use crate::client::{Environment, EnvironmentsQuery};
use crate::utils::{expand_array, owned};

use super::state::{EnvironmentState, EnvironmentsState};

pub fn expand_environment(state: &EnvironmentState) -> Environment {
    let mut environment = Environment::new(state.name.as_str());
    environment.id = state.id.as_deref_option().map(str::to_owned);

    if let Value::Value(allow) = state.allow_dynamic_infrastructure {
        environment.allow_dynamic_infrastructure = allow;
    }
    if let Value::Value(description) = &state.description {
        environment.description = description.to_string();
    }
    if let Value::Value(sort_order) = state.sort_order {
        environment.sort_order = sort_order;
    }
    if let Value::Value(guided) = state.use_guided_failure {
        environment.use_guided_failure = guided;
    }

    environment
}

pub fn flatten_environment<'a>(environment: Option<&Environment>) -> Value<EnvironmentState<'a>> {
    let Some(environment) = environment else {
        return Value::Null;
    };

    Value::Value(EnvironmentState {
        id: owned(environment.get_id()),
        name: owned(&environment.name),
        description: owned(&environment.description),
        allow_dynamic_infrastructure: Value::Value(environment.allow_dynamic_infrastructure),
        sort_order: Value::Value(environment.sort_order),
        use_guided_failure: Value::Value(environment.use_guided_failure),
    })
}

/// Apply an environment returned by the API to the state in place.
///
/// Optional attributes left null in the state stay null while the server
/// holds the zero value for them.
pub fn set_environment(state: &mut EnvironmentState, environment: &Environment) {
    set_optional_bool(
        &mut state.allow_dynamic_infrastructure,
        environment.allow_dynamic_infrastructure,
    );
    if !(state.description.is_null() && environment.description.is_empty()) {
        state.description = owned(&environment.description);
    }
    state.name = owned(&environment.name);
    state.sort_order = Value::Value(environment.sort_order);
    set_optional_bool(&mut state.use_guided_failure, environment.use_guided_failure);

    state.id = owned(environment.get_id());
}

fn set_optional_bool(value: &mut Value<bool>, remote: bool) {
    if !(value.is_null() && !remote) {
        *value = Value::Value(remote);
    }
}

pub fn expand_environments_query(state: &EnvironmentsState) -> EnvironmentsQuery {
    EnvironmentsQuery {
        ids: expand_array(&state.ids),
        name: state.name.as_str().to_owned(),
        partial_name: state.partial_name.as_str().to_owned(),
        skip: state.skip.unwrap_or_default(),
        take: state.take.unwrap_or_default(),
    }
}
