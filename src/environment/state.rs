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

use serde::{Deserialize, Serialize};
use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};
use tf_provider::{Diagnostics, Schema};

use crate::schema::{
    computed_only, string_is_not_empty, to_schema, FieldDefault, FieldSchema, SchemaMap,
};
use crate::utils::{WithSchema, WithValidate};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub description: ValueString<'a>,
    pub allow_dynamic_infrastructure: Value<bool>,
    pub sort_order: ValueNumber,
    pub use_guided_failure: Value<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentsState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub ids: ValueList<ValueString<'a>>,
    #[serde(borrow = "'a")]
    pub name: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub partial_name: ValueString<'a>,
    pub skip: ValueNumber,
    pub take: ValueNumber,
    #[serde(borrow = "'a")]
    pub environments: ValueList<Value<EnvironmentState<'a>>>,
}

pub fn get_environment_schema() -> SchemaMap {
    SchemaMap::from([
        (
            "allow_dynamic_infrastructure",
            FieldSchema::bool().optional(),
        ),
        (
            "description",
            FieldSchema::string()
                .describe("Description of the environment")
                .optional(),
        ),
        (
            "id",
            FieldSchema::string()
                .describe("ID of the environment")
                .computed(),
        ),
        (
            "name",
            FieldSchema::string()
                .describe("Name of the environment")
                .required()
                .validated(string_is_not_empty),
        ),
        ("sort_order", FieldSchema::int().computed()),
        ("use_guided_failure", FieldSchema::bool().optional()),
    ])
}

pub fn get_environment_data_schema() -> SchemaMap {
    SchemaMap::from([
        (
            "environments",
            FieldSchema::nested_list(computed_only(get_environment_schema())).computed(),
        ),
        ("id", FieldSchema::string().computed()),
        (
            "ids",
            FieldSchema::string_list()
                .describe("Query and/or search by a list of IDs")
                .optional(),
        ),
        (
            "name",
            FieldSchema::string()
                .describe("Query and/or search by name")
                .optional(),
        ),
        (
            "partial_name",
            FieldSchema::string()
                .describe("Query and/or search by partial name")
                .optional(),
        ),
        (
            "skip",
            FieldSchema::int()
                .describe("Indicates the number of items to skip in the response")
                .optional()
                .with_default(FieldDefault::Int(0)),
        ),
        (
            "take",
            FieldSchema::int()
                .describe("Indicates the number of items to take (or return) in the response")
                .optional()
                .with_default(FieldDefault::Int(1)),
        ),
    ])
}

impl<'a> WithSchema for EnvironmentState<'a> {
    fn fields() -> SchemaMap {
        get_environment_schema()
    }

    fn schema() -> Schema {
        to_schema("Manages an environment in Octopus Deploy.", &Self::fields())
    }
}

impl<'a> WithValidate for EnvironmentState<'a> {
    fn validate(&self, diags: &mut Diagnostics) {
        Self::fields()["name"].check_string(diags, "name", &self.name);
    }
}

impl<'a> WithSchema for EnvironmentsState<'a> {
    fn fields() -> SchemaMap {
        get_environment_data_schema()
    }

    fn schema() -> Schema {
        to_schema(
            "Provides information about existing environments.",
            &Self::fields(),
        )
    }
}
