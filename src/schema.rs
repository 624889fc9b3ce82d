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

//! Field metadata for resources and data sources.
//!
//! `tf_provider::Attribute` only describes what Terraform sees on the wire.
//! Defaults and validators are kept here alongside it so that a
//! data source can be derived from a resource schema by stripping them.

use std::collections::{BTreeMap, HashMap};

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description};
use tf_provider::value::{Value, ValueNumber, ValueString};
use tf_provider::{AttributePath, Diagnostics, Schema};

pub type SchemaMap = BTreeMap<&'static str, FieldSchema>;

pub type StringValidator = fn(&str) -> Result<(), String>;

#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Int,
    Bool,
    List(Box<FieldType>),
    /// List of nested objects
    Nested(SchemaMap),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    #[default]
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    Int(i64),
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field_type: FieldType,
    pub description: Option<&'static str>,
    pub presence: Presence,
    pub default: Option<FieldDefault>,
    pub sensitive: bool,
    pub validate: Option<StringValidator>,
}

impl FieldSchema {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            description: None,
            presence: Presence::Computed,
            default: None,
            sensitive: false,
            validate: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    pub fn int() -> Self {
        Self::new(FieldType::Int)
    }

    pub fn bool() -> Self {
        Self::new(FieldType::Bool)
    }

    pub fn string_list() -> Self {
        Self::new(FieldType::List(Box::new(FieldType::String)))
    }

    pub fn nested_list(schema: SchemaMap) -> Self {
        Self::new(FieldType::Nested(schema))
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn computed(mut self) -> Self {
        self.presence = Presence::Computed;
        self
    }

    pub fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn validated(mut self, validate: StringValidator) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Read-only variant of the field: every mutability or validation
    /// annotation is cleared.
    pub fn into_computed(self) -> Self {
        Self {
            presence: Presence::Computed,
            default: None,
            validate: None,
            ..self
        }
    }

    pub fn attribute(&self) -> Attribute {
        Attribute {
            attr_type: self.field_type.attribute_type(),
            description: Description::plain(self.description.unwrap_or_default()),
            constraint: match self.presence {
                Presence::Required => AttributeConstraint::Required,
                Presence::Optional => AttributeConstraint::Optional,
                Presence::Computed => AttributeConstraint::Computed,
            },
            sensitive: self.sensitive,
            ..Default::default()
        }
    }

    pub fn default_int(&self) -> Option<i64> {
        match self.default {
            Some(FieldDefault::Int(value)) => Some(value),
            None => None,
        }
    }

    /// Run the field validator against a known value
    pub fn check_string(&self, diags: &mut Diagnostics, name: &'static str, value: &ValueString) {
        let (Some(validate), Value::Value(value)) = (self.validate, value) else {
            return;
        };
        if let Err(detail) = validate(value) {
            diags.error(
                format!("Invalid value for `{name}`"),
                detail,
                AttributePath::new(name),
            );
        }
    }
}

impl FieldType {
    fn attribute_type(&self) -> AttributeType {
        match self {
            FieldType::String => AttributeType::String,
            FieldType::Int => AttributeType::Number,
            FieldType::Bool => AttributeType::Bool,
            FieldType::List(inner) => AttributeType::List(Box::new(inner.attribute_type())),
            FieldType::Nested(schema) => AttributeType::AttributeList(attributes(schema)),
        }
    }
}

/// Derive the query form of a schema: every field becomes computed only.
pub fn computed_only(schema: SchemaMap) -> SchemaMap {
    schema
        .into_iter()
        .map(|(name, field)| (name, field.into_computed()))
        .collect()
}

pub fn attributes(schema: &SchemaMap) -> HashMap<String, Attribute> {
    schema
        .iter()
        .map(|(name, field)| (name.to_string(), field.attribute()))
        .collect()
}

pub fn to_schema(description: &'static str, schema: &SchemaMap) -> Schema {
    Schema {
        version: 1,
        block: Block {
            attributes: attributes(schema),
            description: Description::plain(description),
            ..Default::default()
        },
    }
}

/// Replace a null number with the field default, if it has one
pub fn fill_default_int(value: &mut ValueNumber, schema: &SchemaMap, name: &str) {
    if value.is_null() {
        if let Some(default) = schema.get(name).and_then(FieldSchema::default_int) {
            *value = Value::Value(default);
        }
    }
}

pub fn string_is_not_empty(value: &str) -> Result<(), String> {
    if value.is_empty() {
        Err("expected a non-empty string".to_owned())
    } else {
        Ok(())
    }
}
