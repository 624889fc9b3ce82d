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
use std::fmt::{Display, Formatter};

use tf_provider::value::{Value, ValueList, ValueString};
use tf_provider::{Diagnostics, Schema};
use time::OffsetDateTime;

use crate::schema::SchemaMap;

pub(crate) trait WithSchema {
    fn fields() -> SchemaMap;
    fn schema() -> Schema;
}

pub(crate) trait WithValidate {
    fn validate(&self, diags: &mut Diagnostics);
}

pub(crate) trait WithNormalize {
    fn normalize(&mut self, diags: &mut Diagnostics);
}

/// Identifier for a list read by a data source.
///
/// Built from the current UTC time: it changes on every read and must not be
/// used to correlate results across runs.
pub(crate) fn synthetic_id(prefix: &str) -> String {
    format!("{prefix} {}", OffsetDateTime::now_utc())
}

pub(crate) fn expand_array(values: &ValueList<ValueString>) -> Vec<String> {
    values
        .as_ref_option()
        .into_iter()
        .flatten()
        .filter_map(|value| value.as_deref_option())
        .map(str::to_owned)
        .collect()
}

pub(crate) fn flatten_array<'a>(values: &[String]) -> ValueList<ValueString<'a>> {
    Value::Value(values.iter().map(|value| owned(value)).collect())
}

pub(crate) fn owned<'a>(value: &str) -> ValueString<'a> {
    Value::Value(Cow::Owned(value.to_owned()))
}

/// Displays a slice with its items separated by `sep`.
pub(crate) struct Joined<'a, T> {
    items: &'a [T],
    sep: &'a str,
}

pub(crate) fn joined<'a, T: Display>(items: &'a [T], sep: &'a str) -> Joined<'a, T> {
    Joined { items, sep }
}

impl<T: Display> Display for Joined<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut items = self.items.iter();
        if let Some(first) = items.next() {
            write!(f, "{first}")?;
        }
        items.try_for_each(|item| write!(f, "{}{item}", self.sep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_id_is_prefixed() {
        let id = synthetic_id("Environments");
        assert!(id.starts_with("Environments "));
        assert!(id.len() > "Environments ".len());
    }

    #[test]
    fn expand_array_skips_null_items() {
        let values = Value::Value(vec![
            Value::Value("Roles-1".into()),
            Value::Null,
            Value::Value("Roles-2".into()),
        ]);
        assert_eq!(expand_array(&values), ["Roles-1", "Roles-2"]);
        assert!(expand_array(&Value::Null).is_empty());
        assert!(expand_array(&Value::Unknown).is_empty());
    }

    #[test]
    fn joined_with_separator() {
        let ids = ["Environments-1", "Environments-2"];
        assert_eq!(joined(&ids, ",").to_string(), "Environments-1,Environments-2");
        assert_eq!(joined(&ids[..1], ",").to_string(), "Environments-1");
        assert_eq!(joined::<String>(&[], ",").to_string(), "");
    }
}
