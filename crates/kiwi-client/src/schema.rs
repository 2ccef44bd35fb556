use std::collections::HashMap;

use cynic_introspection::{Schema, Type};
use cynic_parser::executable::{iter::Iter, Selection};

use crate::{query::Query, SchemaError};

/// The parts of an introspected schema needed to check the fixed queries: for every object and
/// interface type, the named type of each of its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex {
    query_type: String,
    types: HashMap<String, HashMap<String, String>>,
}

impl SchemaIndex {
    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    /// The named type of `type_name.field`, without list or non-null wrappers.
    pub fn field_type(&self, type_name: &str, field: &str) -> Option<&str> {
        self.types.get(type_name)?.get(field).map(String::as_str)
    }

    pub fn has_field(&self, type_name: &str, field: &str) -> bool {
        self.field_type(type_name, field).is_some()
    }

    /// Checks that every field selected by `query` exists on the type it is selected from.
    pub(crate) fn validate(&self, query: &Query) -> Result<(), SchemaError> {
        let document =
            cynic_parser::parse_executable_document(query.document).map_err(|error| SchemaError::InvalidQuery {
                operation: query.operation_name,
                message: error.to_string(),
            })?;

        for operation in document.operations() {
            self.validate_selections(&self.query_type, operation.selection_set())?;
        }

        Ok(())
    }

    fn validate_selections(&self, type_name: &str, selections: Iter<'_, Selection<'_>>) -> Result<(), SchemaError> {
        let fields = self
            .types
            .get(type_name)
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_owned()))?;

        for selection in selections {
            // the fixed queries only select plain fields
            let Selection::Field(field) = selection else {
                continue;
            };

            let field_type = fields.get(field.name()).ok_or_else(|| SchemaError::UnknownField {
                type_name: type_name.to_owned(),
                field: field.name().to_owned(),
            })?;

            if field.selection_set().next().is_some() {
                self.validate_selections(field_type, field.selection_set())?;
            }
        }

        Ok(())
    }
}

impl From<Schema> for SchemaIndex {
    fn from(schema: Schema) -> Self {
        let types = schema
            .types
            .into_iter()
            .filter_map(|ty| match ty {
                Type::Object(object) => Some((object.name, object.fields)),
                Type::Interface(interface) => Some((interface.name, interface.fields)),
                _ => None,
            })
            .map(|(name, fields)| {
                let fields = fields.into_iter().map(|field| (field.name, field.ty.name)).collect();
                (name, fields)
            })
            .collect();

        Self {
            query_type: schema.query_type,
            types,
        }
    }
}

#[cfg(test)]
impl SchemaIndex {
    pub(crate) fn from_types(query_type: &str, types: &[(&str, &[(&str, &str)])]) -> Self {
        let types = types
            .iter()
            .map(|(name, fields)| {
                let fields = fields
                    .iter()
                    .map(|(field, ty)| ((*field).to_owned(), (*ty).to_owned()))
                    .collect();
                ((*name).to_owned(), fields)
            })
            .collect();

        Self {
            query_type: query_type.to_owned(),
            types,
        }
    }
}
