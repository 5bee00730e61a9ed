//! Schema - Define attribute schemas for data sources
//!
//! Providers declare which attributes a data source accepts and which it
//! computes, so configurations can be checked before a read.

use std::collections::HashMap;

use crate::resource::Value;

/// Schema error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Attribute '{name}' is computed and cannot be configured")]
    ComputedOnly { name: String },
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub required: bool,
    pub optional: bool,
    /// Set by the provider during a read
    pub computed: bool,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            optional: false,
            computed: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Whether a configuration may set this attribute
    pub fn is_configurable(&self) -> bool {
        self.required || self.optional
    }
}

/// Data source schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate configured attributes
    ///
    /// Errors are sorted by attribute name so reports are stable.
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) {
                errors.push((name.clone(), TypeError::MissingRequired { name: name.clone() }));
            }
        }

        for name in attributes.keys() {
            match self.attributes.get(name) {
                None => {
                    errors.push((name.clone(), TypeError::UnknownAttribute { name: name.clone() }))
                }
                Some(schema) if !schema.is_configurable() => {
                    errors.push((name.clone(), TypeError::ComputedOnly { name: name.clone() }))
                }
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            errors.sort_by(|a, b| a.0.cmp(&b.0));
            Err(errors.into_iter().map(|(_, e)| e).collect())
        }
    }
}
