//! Schema - Describe the attributes of a resource type
//!
//! Providers publish a schema per resource type so the host (and the differ)
//! know which attributes are server-assigned and which ones cannot change
//! after creation.

use std::collections::HashMap;
use std::fmt;

/// Attribute type
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Int,
    Bool,
    /// Enum (list of allowed values, compared case-insensitively)
    Enum(Vec<String>),
    /// Nested block with its own attributes
    Block(Vec<AttributeSchema>),
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => write!(f, "String"),
            AttributeType::Int => write!(f, "Int"),
            AttributeType::Bool => write!(f, "Bool"),
            AttributeType::Enum(variants) => write!(f, "Enum({})", variants.join(" | ")),
            AttributeType::Block(_) => write!(f, "Block"),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Filled in by the remote system when left unset
    pub computed: bool,
    /// Cannot be changed after creation; a change requires replacement
    pub force_new: bool,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            force_new: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Resource schema
#[derive(Debug, Clone, Default)]
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

    /// Look up an attribute by dotted path (e.g., "a_end.product_uid")
    pub fn lookup(&self, path: &str) -> Option<&AttributeSchema> {
        let mut segments = path.split('.');
        let mut current = self.attributes.get(segments.next()?)?;
        for segment in segments {
            let AttributeType::Block(children) = &current.attr_type else {
                return None;
            };
            current = children.iter().find(|c| c.name == segment)?;
        }
        Some(current)
    }

    /// Whether changing the attribute at `path` forces replacement
    pub fn is_force_new(&self, path: &str) -> bool {
        self.lookup(path).is_some_and(|a| a.force_new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection_schema() -> ResourceSchema {
        ResourceSchema::new("vxc")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(
                AttributeSchema::new(
                    "a_end",
                    AttributeType::Block(vec![
                        AttributeSchema::new("product_uid", AttributeType::String)
                            .required()
                            .force_new(),
                        AttributeSchema::new("vlan", AttributeType::Int).computed(),
                    ]),
                )
                .required(),
            )
    }

    #[test]
    fn lookup_nested_attribute() {
        let schema = connection_schema();
        let vlan = schema.lookup("a_end.vlan").unwrap();
        assert!(vlan.computed);
        assert!(schema.lookup("a_end.missing").is_none());
        assert!(schema.lookup("name.inner").is_none());
    }

    #[test]
    fn force_new_only_for_marked_paths() {
        let schema = connection_schema();
        assert!(schema.is_force_new("a_end.product_uid"));
        assert!(!schema.is_force_new("a_end.vlan"));
        assert!(!schema.is_force_new("name"));
        assert!(!schema.is_force_new("unknown"));
    }

    #[test]
    fn enum_display() {
        let t = AttributeType::Enum(vec!["private".to_string(), "public".to_string()]);
        assert_eq!(t.to_string(), "Enum(private | public)");
    }
}
