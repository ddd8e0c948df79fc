//! Statically declared mapping schemas.
//!
//! A [`MappingSchema`] describes the fields of the documents stored in an
//! index. The facade turns it into the mapping [`Document`] sent to the engine:
//!
//! ```ignore
//! let schema = MappingSchema::new()
//!     .dynamic(DynamicMapping::Strict)
//!     .field(FieldMapping::keyword("order_id"))
//!     .field(FieldMapping::text("customer").sub_field(FieldMapping::keyword("raw")))
//!     .field(FieldMapping::new("placed_at", FieldType::Date).format("strict_date_time"));
//!
//! let mapping = schema.to_document()?;
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::document::Document;
use crate::errors::ModelError;

/// Engine field data types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Keyword,
    Long,
    Integer,
    Short,
    Byte,
    Double,
    Float,
    HalfFloat,
    ScaledFloat,
    Date,
    Boolean,
    Binary,
    Object,
    Nested,
    Ip,
    GeoPoint,
    SearchAsYouType,
    RankFeature,
    /// Any type name not listed above, sent verbatim.
    Custom(String),
}

impl FieldType {
    /// The type name as the engine spells it.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Long => "long",
            FieldType::Integer => "integer",
            FieldType::Short => "short",
            FieldType::Byte => "byte",
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::HalfFloat => "half_float",
            FieldType::ScaledFloat => "scaled_float",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Binary => "binary",
            FieldType::Object => "object",
            FieldType::Nested => "nested",
            FieldType::Ip => "ip",
            FieldType::GeoPoint => "geo_point",
            FieldType::SearchAsYouType => "search_as_you_type",
            FieldType::RankFeature => "rank_feature",
            FieldType::Custom(name) => name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the engine treats fields that are not declared in the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicMapping {
    True,
    False,
    Strict,
    Runtime,
}

impl DynamicMapping {
    /// The setting value as the engine reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            DynamicMapping::True => "true",
            DynamicMapping::False => "false",
            DynamicMapping::Strict => "strict",
            DynamicMapping::Runtime => "runtime",
        }
    }
}

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub name: String,
    pub field_type: FieldType,
    /// `Some(false)` makes the field stored but not searchable.
    pub index: Option<bool>,
    pub store: Option<bool>,
    pub analyzer: Option<String>,
    pub search_analyzer: Option<String>,
    /// Date format, only meaningful for `date` fields.
    pub format: Option<String>,
    /// Required by `scaled_float`.
    pub scaling_factor: Option<f64>,
    /// Multi-fields, emitted under `fields`.
    pub sub_fields: Vec<FieldMapping>,
    /// Inner properties of `object` and `nested` fields.
    pub properties: Vec<FieldMapping>,
}

impl FieldMapping {
    /// Declare a field of the given type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            index: None,
            store: None,
            analyzer: None,
            search_analyzer: None,
            format: None,
            scaling_factor: None,
            sub_fields: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Declare a `text` field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Declare a `keyword` field.
    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Keyword)
    }

    /// Declare an `object` field with the given inner properties.
    pub fn object(name: impl Into<String>, properties: Vec<FieldMapping>) -> Self {
        let mut field = Self::new(name, FieldType::Object);
        field.properties = properties;
        field
    }

    /// Declare a `nested` field with the given inner properties.
    pub fn nested(name: impl Into<String>, properties: Vec<FieldMapping>) -> Self {
        let mut field = Self::new(name, FieldType::Nested);
        field.properties = properties;
        field
    }

    /// Set whether the field is searchable.
    pub fn index(mut self, index: bool) -> Self {
        self.index = Some(index);
        self
    }

    /// Set whether the field value is stored separately from `_source`.
    pub fn store(mut self, store: bool) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the index-time analyzer.
    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    /// Set the search-time analyzer.
    pub fn search_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.search_analyzer = Some(analyzer.into());
        self
    }

    /// Set the date format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the scaling factor of a `scaled_float` field.
    pub fn scaling_factor(mut self, factor: f64) -> Self {
        self.scaling_factor = Some(factor);
        self
    }

    /// Add a multi-field.
    pub fn sub_field(mut self, field: FieldMapping) -> Self {
        self.sub_fields.push(field);
        self
    }

    /// Add an inner property.
    pub fn property(mut self, field: FieldMapping) -> Self {
        self.properties.push(field);
        self
    }

    fn to_value(&self) -> Result<Value, ModelError> {
        let mut body = Map::new();
        // The engine reports plain objects by their properties alone.
        let implicit_object =
            self.field_type == FieldType::Object && !self.properties.is_empty();
        if !implicit_object {
            body.insert("type".to_string(), json!(self.field_type.as_str()));
        }

        // Defaults (`index: true`, `store: false`) are dropped by the engine.
        if self.index == Some(false) {
            body.insert("index".to_string(), json!(false));
        }
        if self.store == Some(true) {
            body.insert("store".to_string(), json!(true));
        }
        if let Some(ref analyzer) = self.analyzer {
            body.insert("analyzer".to_string(), json!(analyzer));
        }
        if let Some(ref search_analyzer) = self.search_analyzer {
            body.insert("search_analyzer".to_string(), json!(search_analyzer));
        }
        if let Some(ref format) = self.format {
            body.insert("format".to_string(), json!(format));
        }

        match (&self.field_type, self.scaling_factor) {
            (FieldType::ScaledFloat, Some(factor)) => {
                body.insert("scaling_factor".to_string(), json!(factor));
            }
            (FieldType::ScaledFloat, None) => {
                return Err(ModelError::invalid_schema(format!(
                    "field '{}' is a scaled_float without a scaling_factor",
                    self.name
                )));
            }
            (_, Some(_)) => {
                return Err(ModelError::invalid_schema(format!(
                    "field '{}' has a scaling_factor but is not a scaled_float",
                    self.name
                )));
            }
            (_, None) => {}
        }

        if !self.sub_fields.is_empty() {
            body.insert(
                "fields".to_string(),
                Value::Object(properties_map(&self.sub_fields)?),
            );
        }

        if !self.properties.is_empty() {
            if !matches!(self.field_type, FieldType::Object | FieldType::Nested) {
                return Err(ModelError::invalid_schema(format!(
                    "field '{}' of type {} cannot have inner properties",
                    self.name, self.field_type
                )));
            }
            body.insert(
                "properties".to_string(),
                Value::Object(properties_map(&self.properties)?),
            );
        }

        Ok(Value::Object(body))
    }
}

/// The full set of field declarations for one index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingSchema {
    fields: Vec<FieldMapping>,
    dynamic: Option<DynamicMapping>,
}

impl MappingSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level field.
    pub fn field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the dynamic mapping policy.
    pub fn dynamic(mut self, dynamic: DynamicMapping) -> Self {
        self.dynamic = Some(dynamic);
        self
    }

    /// The declared top-level fields.
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the mapping document sent to the engine.
    ///
    /// Fails on empty or duplicate field names and on type-specific
    /// parameters used with the wrong type.
    pub fn to_document(&self) -> Result<Document, ModelError> {
        let mut document = Document::new();
        if let Some(dynamic) = self.dynamic {
            document.insert("dynamic", dynamic.as_str());
        }
        document.insert("properties", Value::Object(properties_map(&self.fields)?));
        Ok(document)
    }
}

fn properties_map(fields: &[FieldMapping]) -> Result<Map<String, Value>, ModelError> {
    let mut seen = HashSet::new();
    let mut properties = Map::new();

    for field in fields {
        if field.name.trim().is_empty() {
            return Err(ModelError::invalid_schema("field name must not be empty"));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ModelError::invalid_schema(format!(
                "duplicate field '{}'",
                field.name
            )));
        }
        properties.insert(field.name.clone(), field.to_value()?);
    }

    Ok(properties)
}
