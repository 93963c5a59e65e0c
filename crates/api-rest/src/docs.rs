//! OpenAPI document and contract snippets.
//!
//! [`ApiDoc`] describes every route, parameter and response field. Contract
//! snippets are derived from that document, one per beer operation, and can
//! be written to disk with [`write_snippets`] for publishing alongside the
//! rendered API docs.

use crate::error::ErrorResponse;
use crate::routes::{
    health::{self, HealthResponse, ReadinessChecks, ReadinessResponse},
    v1::beers,
};
use brewery_application::BeerDto;
use brewery_domain::BeerStyle;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use utoipa::openapi::schema::{AllOfBuilder, Ref, Schema};
use utoipa::openapi::RefOr;
use utoipa::{Modify, OpenApi};

/// Path prefix of the operations that get a contract snippet
const SNIPPET_PATH_PREFIX: &str = "/api/v1/beer";

/// Directory, relative to the output root, holding the beer snippets
const SNIPPET_DIR: &str = "v1/beer";

const HTTP_METHODS: [&str; 5] = ["get", "post", "put", "patch", "delete"];

/// OpenAPI document for the Brewery API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brewery API",
        version = "1.0.0",
        description = "Create, read and update beers in the brewery inventory",
        license(name = "MIT"),
    ),
    paths(
        beers::get_beer_by_id,
        beers::save_new_beer,
        beers::update_beer_by_id,
        health::health,
        health::ready,
    ),
    components(schemas(
        BeerDto,
        BeerStyle,
        ErrorResponse,
        HealthResponse,
        ReadinessResponse,
        ReadinessChecks,
    )),
    tags(
        (name = "beer", description = "Beer inventory"),
        (name = "health", description = "Health check endpoints"),
    ),
    modifiers(&BeerStyleField)
)]
pub struct ApiDoc;

/// Gives `BeerDto.beerStyle` its own description.
///
/// The derive emits a bare `$ref` for enum fields, which carries no
/// description of its own.
struct BeerStyleField;

impl Modify for BeerStyleField {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let Some(components) = openapi.components.as_mut() else {
            return;
        };
        if let Some(RefOr::T(Schema::Object(beer))) = components.schemas.get_mut("BeerDto") {
            let style = AllOfBuilder::new()
                .item(Ref::from_schema_name("BeerStyle"))
                .description(Some("Beer Style"))
                .build();
            beer.properties
                .insert("beerStyle".to_string(), RefOr::T(Schema::AllOf(style)));
        }
    }
}

/// Errors raised while generating documentation output
#[derive(Debug, Error)]
pub enum DocsError {
    /// The document could not be serialized
    #[error("Failed to serialize API document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A snippet file could not be written
    #[error("Failed to write {path}: {source}")]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// One documented request or response field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Wire name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Whether the field must be present
    pub required: bool,
}

/// Contract of a single operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSnippet {
    /// Operation id, also the snippet file name
    pub operation: String,
    /// HTTP method, upper case
    pub method: String,
    /// Path template
    pub path: String,
    /// Path parameters
    pub path_parameters: Vec<FieldDescriptor>,
    /// Query parameters
    pub query_parameters: Vec<FieldDescriptor>,
    /// Fields of the JSON request body
    pub request_fields: Vec<FieldDescriptor>,
    /// Fields of the JSON success body
    pub response_fields: Vec<FieldDescriptor>,
    /// Documented status codes and their descriptions
    pub responses: BTreeMap<String, String>,
}

impl ContractSnippet {
    /// Names of the documented response fields
    pub fn response_field_names(&self) -> BTreeSet<&str> {
        self.response_fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// The OpenAPI document as JSON
pub fn openapi_json() -> Result<Value, DocsError> {
    Ok(serde_json::to_value(ApiDoc::openapi())?)
}

/// Derive a contract snippet for every beer operation
pub fn contract_snippets() -> Result<Vec<ContractSnippet>, DocsError> {
    let doc = openapi_json()?;
    Ok(snippets_from(&doc))
}

/// Write `openapi.json` and one `v1/beer/<operation>.json` per operation
/// under `dir`, returning the files written.
pub fn write_snippets(dir: &Path) -> Result<Vec<PathBuf>, DocsError> {
    let doc = openapi_json()?;
    let snippet_dir = dir.join(SNIPPET_DIR);
    fs::create_dir_all(&snippet_dir).map_err(|source| DocsError::Io {
        path: snippet_dir.clone(),
        source,
    })?;

    let mut written = Vec::new();

    let openapi_path = dir.join("openapi.json");
    write_json(&openapi_path, &doc)?;
    written.push(openapi_path);

    for snippet in snippets_from(&doc) {
        let path = snippet_dir.join(format!("{}.json", snippet.operation));
        write_json(&path, &serde_json::to_value(&snippet)?)?;
        written.push(path);
    }

    Ok(written)
}

fn write_json(path: &Path, value: &Value) -> Result<(), DocsError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).map_err(|source| DocsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn snippets_from(doc: &Value) -> Vec<ContractSnippet> {
    let schemas = doc
        .pointer("/components/schemas")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut snippets = Vec::new();
    for (path, item) in paths {
        if !path.starts_with(SNIPPET_PATH_PREFIX) {
            continue;
        }
        for method in HTTP_METHODS {
            let Some(operation) = item.get(method) else {
                continue;
            };
            let Some(operation_id) = operation.get("operationId").and_then(Value::as_str) else {
                continue;
            };

            snippets.push(ContractSnippet {
                operation: operation_id.to_string(),
                method: method.to_uppercase(),
                path: path.clone(),
                path_parameters: parameters(operation, "path"),
                query_parameters: parameters(operation, "query"),
                request_fields: operation
                    .pointer("/requestBody/content/application~1json/schema")
                    .map(|schema| fields(schema, &schemas))
                    .unwrap_or_default(),
                response_fields: success_schema(operation)
                    .map(|schema| fields(schema, &schemas))
                    .unwrap_or_default(),
                responses: responses(operation),
            });
        }
    }

    snippets.sort_by(|a, b| a.operation.cmp(&b.operation));
    snippets
}

fn parameters(operation: &Value, location: &str) -> Vec<FieldDescriptor> {
    operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter(|p| p.get("in").and_then(Value::as_str) == Some(location))
                .map(|p| FieldDescriptor {
                    name: text(p, "name"),
                    description: text(p, "description"),
                    required: p.get("required").and_then(Value::as_bool).unwrap_or(false),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn responses(operation: &Value) -> BTreeMap<String, String> {
    operation
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(status, response)| (status.clone(), text(response, "description")))
                .collect()
        })
        .unwrap_or_default()
}

fn success_schema(operation: &Value) -> Option<&Value> {
    let responses = operation.get("responses")?.as_object()?;
    responses
        .iter()
        .filter(|(status, _)| status.starts_with('2'))
        .find_map(|(_, response)| response.pointer("/content/application~1json/schema"))
}

fn fields(schema: &Value, schemas: &Map<String, Value>) -> Vec<FieldDescriptor> {
    let Some(object) = resolve(schema, schemas) else {
        return Vec::new();
    };

    let required: BTreeSet<&str> = object
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    object
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, property)| FieldDescriptor {
                    name: name.clone(),
                    description: describe(property, schemas),
                    required: required.contains(name.as_str()),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Follow `$ref` links into `components/schemas`
fn resolve<'a>(schema: &'a Value, schemas: &'a Map<String, Value>) -> Option<&'a Value> {
    let mut current = schema;
    // Bounded so a self-referencing schema cannot loop forever.
    for _ in 0..8 {
        match current.get("$ref").and_then(Value::as_str) {
            Some(reference) => {
                let name = reference.rsplit('/').next()?;
                current = schemas.get(name)?;
            }
            None => return Some(current),
        }
    }
    None
}

/// Description of a property, falling back to the schema it refers to
fn describe(property: &Value, schemas: &Map<String, Value>) -> String {
    if let Some(description) = property.get("description").and_then(Value::as_str) {
        return description.to_string();
    }

    let composed = ["allOf", "oneOf", "anyOf"]
        .iter()
        .filter_map(|key| property.get(*key).and_then(Value::as_array))
        .flatten();
    for part in composed {
        let described = describe(part, schemas);
        if !described.is_empty() {
            return described;
        }
    }

    match property.get("$ref") {
        Some(_) => resolve(property, schemas)
            .map(|target| text(target, "description"))
            .unwrap_or_default(),
        None => String::new(),
    }
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(operation: &str) -> ContractSnippet {
        contract_snippets()
            .unwrap()
            .into_iter()
            .find(|s| s.operation == operation)
            .unwrap_or_else(|| panic!("missing snippet {}", operation))
    }

    #[test]
    fn test_one_snippet_per_beer_operation() {
        let operations: Vec<_> = contract_snippets()
            .unwrap()
            .into_iter()
            .map(|s| (s.operation, s.method))
            .collect();

        assert_eq!(
            operations,
            vec![
                ("get-beer".to_string(), "GET".to_string()),
                ("new-beer".to_string(), "POST".to_string()),
                ("update-beer".to_string(), "PUT".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_documents_parameters() {
        let get = snippet("get-beer");

        assert_eq!(get.path, "/api/v1/beer/{beerId}");
        assert_eq!(get.path_parameters.len(), 1);
        assert_eq!(get.path_parameters[0].name, "beerId");
        assert_eq!(get.path_parameters[0].description, "UUID of desired beer to get.");
        assert!(get.path_parameters[0].required);

        assert_eq!(get.query_parameters.len(), 1);
        assert_eq!(get.query_parameters[0].name, "iscold");
        assert_eq!(get.query_parameters[0].description, "Is Beer Cold Query param");
        assert!(!get.query_parameters[0].required);
    }

    #[test]
    fn test_get_documents_every_response_field() {
        let get = snippet("get-beer");
        let described: BTreeMap<_, _> = get
            .response_fields
            .iter()
            .map(|f| (f.name.as_str(), f.description.as_str()))
            .collect();

        assert_eq!(described.get("id"), Some(&"Id of Beer"));
        assert_eq!(described.get("version"), Some(&"Version number"));
        assert_eq!(described.get("createdDate"), Some(&"Date Created"));
        assert_eq!(described.get("lastModifiedDate"), Some(&"Date Updated"));
        assert_eq!(described.get("beerName"), Some(&"Beer Name"));
        assert_eq!(described.get("upc"), Some(&"UPC of Beer"));
        assert_eq!(described.get("price"), Some(&"Price"));
        assert_eq!(described.get("quantityOnHand"), Some(&"Quantity On Hand"));
        assert_eq!(described.get("beerStyle"), Some(&"Beer Style"));
        assert!(get.response_fields.iter().all(|f| !f.description.is_empty()));
    }

    #[test]
    fn test_post_documents_request_body_and_created() {
        let post = snippet("new-beer");

        assert_eq!(post.path, "/api/v1/beer/");
        let required: BTreeSet<_> = post
            .request_fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        assert!(required.contains("beerName"));
        assert!(required.contains("beerStyle"));
        assert!(required.contains("upc"));
        assert!(required.contains("price"));
        assert!(!required.contains("id"));

        assert!(post.response_fields.is_empty());
        assert!(post.responses.contains_key("201"));
        assert!(post.responses.contains_key("400"));
    }

    #[test]
    fn test_put_answers_no_content_or_not_found() {
        let put = snippet("update-beer");
        assert!(put.responses.contains_key("204"));
        assert!(put.responses.contains_key("404"));
        assert!(put.response_fields.is_empty());
    }

    #[test]
    fn test_beer_style_keeps_enum_reference() {
        let doc = openapi_json().unwrap();
        let style = doc
            .pointer("/components/schemas/BeerDto/properties/beerStyle")
            .unwrap();

        assert_eq!(style["description"], "Beer Style");
        assert_eq!(style["allOf"][0]["$ref"], "#/components/schemas/BeerStyle");
        let values = doc
            .pointer("/components/schemas/BeerStyle/enum")
            .and_then(Value::as_array)
            .unwrap();
        assert!(values.iter().any(|v| v == "ALE"));
    }

    #[test]
    fn test_resolve_follows_refs() {
        let mut schemas = Map::new();
        schemas.insert(
            "Thing".to_string(),
            serde_json::json!({"description": "A thing"}),
        );
        let reference = serde_json::json!({"$ref": "#/components/schemas/Thing"});

        assert_eq!(describe(&reference, &schemas), "A thing");
        let wrapped = serde_json::json!({"allOf": [reference]});
        assert_eq!(describe(&wrapped, &schemas), "A thing");
        assert!(resolve(&serde_json::json!({"$ref": "#/components/schemas/Missing"}), &schemas).is_none());
    }
}
