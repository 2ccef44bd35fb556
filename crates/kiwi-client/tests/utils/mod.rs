//! A mock Kiwi server: answers introspection with a small version of the Kiwi schema and lets
//! every test mount its own query responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockBuilder, MockServer, ResponseTemplate,
};

pub const GRAPHQL_PATH: &str = "/api/graphql/";
pub const TOKEN: &str = "s3cr3t";
pub const SESSION_COOKIE: &str = "KIWI_PHPSESSID=s3cr3t";

/// `(type, [(field, field type, is list)])`
type ObjectDefinition = (&'static str, &'static [(&'static str, &'static str, bool)]);

const KIWI_OBJECTS: &[ObjectDefinition] = &[
    (
        "Query",
        &[
            ("current", "Activity", true),
            ("groups", "Group", true),
            ("user", "User", false),
        ],
    ),
    (
        "Activity",
        &[
            ("name", "String", false),
            ("description", "String", false),
            ("start", "DateTime", false),
            ("author", "Group", false),
            ("location", "Location", false),
            ("registrations", "Registration", true),
        ],
    ),
    (
        "Registration",
        &[
            ("created", "DateTime", false),
            ("deleted", "DateTime", false),
            ("activity", "Activity", false),
            ("option", "RegistrationOption", false),
        ],
    ),
    ("RegistrationOption", &[("name", "String", false), ("price", "Float", false)]),
    ("Location", &[("address", "String", false)]),
    ("Group", &[("name", "String", false)]),
    ("Relation", &[("group", "Group", false)]),
    (
        "User",
        &[
            ("isAdmin", "Boolean", false),
            ("relations", "Relation", true),
            ("registrations", "Registration", true),
        ],
    ),
];

const SCALARS: &[&str] = &["String", "Boolean", "Float", "DateTime"];

fn named_type(name: &str) -> Value {
    let kind = if SCALARS.contains(&name) { "SCALAR" } else { "OBJECT" };

    json!({ "kind": kind, "name": name, "ofType": null })
}

fn field((name, ty, is_list): &(&str, &str, bool)) -> Value {
    let ty = if *is_list {
        json!({ "kind": "LIST", "name": null, "ofType": named_type(ty) })
    } else {
        named_type(ty)
    };

    json!({
        "name": name,
        "description": null,
        "args": [],
        "type": ty,
        "isDeprecated": false,
        "deprecationReason": null
    })
}

fn object(name: &str, fields: Vec<Value>) -> Value {
    json!({
        "kind": "OBJECT",
        "name": name,
        "description": null,
        "fields": fields,
        "inputFields": null,
        "interfaces": [],
        "enumValues": null,
        "possibleTypes": null
    })
}

fn scalar(name: &&str) -> Value {
    json!({
        "kind": "SCALAR",
        "name": name,
        "description": null,
        "fields": null,
        "inputFields": null,
        "interfaces": null,
        "enumValues": null,
        "possibleTypes": null
    })
}

/// The introspection response of a Kiwi server, leaving out the fields in `without`
/// (as `Type.field`).
pub fn introspection_without(without: &[&str]) -> Value {
    let objects = KIWI_OBJECTS.iter().map(|(name, fields)| {
        let fields = fields
            .iter()
            .filter(|(field, _, _)| !without.contains(&format!("{name}.{field}").as_str()))
            .map(field)
            .collect();

        object(name, fields)
    });

    let types = objects.chain(SCALARS.iter().map(scalar)).collect::<Vec<_>>();

    json!({
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": null,
                "types": types,
                "directives": []
            }
        }
    })
}

pub fn introspection() -> Value {
    introspection_without(&[])
}

/// Starts a server answering introspection requests with the Kiwi schema.
pub async fn kiwi_server() -> MockServer {
    let server = MockServer::start().await;
    mount_introspection(&server, introspection()).await;
    server
}

/// Matches the schema introspection request.
pub fn introspection_request() -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("__schema"))
}

pub async fn mount_introspection(server: &MockServer, response: Value) {
    introspection_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

/// Matches the query named `operation`.
pub fn query(operation: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(format!("query {operation} ")))
}

/// A successful GraphQL response carrying `data`.
pub fn data(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}
