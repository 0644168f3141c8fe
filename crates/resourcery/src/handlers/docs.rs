//! API documentation endpoints.
//!
//! Serves a hand-maintained OpenAPI 3.0 document plus a minimal HTML page
//! linking to it. The document is assembled as plain JSON; no derive-based
//! schema registry is involved.

use axum::{response::Html, Json};
use serde_json::{json, Value};

/// GET /api/v1/docs - documentation landing page.
pub async fn api_docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>resourcery API</title>
    <style>
        body { font-family: sans-serif; max-width: 640px; margin: 40px auto; }
    </style>
</head>
<body>
    <h1>resourcery API v1</h1>
    <p>A CRUD backend for resources with a write-through cached repository.</p>
    <p><a href="/api/v1/openapi.json">View OpenAPI Specification</a></p>
</body>
</html>
"#,
    )
}

/// GET /api/v1/openapi.json - OpenAPI 3.0 document.
pub async fn openapi_spec() -> Json<Value> {
    Json(openapi_document())
}

fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "resourcery API",
            "version": "1.0.0",
            "description": "CRUD API over a single resource entity, backed by a relational store with a write-through cache."
        },
        "components": {
            "securitySchemes": {
                "bearerAuth": {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT"
                }
            },
            "schemas": {
                "Resource": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "title": { "type": "string" },
                        "content": { "type": "string", "nullable": true },
                        "created": { "type": "string", "format": "date-time" },
                        "modified": { "type": "string", "format": "date-time" }
                    },
                    "required": ["id", "title", "created", "modified"]
                },
                "CreateResource": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "content": { "type": "string" }
                    },
                    "required": ["title", "content"]
                },
                "UpdateResource": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "content": { "type": "string" }
                    }
                },
                "TokenPair": {
                    "type": "object",
                    "properties": {
                        "access_token": { "type": "string" },
                        "refresh_token": { "type": "string" }
                    },
                    "required": ["access_token", "refresh_token"]
                },
                "Error": {
                    "type": "object",
                    "properties": {
                        "error": { "type": "string", "example": "NotFoundError" },
                        "message": { "type": "string" }
                    },
                    "required": ["error", "message"]
                }
            }
        },
        "paths": {
            "/api/v1/resources": {
                "get": {
                    "description": "List resources. Pagination applies only while the list cache is cold.",
                    "parameters": [
                        { "in": "query", "name": "page", "schema": { "type": "integer", "minimum": 1 } },
                        { "in": "query", "name": "per_page", "schema": { "type": "integer", "minimum": 1 } }
                    ],
                    "responses": {
                        "200": {
                            "description": "List of resources",
                            "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Resource" } } } }
                        }
                    },
                    "tags": ["Resource"]
                },
                "post": {
                    "description": "Create a resource",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/CreateResource" } } }
                    },
                    "responses": {
                        "201": {
                            "description": "The created resource",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Resource" } } }
                        },
                        "400": {
                            "description": "Validation failure",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
                        }
                    },
                    "tags": ["Resource"]
                }
            },
            "/api/v1/resources/{id}": {
                "get": {
                    "description": "Get a resource by id",
                    "parameters": [
                        { "in": "path", "name": "id", "required": true, "schema": { "type": "string", "format": "uuid" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "The resource",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Resource" } } }
                        },
                        "404": {
                            "description": "Not found",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
                        }
                    },
                    "tags": ["Resource"]
                },
                "patch": {
                    "description": "Partially update a resource",
                    "security": [{ "bearerAuth": [] }],
                    "parameters": [
                        { "in": "path", "name": "id", "required": true, "schema": { "type": "string", "format": "uuid" } }
                    ],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/UpdateResource" } } }
                    },
                    "responses": {
                        "200": {
                            "description": "The updated resource",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Resource" } } }
                        },
                        "401": { "description": "Missing bearer token" },
                        "404": { "description": "Not found" }
                    },
                    "tags": ["Resource"]
                },
                "delete": {
                    "description": "Delete a resource",
                    "security": [{ "bearerAuth": [] }],
                    "parameters": [
                        { "in": "path", "name": "id", "required": true, "schema": { "type": "string", "format": "uuid" } }
                    ],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "401": { "description": "Missing bearer token" },
                        "404": { "description": "Not found" }
                    },
                    "tags": ["Resource"]
                }
            },
            "/api/v1/tokens": {
                "get": {
                    "description": "Issue an access/refresh token pair",
                    "responses": {
                        "200": {
                            "description": "A fresh token pair",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TokenPair" } } }
                        }
                    },
                    "tags": ["Auth"]
                }
            },
            "/api/v1/tokens/refresh": {
                "get": {
                    "description": "Exchange a refresh token for a new pair",
                    "parameters": [
                        { "in": "query", "name": "refresh_token", "required": true, "schema": { "type": "string" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "A fresh token pair",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TokenPair" } } }
                        },
                        "400": { "description": "Invalid or non-refresh token" }
                    },
                    "tags": ["Auth"]
                }
            },
            "/api/v1/healthz": {
                "get": {
                    "description": "Liveness probe",
                    "responses": { "200": { "description": "Alive" } },
                    "tags": ["Health"]
                }
            },
            "/api/v1/readyz": {
                "get": {
                    "description": "Readiness probe reporting store and cache status",
                    "responses": {
                        "200": { "description": "Ready" },
                        "503": { "description": "Store unreachable" }
                    },
                    "tags": ["Health"]
                }
            }
        }
    })
}
