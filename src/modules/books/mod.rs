pub mod entity;
pub mod models;
pub mod repo;
pub mod routes;
pub mod schema;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{AppState, InitCtx, Migration, Module};
use sea_orm::ConnectionTrait;
use serde_json::json;

/// Book catalogue: CRUD over the `books` table, keyed by isbn
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = ?ctx.db.get_database_backend(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self, state: AppState) -> Router {
        routes::router(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let isbn_param = json!({
            "name": "isbn",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": json_response("All books", "#/components/schemas/BookList"),
                            "500": error_response("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": json_body("#/components/schemas/NewBook"),
                        "responses": {
                            "201": json_response("Created book", "#/components/schemas/BookEnvelope"),
                            "400": error_response("Invalid or missing fields"),
                            "500": error_response("Internal server error")
                        }
                    }
                },
                "/{isbn}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [isbn_param.clone()],
                        "responses": {
                            "200": json_response("The book", "#/components/schemas/BookEnvelope"),
                            "404": error_response("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "parameters": [isbn_param.clone()],
                        "requestBody": json_body("#/components/schemas/BookPatch"),
                        "responses": {
                            "200": json_response("Updated book", "#/components/schemas/BookEnvelope"),
                            "400": error_response("isbn present in body or invalid fields"),
                            "404": error_response("Book not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [isbn_param],
                        "responses": {
                            "200": json_response("Deletion confirmation", "#/components/schemas/Message"),
                            "404": error_response("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": book_schema(true),
                    "NewBook": book_schema(true),
                    "BookPatch": book_schema(false),
                    "BookEnvelope": {
                        "type": "object",
                        "properties": { "book": { "$ref": "#/components/schemas/Book" } },
                        "required": ["book"]
                    },
                    "BookList": {
                        "type": "object",
                        "properties": {
                            "books": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["books"]
                    },
                    "Message": {
                        "type": "object",
                        "properties": { "message": { "type": "string" } },
                        "required": ["message"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    isbn       TEXT PRIMARY KEY,
                    amazon_url TEXT NOT NULL,
                    author     TEXT NOT NULL,
                    language   TEXT NOT NULL,
                    pages      INTEGER NOT NULL,
                    publisher  TEXT NOT NULL,
                    title      TEXT NOT NULL,
                    year       INTEGER NOT NULL
                );
                "#,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// `full` adds the isbn key and marks every field required
fn book_schema(full: bool) -> serde_json::Value {
    let mut properties = json!({
        "amazon_url": { "type": "string" },
        "author": { "type": "string" },
        "language": { "type": "string" },
        "pages": { "type": "integer", "format": "int32" },
        "publisher": { "type": "string" },
        "title": { "type": "string" },
        "year": { "type": "integer", "format": "int32" }
    });
    if full {
        properties["isbn"] = json!({ "type": "string", "description": "Primary key" });
    }

    let mut schema = json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": false
    });
    if full {
        schema["required"] = json!([
            "isbn", "amazon_url", "author", "language", "pages", "publisher", "title", "year"
        ]);
    }
    schema
}

fn json_body(schema_ref: &str) -> serde_json::Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": schema_ref } } }
    })
}

fn json_response(description: &str, schema_ref: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": schema_ref } } }
    })
}

fn error_response(description: &str) -> serde_json::Value {
    json_response(description, "#/components/schemas/ErrorResponse")
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
