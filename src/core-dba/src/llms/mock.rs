//! Mock LLM provider for testing
//!
//! A configurable implementation of the `LlmProvider` trait that returns
//! predefined responses or errors without making real API calls, and counts
//! invocations so tests can assert how many upstream attempts were made.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::{Error, Result};
use crate::llms::LlmProvider;

/// Mock LLM provider for testing
///
/// Can be configured to:
/// - Return specific responses based on prompt content
/// - Return a default response for any prompt
/// - Simulate upstream failures
///
/// Every `complete_prompt` call, successful or not, increments the call
/// counter.
pub struct MockLlmProvider {
    /// Map of prompt substrings to responses.
    /// If the prompt contains the key, return the corresponding response.
    responses: HashMap<String, String>,
    /// Default response if no specific match found
    default_response: Option<String>,
    /// If true, always return an error
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockLlmProvider {
    /// Create a new empty mock provider
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: None,
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that returns a specific response when the prompt contains the given text
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider
            .responses
            .insert(prompt_contains.to_string(), response.to_string());
        provider
    }

    /// Create a mock with a default response for any prompt
    pub fn with_default(response: &str) -> Self {
        let mut provider = Self::new();
        provider.default_response = Some(response.to_string());
        provider
    }

    /// Create a mock that always fails with an upstream error
    pub fn with_failure() -> Self {
        let mut provider = Self::new();
        provider.should_fail = true;
        provider
    }

    /// Create a mock that answers every prompt with the complete blog
    /// bundle wrapped in a ```json fence, the way real models tend to reply.
    pub fn with_generated_schema() -> Self {
        Self::with_default(&sample_fenced_response())
    }

    /// Add a response mapping to this provider
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses.insert(prompt_contains.to_string(), response.to_string());
    }

    /// Number of `complete_prompt` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockLlmProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete_prompt(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(Error::Upstream("mock provider configured to fail".to_string()));
        }

        for (key, response) in &self.responses {
            if prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        if let Some(default) = &self.default_response {
            return Ok(default.clone());
        }

        Err(Error::Upstream(
            "mock provider has no response configured for this prompt".to_string(),
        ))
    }
}

//
// Test Fixtures
//

/// The documented example bundle: a "users" + "posts" blog schema with all
/// seven required keys.
pub fn sample_generated_schema_json() -> &'static str {
    r#"{
  "schema": {
    "users": {
      "id": "UUID, primary key",
      "username": "VARCHAR(50), unique, not null",
      "email": "VARCHAR(255), unique, not null",
      "created_at": "TIMESTAMP",
      "updated_at": "TIMESTAMP"
    },
    "posts": {
      "id": "UUID, primary key",
      "user_id": "UUID, foreign key -> users.id",
      "title": "VARCHAR(200), not null",
      "body": "TEXT",
      "created_at": "TIMESTAMP",
      "updated_at": "TIMESTAMP"
    }
  },
  "diagram": "erDiagram\n    USERS ||--o{ POSTS : writes",
  "postgresqlCode": "-- Users of the blog\nCREATE TABLE users (\n    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),\n    username VARCHAR(50) UNIQUE NOT NULL,\n    email VARCHAR(255) UNIQUE NOT NULL,\n    created_at TIMESTAMP DEFAULT now(),\n    updated_at TIMESTAMP DEFAULT now()\n);\n\n-- Posts written by users\nCREATE TABLE posts (\n    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),\n    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,\n    title VARCHAR(200) NOT NULL,\n    body TEXT,\n    created_at TIMESTAMP DEFAULT now(),\n    updated_at TIMESTAMP DEFAULT now()\n);",
  "mysqlCode": "-- Users of the blog\nCREATE TABLE users (\n    id CHAR(36) PRIMARY KEY DEFAULT (UUID()),\n    username VARCHAR(50) UNIQUE NOT NULL,\n    email VARCHAR(255) UNIQUE NOT NULL,\n    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP\n);\n\n-- Posts written by users\nCREATE TABLE posts (\n    id CHAR(36) PRIMARY KEY DEFAULT (UUID()),\n    user_id CHAR(36) NOT NULL,\n    title VARCHAR(200) NOT NULL,\n    body TEXT,\n    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,\n    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE\n);",
  "mongoDbSchema": "{\n  \"users\": { \"_id\": \"ObjectId\", \"username\": \"string\", \"email\": \"string\", \"posts\": [\"embedded documents\"] }\n}",
  "prismaSchema": "datasource db {\n  provider = \"postgresql\"\n  url      = env(\"DATABASE_URL\")\n}\n\ngenerator client {\n  provider = \"prisma-client-js\"\n}\n\nmodel User {\n  id        String   @id @default(uuid())\n  username  String   @unique\n  email     String   @unique\n  posts     Post[]\n  createdAt DateTime @default(now())\n  updatedAt DateTime @updatedAt\n}\n\nmodel Post {\n  id        String   @id @default(uuid())\n  title     String\n  body      String?\n  author    User     @relation(fields: [userId], references: [id], onDelete: Cascade)\n  userId    String\n  createdAt DateTime @default(now())\n  updatedAt DateTime @updatedAt\n}",
  "crudOperations": {
    "users": {
      "create": "INSERT INTO users (username, email) VALUES ('[value]', '[value]');",
      "read": "SELECT * FROM users WHERE id = '[value]';",
      "update": "UPDATE users SET email = '[value]' WHERE id = '[value]';",
      "delete": "DELETE FROM users WHERE id = '[value]';"
    },
    "posts": {
      "create": "INSERT INTO posts (user_id, title, body) VALUES ('[value]', '[value]', '[value]');",
      "read": "SELECT * FROM posts WHERE user_id = '[value]';",
      "update": "UPDATE posts SET title = '[value]' WHERE id = '[value]';",
      "delete": "DELETE FROM posts WHERE id = '[value]';"
    }
  }
}"#
}

/// The bundle wrapped in a ```json fence with prose around it.
pub fn sample_fenced_response() -> String {
    format!(
        "Here is the database design you asked for:\n```json\n{}\n```\nLet me know if you need adjustments.",
        sample_generated_schema_json()
    )
}

/// The bundle as a bare object with prose before and after.
pub fn sample_bare_response() -> String {
    format!(
        "Sure, here you go: {} That covers all tables.",
        sample_generated_schema_json()
    )
}

/// A reply with no JSON anywhere.
pub fn sample_prose_response() -> &'static str {
    "I'm sorry, I can't produce a schema for that request."
}
