use chrono::{DateTime, Duration, Utc};

use super::{ToolKind, ToolProfile};
use crate::ingest::{AllowList, CODE_EXTENSIONS, MARKDOWN_EXTENSIONS, YAML_EXTENSIONS};
use crate::models::{Attachment, AttachmentKind, Conversation, Message};
use crate::submission::GenerationRequest;

pub(super) static PROFILE: ToolProfile = ToolProfile {
    kind: ToolKind::DocuBuddy,
    i18n_prefix: "docuBuddy",
    allow: AllowList::new(&[
        (MARKDOWN_EXTENSIONS, AttachmentKind::Markdown),
        (YAML_EXTENSIONS, AttachmentKind::Yaml),
        (CODE_EXTENSIONS, AttachmentKind::Code),
    ]),
    inline_markdown: false,
    fallback_key: "docuBuddy.submission.placeholder",
    error_key: "docuBuddy.responses.error",
    unsupported_key: "docuBuddy.upload.unsupportedFile",
    read_error_key: "docuBuddy.upload.readError",
    seed,
    mock,
};

const API_SPEC: &str = "openapi: 3.0.0
info:
  title: User Management API
  version: 1.0.0
paths:
  /users:
    get:
      summary: List users
      responses:
        '200':
          description: List of users";

const API_SPEC_REPLY: &str = "I'll help you improve your API documentation. Here's a more comprehensive version:

```yaml
openapi: 3.0.0
info:
  title: User Management API
  version: 1.0.0
  description: API for managing user accounts and profiles
  contact:
    email: support@example.com
paths:
  /users:
    get:
      summary: List users
      description: Returns a paginated list of users
      parameters:
        - name: page
          in: query
          schema:
            type: integer
            default: 1
      responses:
        '200':
          description: List of users
```";

const STRUCTURE: &str = "# Project Structure

/src
  /components
  /utils
  /api
/package.json
/README.md";

const STRUCTURE_REPLY: &str = "Here's a README template for your project:

```markdown
# Project Name

A brief description of what your project does and its main features.

## Installation

npm install

## Project Layout

- `src/components`: UI components
- `src/utils`: shared helpers
- `src/api`: API clients
```";

const SCHEMA: &str = "CREATE TABLE users (
  id INT PRIMARY KEY,
  username VARCHAR(50),
  email VARCHAR(100)
);

CREATE TABLE posts (
  id INT PRIMARY KEY,
  user_id INT,
  title VARCHAR(200),
  content TEXT
);";

const SCHEMA_REPLY: &str = "Here's documentation for your database schema:

```markdown
# Database Schema

## users
| Column   | Type         | Description          |
|----------|--------------|----------------------|
| id       | INT          | Primary key          |
| username | VARCHAR(50)  | Login name           |
| email    | VARCHAR(100) | Contact address      |

## posts
| Column  | Type         | Description               |
|---------|--------------|---------------------------|
| id      | INT          | Primary key               |
| user_id | INT          | Author, references users  |
| title   | VARCHAR(200) | Post title                |
| content | TEXT         | Post body                 |
```

Consider declaring `posts.user_id` as a foreign key.";

fn seed(now: DateTime<Utc>) -> Vec<Conversation> {
    vec![
        Conversation::new(1, "REST API Documentation")
            .started_at(now - Duration::days(1))
            .with_messages(vec![
                Message::user(
                    format!("I need help writing documentation for my REST API. Here's my OpenAPI spec:\n\n```yaml\n{API_SPEC}\n```"),
                    vec![Attachment::new("api-spec.yaml", API_SPEC, AttachmentKind::Yaml)],
                ),
                Message::assistant(API_SPEC_REPLY),
            ]),
        Conversation::new(2, "Project README")
            .started_at(now - Duration::hours(12))
            .with_messages(vec![
                Message::user(
                    format!("Can you help me write a README for my project? Here's my project structure:\n\n```markdown\n{STRUCTURE}\n```"),
                    vec![Attachment::new("project-structure.md", STRUCTURE, AttachmentKind::Markdown)],
                ),
                Message::assistant(STRUCTURE_REPLY),
            ]),
        Conversation::new(3, "Database Schema Docs")
            .started_at(now - Duration::hours(6))
            .with_messages(vec![
                Message::user(
                    format!("I need help documenting my database schema. Here's my SQL:\n\n```sql\n{SCHEMA}\n```"),
                    vec![Attachment::new("schema.sql", SCHEMA, AttachmentKind::Code)],
                ),
                Message::assistant(SCHEMA_REPLY),
            ]),
    ]
}

fn mock(request: &GenerationRequest) -> String {
    let overview = if request.text.trim().is_empty() {
        "Content analysis and documentation"
    } else {
        request.text.as_str()
    };
    let files = request
        .files
        .iter()
        .map(|f| format!("### {}\n```{}\n{}\n```\n", f.name, f.kind.fence(), f.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Here's a comprehensive documentation for your content:\n\n\
         ## Overview\n\n{overview}.\n\n\
         ## Content Analysis\n\n{files}\n\
         ## Documentation\n\n\
         1. **Purpose**\n   - Main objectives\n   - Key features\n\n\
         2. **Structure**\n   - Organization\n   - Components\n\n\
         3. **Usage**\n   - How to use\n   - Examples\n\n\
         4. **Best Practices**\n   - Guidelines\n   - Recommendations\n\n\
         ## Additional Recommendations\n\n\
         1. Add more detailed descriptions\n\
         2. Include usage examples\n\
         3. Add troubleshooting section\n\
         4. Consider adding diagrams\n\
         5. Include version history"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_files_by_kind() {
        let files = [
            Attachment::new("guide.md", "# Guide", AttachmentKind::Markdown),
            Attachment::new("api.yml", "openapi: 3.0.0", AttachmentKind::Yaml),
            Attachment::code("lib.rs", "fn main() {}", "rs"),
        ];
        let text = mock(&GenerationRequest::new(ToolKind::DocuBuddy, 3, "", &files));
        assert!(text.contains("## Overview\n\nContent analysis and documentation.\n"));
        assert!(text.contains("### api.yml\n```yaml\nopenapi: 3.0.0\n```"));
        assert!(text.contains("### guide.md\n```markdown\n# Guide\n```"));
        assert!(text.contains("### lib.rs\n```text\nfn main() {}\n```"));
    }

    #[test]
    fn echoes_files_in_upload_order() {
        let files = [
            Attachment::code("lib.rs", "fn main() {}", "rs"),
            Attachment::new("guide.md", "# Guide", AttachmentKind::Markdown),
            Attachment::new("api.yml", "openapi: 3.0.0", AttachmentKind::Yaml),
        ];
        let text = mock(&GenerationRequest::new(ToolKind::DocuBuddy, 1, "Explain", &files));
        let at = |name: &str| text.find(&format!("### {name}")).unwrap();
        assert!(at("lib.rs") < at("guide.md"));
        assert!(at("guide.md") < at("api.yml"));
    }
}
