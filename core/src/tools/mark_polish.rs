use chrono::{DateTime, Duration, Utc};

use super::{ToolKind, ToolProfile};
use crate::ingest::{AllowList, MARKDOWN_EXTENSIONS, YAML_EXTENSIONS};
use crate::models::{Attachment, AttachmentKind, Conversation, Message};
use crate::submission::GenerationRequest;

pub(super) static PROFILE: ToolProfile = ToolProfile {
    kind: ToolKind::MarkPolish,
    i18n_prefix: "markPolish",
    allow: AllowList::new(&[
        (MARKDOWN_EXTENSIONS, AttachmentKind::Markdown),
        (YAML_EXTENSIONS, AttachmentKind::Yaml),
    ]),
    inline_markdown: true,
    fallback_key: "markPolish.submission.placeholder",
    error_key: "markPolish.responses.error",
    unsupported_key: "markPolish.fileUpload.invalidType",
    read_error_key: "markPolish.fileUpload.error",
    seed,
    mock,
};

const GETTING_STARTED: &str = "# Getting Started with Our API

This guide will help you get started with our REST API. Follow these steps to begin:

1. First, obtain your API key
2. Set up your environment
3. Make your first API call";

const GETTING_STARTED_REPLY: &str = r#"Here are some suggestions to improve your markdown:

1. Add a brief introduction paragraph explaining what the API does
2. Include a prerequisites section listing required tools/knowledge
3. Add code examples for each step
4. Include a troubleshooting section

Here's a revised version:

# Getting Started with Our API

Welcome to our REST API documentation! The API lets you manage your resources programmatically.

## Prerequisites
- Basic understanding of REST APIs
- cURL or Postman installed
- Valid API credentials

## Getting Started

1. **Obtain Your API Key** from Settings > API Keys in your dashboard.
2. **Set Up Your Environment**

```bash
export API_KEY='your-api-key'
export API_URL='https://api.example.com'
```

3. **Make Your First API Call**

```bash
curl -X GET $API_URL/v1/resources -H "Authorization: Bearer $API_KEY"
```

## Troubleshooting
- 401: check your API key
- 429: slow down and retry later"#;

const AUTH: &str = "# API Authentication

To use our API, you need to authenticate. Here's how:

1. Get your API key from the dashboard
2. Include it in your requests
3. That's it!";

const AUTH_REPLY: &str = r#"Here are some suggestions to improve your authentication documentation:

1. Add security best practices
2. Explain the different authentication methods
3. Document the error responses

Here's a revised version:

# API Authentication

## API Key Authentication

```bash
curl -X GET https://api.example.com/v1/resources -H "Authorization: Bearer YOUR_API_KEY"
```

## OAuth 2.0

```bash
curl -X POST https://api.example.com/oauth/token \
  -d "grant_type=client_credentials" \
  -d "client_id=YOUR_CLIENT_ID" \
  -d "client_secret=YOUR_CLIENT_SECRET"
```

## Security Best Practices

1. Never share your API keys
2. Rotate keys regularly
3. Keep keys in environment variables

## Errors

- 401: invalid or missing credentials
- 403: insufficient permissions
- 429: too many requests"#;

fn seed(now: DateTime<Utc>) -> Vec<Conversation> {
    vec![
        Conversation::new(1, "Getting Started Guide")
            .started_at(now - Duration::days(1))
            .with_messages(vec![
                Message::user(
                    GETTING_STARTED,
                    vec![Attachment::new("getting-started.md", GETTING_STARTED, AttachmentKind::Markdown)],
                ),
                Message::assistant(GETTING_STARTED_REPLY),
            ]),
        Conversation::new(2, "API Authentication")
            .started_at(now - Duration::hours(12))
            .with_messages(vec![
                Message::user(AUTH, vec![Attachment::new("auth.md", AUTH, AttachmentKind::Markdown)]),
                Message::assistant(AUTH_REPLY),
            ]),
    ]
}

/// Suggestions plus a revised skeleton titled after the document's first line.
fn mock(request: &GenerationRequest) -> String {
    let source = if request.text.trim().is_empty() {
        request.documents.first().map_or("", |doc| doc.content.as_str())
    } else {
        request.text.as_str()
    };
    let heading = source.lines().next().unwrap_or_default().replacen('#', "", 1);

    format!(
        "Here are some suggestions to improve your markdown:\n\n\
         1. Add a clear introduction\n\
         2. Include code examples\n\
         3. Add a troubleshooting section\n\
         4. Include best practices\n\n\
         Here's a revised version:\n\n\
         # {}\n\n\
         This is a sample improved version of your markdown. A connected backend would rewrite it from your content.\n\n\
         ## Introduction\n\nAdd a brief introduction here.\n\n\
         ## Code Examples\n\n```bash\n# Your code examples here\n```\n\n\
         ## Troubleshooting\n\nCommon issues and solutions.\n\n\
         ## Best Practices\n\n- Best practice 1\n- Best practice 2\n- Best practice 3",
        heading.trim()
    )
}
