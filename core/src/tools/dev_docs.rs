use chrono::{DateTime, Duration, Utc};

use super::{ToolKind, ToolProfile};
use crate::ingest::{AllowList, CODE_EXTENSIONS, YAML_EXTENSIONS};
use crate::models::{Attachment, AttachmentKind, Conversation, Message};
use crate::submission::GenerationRequest;

pub(super) static PROFILE: ToolProfile = ToolProfile {
    kind: ToolKind::DevDocs,
    i18n_prefix: "devDocs",
    allow: AllowList::new(&[
        (CODE_EXTENSIONS, AttachmentKind::Code),
        (YAML_EXTENSIONS, AttachmentKind::Yaml),
    ]),
    inline_markdown: false,
    fallback_key: "devDocs.submission.placeholder",
    error_key: "devDocs.responses.error",
    unsupported_key: "devDocs.upload.unsupportedFile",
    read_error_key: "devDocs.upload.readError",
    seed,
    mock,
};

const CALCULATOR: &str = "def calculate_total(items, discount=0):
    total = sum(item.price for item in items)
    if discount:
        total = total * (1 - discount)
    return total";

const CALCULATOR_REPLY: &str = r#"Here's a comprehensive documentation for your function:

```python
def calculate_total(items, discount=0):
    """
    Calculates the total price of items with an optional discount.

    Args:
        items (list): Items exposing a `price` attribute.
        discount (float, optional): Rate between 0 and 1. Defaults to 0.

    Returns:
        float: The total price after applying the discount.

    Raises:
        ValueError: If discount is not between 0 and 1.
    """
    if not 0 <= discount <= 1:
        raise ValueError("Discount must be between 0 and 1")
    total = sum(item.price for item in items)
    return total * (1 - discount)
```

Consider adding type hints and unit tests for the discount bounds."#;

const USER_PROFILE: &str = r#"interface User {
  id: number;
  name: string;
  email: string;
}

const UserProfile: React.FC<{ user: User }> = ({ user }) => {
  return (
    <div className="user-profile">
      <h2>{user.name}</h2>
      <p>{user.email}</p>
    </div>
  );
};"#;

const USER_PROFILE_REPLY: &str = r#"Here's a well-documented version of your React component:

```typescript
/** Shape of the user data rendered by the profile card. */
interface User {
  /** Unique identifier for the user */
  id: number;
  /** User's full name */
  name: string;
  /** User's email address */
  email: string;
}

/**
 * Displays a user's name and email.
 *
 * @example
 * <UserProfile user={{ id: 1, name: 'Jane Doe', email: 'jane@example.com' }} />
 */
const UserProfile: React.FC<{ user: User }> = ({ user }) => (
  <div className="user-profile">
    <h2>{user.name}</h2>
    <p>{user.email}</p>
  </div>
);
```"#;

fn seed(now: DateTime<Utc>) -> Vec<Conversation> {
    vec![
        Conversation::new(1, "Python Function Documentation")
            .started_at(now - Duration::days(1))
            .with_messages(vec![
                Message::user(
                    format!("Can you help me document this Python function?\n\n```python\n{CALCULATOR}\n```"),
                    vec![Attachment::code("calculator.py", CALCULATOR, "python")],
                ),
                Message::assistant(CALCULATOR_REPLY),
            ]),
        Conversation::new(2, "React Component Documentation")
            .started_at(now - Duration::hours(12))
            .with_messages(vec![
                Message::user(
                    format!("I need help documenting this React component:\n\n```typescript\n{USER_PROFILE}\n```"),
                    vec![Attachment::code("UserProfile.tsx", USER_PROFILE, "typescript")],
                ),
                Message::assistant(USER_PROFILE_REPLY),
            ]),
    ]
}

fn mock(request: &GenerationRequest) -> String {
    let subject = if request.text.trim().is_empty() {
        "implements functionality"
    } else {
        request.text.as_str()
    };
    let analysis = request
        .code
        .iter()
        .map(|file| {
            format!(
                "### {}\n```{}\n{}\n```\n",
                file.name,
                file.language.as_deref().unwrap_or("text"),
                file.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Here's a comprehensive documentation for your code:\n\n\
         ## Overview\n\nThis code {subject}.\n\n\
         ## Code Analysis\n\n{analysis}\n\
         ## Documentation\n\n\
         1. **Function/Component Purpose**\n   - Main functionality\n   - Key features\n\n\
         2. **Parameters/Props**\n   - Detailed description of inputs\n   - Type information\n\n\
         3. **Return Values**\n   - What the code returns\n   - Possible outcomes\n\n\
         4. **Examples**\n   ```\n   // Example usage\n   ```\n\n\
         5. **Best Practices**\n   - Error handling\n   - Performance considerations\n   - Security notes\n\n\
         ## Additional Recommendations\n\n\
         1. Add comprehensive error handling\n\
         2. Include input validation\n\
         3. Add unit tests\n\
         4. Consider edge cases\n\
         5. Document any dependencies"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::{parse_message, Segment};

    #[test]
    fn echoes_each_code_file_in_a_tagged_fence() {
        let files = [
            Attachment::code("calculator.py", "x = 1", "py"),
            Attachment::code("main.go", "package main", "go"),
        ];
        let request = GenerationRequest::new(ToolKind::DevDocs, 1, "", &files);
        let text = mock(&request);
        assert!(text.contains("This code implements functionality."));

        let code: Vec<_> = parse_message(&text)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Code { language, content } => Some((language, content)),
                Segment::Text(_) => None,
            })
            .collect();
        assert_eq!(code[0], ("py".to_string(), "x = 1".to_string()));
        assert_eq!(code[1], ("go".to_string(), "package main".to_string()));
    }
}
