//! Adapter from the two inbound wire schemas to the canonical [`Submission`].
//!
//! | canonical | legacy     |
//! |-----------|------------|
//! | `name`    | `nombre`   |
//! | `email`   | `email`    |
//! | `phone`   | `whatsapp` |
//! | `message` | `mensaje`  |
//!
//! For every field the canonical key wins when it holds a non-blank string;
//! the legacy key is only consulted otherwise. Values are trimmed, and
//! anything that is not a non-blank string counts as absent.

use serde_json::Value;

use super::Submission;

/// Which inbound schema supplied the submission's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundSchema {
    Canonical,
    Legacy,
    Mixed,
    /// No recognised field carried a value.
    Unknown,
}

struct FieldMapping {
    canonical: &'static str,
    legacy: &'static str,
}

const NAME: FieldMapping = FieldMapping { canonical: "name", legacy: "nombre" };
const EMAIL: FieldMapping = FieldMapping { canonical: "email", legacy: "email" };
const PHONE: FieldMapping = FieldMapping { canonical: "phone", legacy: "whatsapp" };
const MESSAGE: FieldMapping = FieldMapping { canonical: "message", legacy: "mensaje" };

#[derive(Default)]
struct SchemaUsage {
    canonical: bool,
    legacy: bool,
}

impl SchemaUsage {
    fn schema(&self) -> InboundSchema {
        match (self.canonical, self.legacy) {
            (true, true) => InboundSchema::Mixed,
            (true, false) => InboundSchema::Canonical,
            (false, true) => InboundSchema::Legacy,
            (false, false) => InboundSchema::Unknown,
        }
    }
}

/// Map a parsed body onto a [`Submission`].
///
/// Returns the canonical names of the missing required fields (in the order
/// `name`, `email`, `message`) when validation fails.
pub fn extract(raw: &Value) -> Result<(Submission, InboundSchema), Vec<&'static str>> {
    let mut usage = SchemaUsage::default();

    let name = lookup(raw, &NAME, &mut usage);
    let email = lookup(raw, &EMAIL, &mut usage);
    let phone = lookup(raw, &PHONE, &mut usage);
    let message = lookup(raw, &MESSAGE, &mut usage);

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) => Ok((
            Submission {
                name,
                email,
                phone,
                message,
            },
            usage.schema(),
        )),
        (name, email, message) => {
            let missing = [
                (NAME.canonical, name.is_none()),
                (EMAIL.canonical, email.is_none()),
                (MESSAGE.canonical, message.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            Err(missing)
        }
    }
}

fn lookup(raw: &Value, mapping: &FieldMapping, usage: &mut SchemaUsage) -> Option<String> {
    if let Some(v) = non_blank(raw, mapping.canonical) {
        usage.canonical = true;
        return Some(v);
    }

    // `email` is shared by both schemas and already handled above
    if mapping.legacy == mapping.canonical {
        return None;
    }

    let v = non_blank(raw, mapping.legacy)?;
    usage.legacy = true;
    Some(v)
}

fn non_blank(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}
