use serde_json::Value;

use crate::clients::SearchHit;
use crate::types::Source;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for NYC Civic Sphere. Answer questions based on the provided context from NYC civic documents, policies, and information.

If the context contains relevant information, use it to provide a clear, accurate answer. If the context doesn't contain enough information to answer the question, say so honestly.
Always cite which sources you used when providing information.";

const TITLE_FIELDS: [&str; 6] = [
    "title",
    "name",
    "Title",
    "Name",
    "document_title",
    "documentTitle",
];

const CONTENT_FIELDS: [&str; 10] = [
    "content",
    "text",
    "description",
    "Content",
    "Text",
    "Description",
    "body",
    "Body",
    "chunk_text",
    "chunkText",
];

const URL_FIELDS: [&str; 3] = ["url", "source_url", "metadata_storage_path"];

pub const SOURCE_EXCERPT_CHARS: usize = 300;

/// Text of a field value, skipping null, `false`, zero and empty values.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn first_text(hit: &SearchHit, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| hit.get(*field).and_then(field_text))
}

/// `index` is 1-based.
pub fn hit_title(hit: &SearchHit, index: usize) -> String {
    first_text(hit, &TITLE_FIELDS).unwrap_or_else(|| format!("Document {}", index))
}

pub fn hit_content(hit: &SearchHit) -> String {
    first_text(hit, &CONTENT_FIELDS).unwrap_or_else(|| Value::Object(hit.clone()).to_string())
}

pub fn build_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("[{}]\n{}", hit_title(hit, i + 1), hit_content(hit)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn user_prompt(context: &str, question: &str) -> String {
    format!(
        "Context from NYC Civic documents:\n\n{}\n\nQuestion: {}\n\nPlease provide a helpful answer based on the context above. If you reference specific information, mention which document it came from.",
        context, question
    )
}

pub fn to_source(hit: &SearchHit, index: usize) -> Source {
    let score = ["reranker_score", "score"]
        .iter()
        .find_map(|field| hit.get(*field).and_then(Value::as_f64));
    let content = first_text(hit, &CONTENT_FIELDS)
        .map(|text| text.chars().take(SOURCE_EXCERPT_CHARS).collect::<String>());

    Source {
        title: hit_title(hit, index),
        url: first_text(hit, &URL_FIELDS),
        score,
        content,
    }
}
