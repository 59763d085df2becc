//! Retrieval-augmented answers over the civic document index.

mod prompt;

use std::sync::Arc;

use crate::clients::{ChatModel, SearchIndex};
use crate::types::ChatResponse;

pub use prompt::{build_context, to_source, user_prompt, SYSTEM_PROMPT};

pub const DEFAULT_TOP: usize = 5;

pub const NO_RESULTS_MESSAGE: &str = "I couldn't find any relevant information in the NYC civic documents to answer your question. Please try rephrasing or asking about a different topic.";
pub const GENERATION_FAILED_MESSAGE: &str = "I found some relevant documents but couldn't generate a response right now. Please review the sources below or try again later.";

pub struct ChatService {
    search: Arc<dyn SearchIndex>,
    model: Arc<dyn ChatModel>,
    top: usize,
}

impl ChatService {
    pub fn new(search: Arc<dyn SearchIndex>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            search,
            model,
            top: DEFAULT_TOP,
        }
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    pub async fn answer(&self, message: &str) -> ChatResponse {
        let hits = self.search.search(message, self.top).await;
        if hits.is_empty() {
            log::info!("No search results for chat question");
            return ChatResponse {
                response: NO_RESULTS_MESSAGE.to_string(),
                sources: Vec::new(),
            };
        }

        let context = build_context(&hits);
        log::debug!(
            "Chat context has {} characters from {} documents",
            context.len(),
            hits.len()
        );

        let response = match self
            .model
            .complete(SYSTEM_PROMPT, &user_prompt(&context, message))
            .await
        {
            Some(text) => text,
            None => {
                log::warn!("Chat model produced no answer, returning sources only");
                GENERATION_FAILED_MESSAGE.to_string()
            }
        };

        let sources = hits
            .iter()
            .enumerate()
            .map(|(i, hit)| to_source(hit, i + 1))
            .collect();
        ChatResponse { response, sources }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::SearchHit;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FixedSearch {
        hits: Vec<SearchHit>,
        seen_top: Mutex<Option<usize>>,
    }

    #[async_trait]
    impl SearchIndex for FixedSearch {
        async fn search(&self, _query: &str, top: usize) -> Vec<SearchHit> {
            *self.seen_top.lock().unwrap() = Some(top);
            self.hits.clone()
        }
    }

    struct EchoModel {
        answer: Option<String>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Option<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            self.answer.clone()
        }
    }

    fn setup(hits: Vec<SearchHit>, answer: Option<&str>) -> (Arc<FixedSearch>, Arc<EchoModel>) {
        let search = Arc::new(FixedSearch {
            hits,
            seen_top: Mutex::new(None),
        });
        let model = Arc::new(EchoModel {
            answer: answer.map(str::to_string),
            prompts: Mutex::new(Vec::new()),
        });
        (search, model)
    }

    fn hits() -> Vec<SearchHit> {
        vec![json!({
            "title": "Recycling Guide",
            "content": "Paper goes in green bins.",
            "url": "https://nyc.gov/recycling",
            "score": 3.2,
        })
        .as_object()
        .cloned()
        .unwrap()]
    }

    #[tokio::test]
    async fn no_hits_skips_the_model() {
        let (search, model) = setup(Vec::new(), Some("unused"));
        let service = ChatService::new(search.clone(), model.clone());

        let reply = service.answer("Where do batteries go?").await;
        assert_eq!(reply.response, NO_RESULTS_MESSAGE);
        assert!(reply.sources.is_empty());
        assert!(model.prompts.lock().unwrap().is_empty());
        assert_eq!(*search.seen_top.lock().unwrap(), Some(DEFAULT_TOP));
    }

    #[tokio::test]
    async fn answers_with_sources() {
        let (search, model) = setup(hits(), Some("Use the green bin."));
        let service = ChatService::new(search, model.clone()).with_top(3);

        let reply = service.answer("Where does paper go?").await;
        assert_eq!(reply.response, "Use the green bin.");
        assert_eq!(reply.sources.len(), 1);
        assert_eq!(reply.sources[0].title, "Recycling Guide");
        assert_eq!(reply.sources[0].score, Some(3.2));

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts[0].0, SYSTEM_PROMPT);
        assert!(prompts[0].1.contains("[Recycling Guide]\nPaper goes in green bins."));
        assert!(prompts[0].1.contains("Question: Where does paper go?"));
    }

    #[tokio::test]
    async fn model_failure_keeps_sources() {
        let (search, model) = setup(hits(), None);
        let reply = ChatService::new(search, model).answer("paper?").await;
        assert_eq!(reply.response, GENERATION_FAILED_MESSAGE);
        assert_eq!(reply.sources.len(), 1);
    }
}
