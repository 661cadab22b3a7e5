use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::AnswerCache;
use crate::error::Result;
use crate::handler::{Chain, Handler, Query};
use crate::protocol::Answer;

pub struct CacheHandler {
    cache: Arc<AnswerCache>,
}

impl CacheHandler {
    pub fn new(cache: Arc<AnswerCache>) -> Self {
        CacheHandler {
            cache
        }
    }
}

#[async_trait]
impl Handler for CacheHandler {
    async fn handle(&self, chain: Chain<'_>, query: &Query) -> Result<Option<Answer>> {
        if let Some(answer) = self.cache.get(&query.question) {
            debug!("cache hit: {}", answer);
            return Ok(Some(answer));
        }
        let result = chain.next(query).await?;
        if let Some(answer) = &result {
            self.cache.store(&query.question, answer.clone());
            debug!("cache store {}, {} records cached", query.question.name, self.cache.len());
        }
        Ok(result)
    }
}
