use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error::Result;
use crate::handler::{Chain, Handler, Query};
use crate::protocol::Answer;

/// Answers every question with the same address, without asking anyone.
pub struct MockAnswerMaker {
    ttl: u32,
    address: Ipv4Addr,
}

impl MockAnswerMaker {
    pub fn new(ttl: u32, address: Ipv4Addr) -> Self {
        MockAnswerMaker {
            ttl,
            address,
        }
    }
}

#[async_trait]
impl Handler for MockAnswerMaker {
    async fn handle(&self, _: Chain<'_>, query: &Query) -> Result<Option<Answer>> {
        Ok(Some(Answer::from_ipv4(query.question.clone(), self.ttl, self.address)))
    }
}
