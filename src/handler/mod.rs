use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::AnswerCache;
use crate::config::Config;
use crate::error::Result;
use crate::handler::cache_handler::CacheHandler;
use crate::handler::mock_answer::MockAnswerMaker;
use crate::handler::query_sender::QuerySender;
use crate::protocol::{Answer, Decoder, Header, Message, Question, NOT_IMPLEMENTED, OPCODE_QUERY, SERVER_FAILURE};

pub use server::DnsServer;
pub use upstream::{UdpUpstream, Upstream};

mod cache_handler;
mod mock_answer;
mod query_sender;
mod server;
mod upstream;

/// A single question of an incoming packet, with that packet's header.
#[derive(Debug, Clone)]
pub struct Query {
    pub header: Header,
    pub question: Question,
}

#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, chain: Chain<'_>, query: &Query) -> Result<Option<Answer>>;
}

/// The handlers that have not run yet for the current question.
#[derive(Clone, Copy)]
pub struct Chain<'a> {
    handlers: &'a [Box<dyn Handler>],
}

impl<'a> Chain<'a> {
    pub fn from(handlers: &'a [Box<dyn Handler>]) -> Self {
        Chain { handlers }
    }

    pub async fn next(self, query: &Query) -> Result<Option<Answer>> {
        match self.handlers.split_first() {
            Some((handler, rest)) => handler.handle(Chain { handlers: rest }, query).await,
            None => Ok(None),
        }
    }
}

pub struct Resolver {
    handlers: Vec<Box<dyn Handler>>,
}

impl Resolver {
    /// Forwarding when an upstream resolver is configured, canned answers otherwise.
    pub fn from(config: &Config) -> Self {
        match &config.resolver {
            Some(address) => {
                info!("forwarding questions to {}", address);
                let timeout = Duration::from_millis(config.upstream_timeout_ms);
                let upstream = Arc::new(UdpUpstream::from(address, timeout));
                let cache = Arc::new(AnswerCache::from(config.cache_num));
                Resolver::forward(upstream, cache)
            }
            None => {
                info!("no resolver configured, answering {} to every question", config.mock_address);
                Resolver::mock(config.mock_ttl, config.mock_address)
            }
        }
    }

    pub fn mock(ttl: u32, address: Ipv4Addr) -> Self {
        Resolver {
            handlers: vec![Box::new(MockAnswerMaker::new(ttl, address))],
        }
    }

    pub fn forward(upstream: Arc<dyn Upstream>, cache: Arc<AnswerCache>) -> Self {
        Resolver {
            handlers: vec![
                Box::new(CacheHandler::new(cache)),
                Box::new(QuerySender::new(upstream)),
            ],
        }
    }

    /// Decodes one request packet and returns the encoded response. Codec
    /// errors are returned; upstream failures become a SERVFAIL response.
    pub async fn handle_packet(&self, packet: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = Decoder::new(packet);
        let header = decoder.decode_header()?;
        let questions = decoder.decode_questions(header.question_count)?;
        debug!("dns query: id = {}, questions = {:?}", header.id, questions);
        if decoder.offset() < packet.len() {
            debug!("ignore {} bytes after the question section", packet.len() - decoder.offset());
        }
        let response = self.resolve(header, questions).await;
        response.encode()
    }

    pub async fn resolve(&self, request: Header, questions: Vec<Question>) -> Message {
        let mut header = Header::response_to(&request);
        if request.opcode != OPCODE_QUERY {
            warn!("opcode {} is not implemented", request.opcode);
            header.response_code = NOT_IMPLEMENTED;
            return Message::new(header, questions, vec![]);
        }
        let chain = Chain::from(&self.handlers);
        let mut answers = Vec::with_capacity(questions.len());
        for question in &questions {
            let query = Query {
                header: request,
                question: question.clone(),
            };
            match chain.next(&query).await {
                Ok(Some(answer)) => answers.push(answer),
                Ok(None) => {}
                Err(e) => {
                    if e.is_upstream() {
                        error!("forward {} failed: {}", question.name, e);
                    } else {
                        warn!("resolve {} failed: {}", question.name, e);
                    }
                    header.response_code = SERVER_FAILURE;
                    answers.clear();
                    break;
                }
            }
        }
        Message::new(header, questions, answers)
    }
}
