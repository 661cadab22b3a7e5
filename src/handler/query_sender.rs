use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{DnsError, Result};
use crate::handler::upstream::Upstream;
use crate::handler::{Chain, Handler, Query};
use crate::protocol::{Answer, Decoder, Message};

/// Forwards one question to the upstream resolver and takes the first record
/// of the reply, once the reply is known to answer that question.
pub struct QuerySender {
    upstream: Arc<dyn Upstream>,
}

impl QuerySender {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        QuerySender {
            upstream
        }
    }
}

#[async_trait]
impl Handler for QuerySender {
    async fn handle(&self, _: Chain<'_>, query: &Query) -> Result<Option<Answer>> {
        let request = Message::query(&query.header, query.question.clone()).encode()?;
        let reply = self.upstream.exchange(&request).await?;
        let reply = Decoder::decode_message(&reply)?;
        match reply.questions.first() {
            Some(question) if question.is_same(&query.question) => {}
            _ => return Err(DnsError::UnexpectedReply(query.question.name.clone())),
        }
        match reply.answers.into_iter().next() {
            Some(answer) => {
                debug!("dns answer: {}", answer);
                Ok(Some(answer))
            }
            None => {
                debug!("upstream has no answer for {}, rcode = {}", query.question.name, reply.header.response_code);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use crate::error::DnsError;
    use crate::handler::query_sender::QuerySender;
    use crate::handler::tests::{FakeUpstream, MisdirectedUpstream};
    use crate::handler::{Chain, Handler, Query};
    use crate::protocol::{Header, Question};

    fn get_query(name: &str) -> Query {
        Query {
            header: Header {
                id: 0x4242,
                recursion_desired: true,
                question_count: 2,
                ..Header::default()
            },
            question: Question::from_domain(name),
        }
    }

    #[tokio::test]
    async fn should_return_decoded_answer_when_call_handle_given_upstream_answer() {
        let upstream = Arc::new(FakeUpstream::new(&[("example.com", Ipv4Addr::new(93, 184, 216, 34))]));
        let sender = QuerySender::new(upstream.clone());

        let result = sender.handle(Chain::from(&[]), &get_query("example.com")).await.unwrap().unwrap();

        assert_eq!(1, upstream.calls.load(Ordering::SeqCst));
        assert_eq!(Question::from_domain("example.com"), result.question);
        assert_eq!(300, result.ttl);
        assert_eq!(Some(Ipv4Addr::new(93, 184, 216, 34)), result.ipv4());
    }

    #[tokio::test]
    async fn should_return_none_when_call_handle_given_upstream_nxdomain() {
        let upstream = Arc::new(FakeUpstream::new(&[]));
        let sender = QuerySender::new(upstream);

        let result = sender.handle(Chain::from(&[]), &get_query("nowhere.test")).await.unwrap();

        assert_eq!(None, result);
    }

    #[tokio::test]
    async fn should_return_error_when_call_handle_given_truncated_reply() {
        struct ShortUpstream;

        #[async_trait::async_trait]
        impl crate::handler::Upstream for ShortUpstream {
            async fn exchange(&self, request: &[u8]) -> crate::error::Result<Vec<u8>> {
                let mut reply = request.to_vec();
                reply[7] = 1;
                reply.extend(&[0xc0, 12, 0, 1]);
                Ok(reply)
            }
        }
        let sender = QuerySender::new(Arc::new(ShortUpstream));

        let result = sender.handle(Chain::from(&[]), &get_query("example.com")).await;

        assert!(matches!(result, Err(DnsError::ShortQuestion)));
    }

    #[tokio::test]
    async fn should_return_unexpected_reply_when_call_handle_given_reply_for_other_question() {
        let upstream = Arc::new(MisdirectedUpstream::new("a.com", Ipv4Addr::new(1, 1, 1, 1)));
        let sender = QuerySender::new(upstream.clone());

        let result = sender.handle(Chain::from(&[]), &get_query("b.org")).await;

        assert_eq!(1, upstream.calls.load(Ordering::SeqCst));
        assert!(matches!(result, Err(DnsError::UnexpectedReply(name)) if name == "b.org"));
    }

    #[tokio::test]
    async fn should_accept_reply_when_call_handle_given_differently_cased_echo() {
        let upstream = Arc::new(MisdirectedUpstream::new("EXAMPLE.com", Ipv4Addr::new(1, 1, 1, 1)));
        let sender = QuerySender::new(upstream);

        let result = sender.handle(Chain::from(&[]), &get_query("example.com")).await.unwrap();

        assert_eq!(Some(Ipv4Addr::new(1, 1, 1, 1)), result.and_then(|a| a.ipv4()));
    }
}
