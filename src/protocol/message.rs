use crate::error::Result;
use crate::protocol::{Answer, Header, Question};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

impl Message {
    pub fn new(header: Header, questions: Vec<Question>, answers: Vec<Answer>) -> Self {
        Message {
            header,
            questions,
            answers,
        }
    }

    /// One-question request for an upstream resolver.
    pub fn query(origin: &Header, question: Question) -> Self {
        Message::new(Header::query_from(origin), vec![question], vec![])
    }

    /// Header, then questions, then answers. The counts written are the ones
    /// of the record lists; authority and additional sections are not carried.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut header = self.header;
        header.question_count = self.questions.len() as u16;
        header.answer_count = self.answers.len() as u16;
        header.authority_count = 0;
        header.additional_count = 0;
        let mut vec = header.encode()?;
        for question in &self.questions {
            vec.extend(question.encode()?);
        }
        for answer in &self.answers {
            vec.extend(answer.encode()?);
        }
        Ok(vec)
    }
}
