use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use crate::protocol::{Answer, Header, Message, Question, HEADER_LEN};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DecodeState {
    Start,
    HeaderDecoded,
    QuestionsDecoded(usize),
    AnswersDecoded(usize),
}

/// Walks one packet section by section with a single read cursor.
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
    state: DecodeState,
}

impl<'a> Decoder<'a> {
    pub fn new(packet: &'a [u8]) -> Self {
        Decoder {
            cursor: Cursor::form(packet),
            state: DecodeState::Start,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> DecodeState {
        self.state
    }

    pub fn offset(&self) -> usize {
        self.cursor.get_current_index()
    }

    pub fn decode_header(&mut self) -> Result<Header> {
        if self.state != DecodeState::Start {
            return Err(DnsError::OutOfOrder("header already decoded"));
        }
        if self.cursor.buffer().len() < HEADER_LEN {
            return Err(DnsError::ShortPacket);
        }
        let header = Header::decode(self.cursor.buffer())?;
        self.cursor.at(HEADER_LEN);
        self.state = DecodeState::HeaderDecoded;
        Ok(header)
    }

    /// Decodes exactly `count` questions, normally the header's question count.
    pub fn decode_questions(&mut self, count: u16) -> Result<Vec<Question>> {
        if self.state != DecodeState::HeaderDecoded {
            return Err(DnsError::OutOfOrder("questions must follow the header"));
        }
        // a question takes at least 5 bytes
        let mut questions = Vec::with_capacity((count as usize).min(self.cursor.remaining() / 5));
        for _ in 0..count {
            questions.push(Question::read(&mut self.cursor)?);
        }
        self.state = DecodeState::QuestionsDecoded(questions.len());
        Ok(questions)
    }

    pub fn decode_answers(&mut self, count: u16) -> Result<Vec<Answer>> {
        if !matches!(self.state, DecodeState::QuestionsDecoded(_)) {
            return Err(DnsError::OutOfOrder("answers must follow the questions"));
        }
        // and a record at least 11
        let mut answers = Vec::with_capacity((count as usize).min(self.cursor.remaining() / 11));
        for _ in 0..count {
            let (answer, end) = self.decode_answer_at(self.cursor.get_current_index())?;
            self.cursor.at(end);
            answers.push(answer);
        }
        self.state = DecodeState::AnswersDecoded(answers.len());
        Ok(answers)
    }

    /// Decodes one record at an offset the caller already knows, returning it
    /// with the offset just past it. The running cursor is left untouched.
    pub fn decode_answer_at(&self, offset: usize) -> Result<(Answer, usize)> {
        Answer::decode(self.cursor.buffer(), offset)
    }

    pub fn decode_message(packet: &'a [u8]) -> Result<Message> {
        let mut decoder = Decoder::new(packet);
        let header = decoder.decode_header()?;
        let questions = decoder.decode_questions(header.question_count)?;
        let answers = decoder.decode_answers(header.answer_count)?;
        Ok(Message::new(header, questions, answers))
    }
}
