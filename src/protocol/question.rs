use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use crate::protocol::{unzip_name, wrap_name, CLASS_IN, TYPE_A};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Question {
    pub name: String,
    pub _type: u16,
    pub class: u16,
}

impl Question {
    pub fn new(name: &str, _type: u16, class: u16) -> Self {
        Question {
            name: name.to_string(),
            _type,
            class,
        }
    }

    pub fn from_domain(domain: &str) -> Self {
        Question::new(domain, TYPE_A, CLASS_IN)
    }

    /// Same name ignoring ASCII case, same type and class.
    pub fn is_same(&self, other: &Question) -> bool {
        self._type == other._type
            && self.class == other.class
            && self.name.eq_ignore_ascii_case(&other.name)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut result = wrap_name(&self.name)?;
        result.extend(&self._type.to_be_bytes());
        result.extend(&self.class.to_be_bytes());
        Ok(result)
    }

    /// Decodes the question at `offset`, returning it with the offset just past it.
    pub fn decode(buffer: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut cursor = Cursor::form(buffer);
        cursor.at(offset);
        let question = Question::read(&mut cursor)?;
        Ok((question, cursor.get_current_index()))
    }

    pub(crate) fn read(cursor: &mut Cursor) -> Result<Self> {
        let (name, consumed) = unzip_name(cursor.buffer(), cursor.get_current_index(), true)?;
        cursor.move_to(consumed);
        if cursor.remaining() < 4 {
            return Err(DnsError::ShortQuestion);
        }
        let _type = cursor.take_u16()?;
        let class = cursor.take_u16()?;
        Ok(Question {
            name,
            _type,
            class,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DnsError;
    use crate::protocol::question::Question;
    use crate::protocol::{CLASS_IN, TYPE_A};

    #[test]
    fn should_return_bytes_when_call_encode_given_a_question() {
        let question = Question::from_domain("codecrafters.io");

        let result = question.encode().unwrap();

        let mut expected = vec![12];
        expected.extend(b"codecrafters");
        expected.push(2);
        expected.extend(b"io");
        expected.extend(&[0, 0, 1, 0, 1]);
        assert_eq!(expected, result)
    }

    #[test]
    fn should_return_same_question_and_end_offset_when_call_decode_given_encoded_question() {
        let question = Question::new("mail.Example.org", 15, CLASS_IN);
        let mut packet = vec![0xaa; 3];
        packet.extend(question.encode().unwrap());
        packet.push(0xbb);

        let (result, offset) = Question::decode(&packet, 3).unwrap();

        assert_eq!(question, result);
        assert_eq!(packet.len() - 1, offset);
    }

    #[test]
    fn should_resolve_pointer_when_call_decode_given_compressed_name() {
        let mut packet = vec![0u8; 12];
        packet.extend(Question::from_domain("example.com").encode().unwrap());
        let second = packet.len();
        packet.extend(&[0xc0, 12, 0, 28, 0, 1]);

        let (result, offset) = Question::decode(&packet, second).unwrap();

        assert_eq!(Question::new("example.com", 28, 1), result);
        assert_eq!(packet.len(), offset);
    }

    #[test]
    fn should_return_short_question_when_call_decode_given_truncated_trailer() {
        let mut packet = Question::from_domain("a.b").encode().unwrap();
        packet.truncate(packet.len() - 1);

        let result = Question::decode(&packet, 0);

        assert!(matches!(result, Err(DnsError::ShortQuestion)));
    }

    #[test]
    fn should_return_a_in_question_when_call_from_domain_given_domain() {
        let result = Question::from_domain("example.com");

        assert_eq!(TYPE_A, result._type);
        assert_eq!(CLASS_IN, result.class);
    }

    #[test]
    fn should_return_true_when_call_is_same_given_differently_cased_name() {
        let question = Question::from_domain("Example.COM");

        assert!(question.is_same(&Question::from_domain("example.com")));
        assert!(!question.is_same(&Question::new("example.com", 28, CLASS_IN)));
        assert!(!question.is_same(&Question::from_domain("example.org")));
    }
}
