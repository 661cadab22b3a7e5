mod limit_map;
mod record;

use limit_map::LimitedMap;
use record::CacheRecord;

use crate::protocol::{Answer, Question};
use crate::system::get_now;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CacheKey {
    name: String,
    _type: u16,
}

impl From<&Question> for CacheKey {
    fn from(question: &Question) -> Self {
        let name = question.name.strip_suffix('.').unwrap_or(&question.name);
        CacheKey {
            name: name.to_ascii_lowercase(),
            _type: question._type,
        }
    }
}

/// Answers from earlier forward resolutions, dropped once their TTL elapses.
pub struct AnswerCache {
    map: LimitedMap<CacheKey, CacheRecord>,
}

impl AnswerCache {
    pub fn from(limit: usize) -> Self {
        AnswerCache {
            map: LimitedMap::from(limit),
        }
    }

    pub fn get(&self, question: &Question) -> Option<Answer> {
        let key = CacheKey::from(question);
        let record = self.map.get(&key)?;
        if record.is_expired(get_now()) {
            debug!("cache record of {} expired", question.name);
            self.map.remove(&key);
            return None;
        }
        Some(record.answer)
    }

    pub fn store(&self, question: &Question, answer: Answer) {
        if answer.ttl == 0 {
            return;
        }
        self.map.insert(CacheKey::from(question), CacheRecord::from(answer));
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
