use crate::cache::limit_map::GetOrdKey;
use crate::protocol::Answer;
use crate::system::get_now;

#[derive(Clone, PartialEq, Debug)]
pub struct CacheRecord {
    pub answer: Answer,
    pub create_time: u128,
    pub ttl_ms: u128,
}

impl CacheRecord {
    pub fn is_expired(&self, now: u128) -> bool {
        let duration = now.saturating_sub(self.create_time);
        self.ttl_ms < duration
    }

    pub fn get_remain_time(&self, now: u128) -> u128 {
        let duration = now.saturating_sub(self.create_time);
        self.ttl_ms.saturating_sub(duration)
    }
}

impl GetOrdKey for CacheRecord {
    type Output = u128;
    fn get_order_key(&self) -> Self::Output {
        self.get_remain_time(get_now())
    }
}

impl From<Answer> for CacheRecord {
    fn from(answer: Answer) -> Self {
        let ttl_ms = answer.ttl as u128 * 1000;
        CacheRecord {
            answer,
            create_time: get_now(),
            ttl_ms,
        }
    }
}
