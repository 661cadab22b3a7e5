use std::error::Error;

pub type Result<T> = core::result::Result<T, Box<dyn Error>>;

#[cfg(not(test))]
pub fn get_now() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
pub fn get_now() -> u128 {
    TIME.with(|t| t.borrow().timestamp)
}

#[cfg(test)]
thread_local! {
    pub static TIME: std::cell::RefCell<MockTimer> = std::cell::RefCell::new(MockTimer::default());
}

#[cfg(test)]
#[derive(Default)]
pub struct MockTimer {
    timestamp: u128,
}

#[cfg(test)]
impl MockTimer {
    pub fn set_timestamp(&mut self, timestamp: u128) {
        self.timestamp = timestamp;
    }
}

/// Renders bytes as rows of 16 space separated hex pairs.
pub fn hex_dump(data: &[u8]) -> String {
    data.chunks(16)
        .map(|row| {
            row.iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n")
}
