use chrono::Utc;

/// Generates store-unique item ids of the form `item-<millis>-<seq>`.
///
/// The sequence number advances whenever a new id would land on the same
/// millisecond as the previous one (or on an earlier one, if the clock steps
/// backwards), so consecutive calls never collide even in a tight loop and
/// ids sort roughly by creation time.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: i64,
    seq: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator::default()
    }

    pub fn next(&mut self) -> String {
        let millis = Utc::now().timestamp_millis();
        if millis > self.last_millis {
            self.last_millis = millis;
            self.seq = 0;
        } else {
            self.seq += 1;
        }
        format!("item-{}-{}", self.last_millis, self.seq)
    }
}
