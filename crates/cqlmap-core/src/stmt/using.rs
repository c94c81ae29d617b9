/// `USING TTL n AND TIMESTAMP t` parameters for writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Using {
    /// Time to live, in seconds
    pub ttl: Option<u32>,

    /// Write timestamp, in microseconds since the epoch
    pub timestamp: Option<i64>,
}

impl Using {
    pub fn ttl(ttl: u32) -> Using {
        Using {
            ttl: Some(ttl),
            timestamp: None,
        }
    }

    pub fn timestamp(timestamp: i64) -> Using {
        Using {
            ttl: None,
            timestamp: Some(timestamp),
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Using {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Using {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ttl.is_none() && self.timestamp.is_none()
    }
}
