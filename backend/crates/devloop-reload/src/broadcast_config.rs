/// Configuration for the reload broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Events buffered per subscriber before it starts lagging
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 128,
        }
    }
}
