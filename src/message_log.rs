use std::collections::VecDeque;

/// Append-only text log that keeps the most recent `capacity` lines.
#[derive(Debug, Clone)]
pub struct MessageLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, dropping the oldest ones past capacity.
    pub fn print(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.lines.push_back(message);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_most_recent_lines() {
        let mut log = MessageLog::new(5);
        for i in 0..8 {
            log.print(format!("line {i}"));
        }
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines, vec!["line 3", "line 4", "line 5", "line 6", "line 7"]);
    }

    #[test]
    fn test_empty_log() {
        let log = MessageLog::new(5);
        assert_eq!(log.lines().count(), 0);
    }
}
