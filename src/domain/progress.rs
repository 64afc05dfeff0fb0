use log::info;

/// Track progress of a processing batch
#[derive(Debug, Default)]
pub struct BatchProgress {
    total: usize,
    recorded: usize,
    already_processed: usize,
    failed: usize,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn increment_recorded(&mut self) {
        self.recorded += 1;
        self.log_progress();
    }

    pub fn increment_already_processed(&mut self) {
        self.already_processed += 1;
        self.log_progress();
    }

    pub fn increment_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.recorded + self.already_processed + self.failed
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn already_processed(&self) -> usize {
        self.already_processed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} ({} recorded, {} already processed, {} failed)",
                current, self.total, self.recorded, self.already_processed, self.failed
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
