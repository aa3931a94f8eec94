use crate::conf::error::ConfigError;
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct RangeConstraint<T> {
    pub min: T,
    pub max: T,
    pub label: &'static str,
}

impl<T: PartialOrd + Display + Copy> RangeConstraint<T> {
    pub fn check(&self, value: T) -> Result<(), ConfigError> {
        if value < self.min || value > self.max {
            return Err(ConfigError::Invalid {
                field: self.label,
                reason: format!("{value} is outside {}..={}", self.min, self.max),
            });
        }
        Ok(())
    }
}

pub const LOG_PAGE_SIZE: RangeConstraint<u32> = RangeConstraint {
    min: 1,
    max: 10_000,
    label: "diagnose.log_page_size",
};

pub const TASK_PAGE_SIZE: RangeConstraint<u32> = RangeConstraint {
    min: 1,
    max: 100,
    label: "diagnose.task_page_size",
};

pub const TASK_LOG_CONCURRENCY: RangeConstraint<usize> = RangeConstraint {
    min: 1,
    max: 64,
    label: "diagnose.task_log_concurrency",
};

pub const PREVIEW_LIMIT: RangeConstraint<u32> = RangeConstraint {
    min: 1,
    max: 100,
    label: "diagnose.preview_limit",
};

pub const MANIFEST_PAGE_SIZE: RangeConstraint<u32> = RangeConstraint {
    min: 1,
    max: 10_000,
    label: "analyze.manifest_page_size",
};
