//! 调度器层容器

use super::InjectableLayerContainer;
use chrono_tz::Tz;
use infrastructure_common::{ContainerError, ContainerResult, Scheduler};
use tracing::{debug, error};

/// 调度器层容器
pub type SchedulerContainer = InjectableLayerContainer<dyn Scheduler>;

impl InjectableLayerContainer<dyn Scheduler> {
    /// 校验所有调度器的基础配置
    ///
    /// 检查 cron 规则的段数与字符，时区须为 `Local` 或 IANA 时区库中的名称。
    /// 规则本身的语义由调度实现解析。
    /// 按名称顺序返回第一个错误。
    pub fn validate_all(&self) -> ContainerResult<()> {
        for scheduler in self.get_all() {
            if let Err(reason) = validate_scheduler(scheduler.as_ref()) {
                let err = ContainerError::SchedulerValidation {
                    scheduler: scheduler.scheduler_name().to_string(),
                    reason,
                };
                error!("{}", err);
                return Err(err);
            }
            debug!("调度器 {} 校验通过", scheduler.scheduler_name());
        }
        Ok(())
    }
}

fn validate_scheduler(scheduler: &dyn Scheduler) -> Result<(), String> {
    let rule = scheduler.rule().trim();
    if rule.is_empty() {
        return Err("cron 规则不能为空".to_string());
    }

    let fields: Vec<&str> = rule.split_whitespace().collect();
    if !(5..=6).contains(&fields.len()) {
        return Err(format!("cron 规则应为 5 段或 6 段，实际 {} 段: {}", fields.len(), rule));
    }
    if let Some(field) = fields.iter().find(|f| !is_cron_field(f)) {
        return Err(format!("cron 规则包含非法字段: {}", field));
    }

    let timezone = scheduler.timezone().trim();
    if !timezone.is_empty() && !is_timezone(timezone) {
        return Err(format!("无效的时区: {}", timezone));
    }
    Ok(())
}

fn is_cron_field(field: &str) -> bool {
    field
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '/' | ',' | '-' | '?' | '#'))
}

fn is_timezone(timezone: &str) -> bool {
    timezone == "Local" || timezone.parse::<Tz>().is_ok()
}
