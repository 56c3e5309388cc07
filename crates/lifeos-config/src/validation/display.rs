use crate::schema::LifeOsConfig;

use super::helpers::validate_range;

pub(crate) fn validate_display(errors: &mut Vec<String>, config: &LifeOsConfig) {
    validate_range(
        errors,
        "display.reveal_ms",
        config.display.reveal_ms,
        0,
        1000,
    );
    validate_range(
        errors,
        "display.scroll_threshold",
        config.display.scroll_threshold,
        1,
        10_000,
    );
}
