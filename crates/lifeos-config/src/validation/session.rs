use crate::schema::LifeOsConfig;

use super::helpers::{validate_not_blank, validate_range};

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &LifeOsConfig) {
    let session = &config.session;

    validate_not_blank(errors, "session.default_title", &session.default_title);
    validate_not_blank(errors, "session.greeting", &session.greeting);
    validate_range(
        errors,
        "session.title_max_chars",
        session.title_max_chars,
        1,
        200,
    );
}
